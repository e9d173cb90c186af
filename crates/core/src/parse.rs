//! HTML parsing and DOM querying.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing exported
//! post pages and querying them with CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use blogmerge_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <div class="section-content">
//!                 <h3 class="graf--title">Title</h3>
//!                 <p class="graf--p">Paragraph</p>
//!             </div>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let section = doc.select_first("div.section-content").unwrap().unwrap();
//! assert_eq!(section.select("p.graf--p").unwrap().len(), 1);
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{BlogmergeError, Result};

/// Elements whose text is never visible.
const HIDDEN_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Represents a parsed HTML document.
///
/// Parsing is lenient: malformed markup is repaired the way browsers do it.
///
/// # Example
///
/// ```rust
/// use blogmerge_core::parse::Document;
///
/// let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.visible_text(), "TestHello");
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`BlogmergeError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector, in document order.
    pub fn select_first(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        let sel = compile(selector)?;
        Ok(self.html.select(&sel).next().map(|el| Element { element: el }))
    }

    /// Gets the visible text of the whole document.
    ///
    /// Script and style contents are skipped and whitespace runs collapse to one space.
    pub fn visible_text(&self) -> String {
        visible_text(self.html.root_element())
    }
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use blogmerge_core::parse::Document;
///
/// let html = r#"<footer><a href="https://medium.com/p/abc">Link text</a></footer>"#;
/// let doc = Document::parse(html).unwrap();
/// let link = &doc.select("footer a").unwrap()[0];
///
/// assert_eq!(link.text(), "Link text");
/// assert_eq!(link.attr("href"), Some("https://medium.com/p/abc"));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the raw concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text a reader would see, trimmed and with collapsed whitespace.
    pub fn visible_text(&self) -> String {
        visible_text(self.element)
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`BlogmergeError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first descendant matching a CSS selector.
    pub fn select_first(&self, selector: &str) -> Result<Option<Element<'a>>> {
        let sel = compile(selector)?;
        Ok(self.element.select(&sel).next().map(|el| Element { element: el }))
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| BlogmergeError::HtmlParseError(format!("Invalid selector: {}", e)))
}

fn visible_text(root: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_TAGS.contains(&el.name()))
        });
        if !hidden {
            raw.push_str(text);
        }
    }
    collapse_whitespace(&raw)
}

/// Collapses whitespace runs to one space, or to nothing between two CJK characters.
fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if let (Some(prev), Some(next)) = (out.chars().next_back(), word.chars().next())
            && !(is_cjk(prev) && is_cjk(next))
        {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3000}'..='\u{303f}'
            | '\u{3040}'..='\u{30ff}'
            | '\u{3400}'..='\u{4dbf}'
            | '\u{4e00}'..='\u{9fff}'
            | '\u{f900}'..='\u{faff}'
            | '\u{ff00}'..='\u{ffef}'
            | '\u{20000}'..='\u{2fa1f}'
    )
}
