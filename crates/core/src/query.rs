//! Pure "first child matching a predicate" queries.
//!
//! Both extractors lower parser nodes into plain values first, then pick the
//! permalink with these functions. Nothing here touches a parser.

/// The attributes of a link-like element that matter for permalink selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkRef {
    pub href: Option<String>,
    pub rel: Option<String>,
}

impl LinkRef {
    pub fn new(href: Option<&str>, rel: Option<&str>) -> Self {
        Self { href: href.map(str::to_string), rel: rel.map(str::to_string) }
    }

    /// True if `href` is present and starts with `prefix`.
    pub fn href_starts_with(&self, prefix: &str) -> bool {
        self.href.as_deref().is_some_and(|href| href.starts_with(prefix))
    }

    pub fn rel_is(&self, rel: &str) -> bool {
        self.rel.as_deref() == Some(rel)
    }
}

/// Returns the first item satisfying `predicate`, in order.
pub fn first_matching<T, P>(items: &[T], predicate: P) -> Option<&T>
where
    P: Fn(&T) -> bool,
{
    items.iter().find(|item| predicate(item))
}

/// Selects a feed entry's permalink: the first `rel="alternate"` link under `prefix`.
pub fn find_feed_permalink<'a>(links: &'a [LinkRef], prefix: &str) -> Option<&'a str> {
    first_matching(links, |link| link.rel_is("alternate") && link.href_starts_with(prefix))
        .and_then(|link| link.href.as_deref())
}

/// Selects the first non-empty href under `prefix`, ignoring `rel`.
pub fn find_prefixed_href<'a>(links: &'a [LinkRef], prefix: &str) -> Option<&'a str> {
    first_matching(links, |link| link.href_starts_with(prefix))
        .and_then(|link| link.href.as_deref())
        .filter(|href| !href.is_empty())
}
