pub mod js;

pub use js::{DEFAULT_VARIABLE, EscapeMode, JsConfig, JsFormatter, from_js_literal, to_js_literal};
