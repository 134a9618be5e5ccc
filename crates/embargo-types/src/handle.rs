use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

const RESOLVER_PREFIXES: &[&str] = &[
    "https://hdl.handle.net/",
    "http://hdl.handle.net/",
    "hdl:",
    "handle/",
];

/// Canonical persistent identifier of an item, e.g. `1794/1234`.
///
/// Normalization rules are intentionally simple and deterministic:
/// - surrounding whitespace is dropped
/// - resolver prefixes (`hdl:`, `http(s)://hdl.handle.net/`, `handle/`) are stripped
/// - trailing slashes are removed
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref().trim();
        for prefix in RESOLVER_PREFIXES {
            if let Some(rest) = v.strip_prefix(prefix) {
                v = rest;
                break;
            }
        }
        Self(v.trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The handle prefix (naming authority), if the handle has one.
    pub fn prefix(&self) -> Option<&str> {
        self.0.split_once('/').map(|(p, _)| p)
    }

    /// Public URL for this handle under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/handle/{}", base_url.trim_end_matches('/'), self.0)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Handle {
    fn from(value: &str) -> Self {
        Handle::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_resolver_prefixes() {
        assert_eq!(Handle::new("hdl:1794/12").as_str(), "1794/12");
        assert_eq!(
            Handle::new("https://hdl.handle.net/1794/12/").as_str(),
            "1794/12"
        );
        assert_eq!(Handle::new("  1794/12 ").as_str(), "1794/12");
    }

    #[test]
    fn builds_urls_without_double_slashes() {
        let h = Handle::new("1794/12");
        assert_eq!(
            h.url("https://scholarsbank.example.edu/"),
            "https://scholarsbank.example.edu/handle/1794/12"
        );
        assert_eq!(h.prefix(), Some("1794"));
    }
}
