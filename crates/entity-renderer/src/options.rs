use serde::{Deserialize, Serialize};

/// Knobs for behaviour the messaging platforms disagree on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderOptions {
    /// Only render links that carry an explicit `url`.
    ///
    /// When unset, a link annotation without a url points at the text it
    /// covers (auto-detected URLs arrive this way). When set, such an
    /// annotation renders as plain text.
    pub prefer_explicit_url: bool,
}

impl RenderOptions {
    pub fn prefer_explicit_url(mut self, prefer: bool) -> Self {
        self.prefer_explicit_url = prefer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_covered_text() {
        assert!(!RenderOptions::default().prefer_explicit_url);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: RenderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, RenderOptions::default());

        let options: RenderOptions =
            serde_json::from_str(r#"{"prefer-explicit-url": true}"#).unwrap();
        assert!(options.prefer_explicit_url);
    }
}
