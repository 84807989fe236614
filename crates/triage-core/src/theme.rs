//! The ordered set of triage themes.
//!
//! Every issue is classified into exactly one theme. The order of the set is
//! the order in which themes are listed in the prompt and rendered in the
//! wiki page.
//!
//! Models do not always echo a heading byte-for-byte (emoji variation
//! selectors get dropped, case drifts), so [`ThemeSet::resolve`] falls back
//! to a loose comparison on the alphanumeric part of the label.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The default theme labels, in display order.
pub const DEFAULT_THEMES: [&str; 7] = [
    "🔗 LLM Integration & Provider Support",
    "🖥 App Build & Platform Compatibility",
    "🎯 Prompt, Token, and Cost Management",
    "🧩 Editor UX & Interaction Design",
    "🤖 Agent & Automation Features",
    "⚙️ System Config & Environment Setup",
    "🗃 Meta: Feature Comparison, Structure, and Naming",
];

/// Ordered, duplicate-free list of theme labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ThemeSet {
    labels: Vec<String>,
}

impl ThemeSet {
    /// Creates a theme set from labels, preserving their order.
    ///
    /// Fails on an empty list, a blank label, or two labels that resolve to
    /// the same loose key.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|l| l.into().trim().to_string())
            .collect();

        if labels.is_empty() {
            return Err(Error::validation_field("themes", "must not be empty"));
        }

        let mut seen = std::collections::HashSet::new();
        for label in &labels {
            let key = loose_key(label);
            if key.is_empty() {
                return Err(Error::validation_field(
                    "themes",
                    format!("label '{label}' has no letters or digits"),
                ));
            }
            if !seen.insert(key) {
                return Err(Error::validation_field(
                    "themes",
                    format!("duplicate theme '{label}'"),
                ));
            }
        }

        Ok(Self { labels })
    }

    /// Number of themes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates labels in display order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Returns true if `label` is exactly one of the themes.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Maps a heading produced by the model to its canonical label.
    ///
    /// # Examples
    ///
    /// ```
    /// use triage_core::ThemeSet;
    ///
    /// let themes = ThemeSet::default();
    /// assert_eq!(
    ///     themes.resolve("agent & automation features"),
    ///     Some("🤖 Agent & Automation Features")
    /// );
    /// assert_eq!(themes.resolve("Something else"), None);
    /// ```
    pub fn resolve(&self, heading: &str) -> Option<&str> {
        let heading = heading.trim();
        if let Some(exact) = self.labels.iter().find(|l| l.as_str() == heading) {
            return Some(exact);
        }

        let key = loose_key(heading);
        if key.is_empty() {
            return None;
        }
        self.labels
            .iter()
            .find(|l| loose_key(l) == key)
            .map(String::as_str)
    }

    /// Numbered markdown list of the themes, as embedded in the prompt.
    pub fn to_markdown_list(&self) -> String {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| format!("{}. {label}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self {
            labels: DEFAULT_THEMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for ThemeSet {
    type Error = Error;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        Self::new(labels)
    }
}

impl From<ThemeSet> for Vec<String> {
    fn from(set: ThemeSet) -> Self {
        set.labels
    }
}

/// Lowercased words of the label, with emoji and punctuation removed.
fn loose_key(label: &str) -> String {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_seven_themes_in_order() {
        let themes = ThemeSet::default();
        assert_eq!(themes.len(), 7);
        assert_eq!(themes.iter().next(), Some("🔗 LLM Integration & Provider Support"));
        assert_eq!(
            themes.iter().last(),
            Some("🗃 Meta: Feature Comparison, Structure, and Naming")
        );
    }

    #[test]
    fn test_resolve_exact() {
        let themes = ThemeSet::default();
        assert_eq!(
            themes.resolve("🧩 Editor UX & Interaction Design"),
            Some("🧩 Editor UX & Interaction Design")
        );
    }

    #[test]
    fn test_resolve_without_variation_selector() {
        let themes = ThemeSet::default();
        // U+2699 without the U+FE0F variation selector
        assert_eq!(
            themes.resolve("\u{2699} System Config & Environment Setup"),
            Some("⚙️ System Config & Environment Setup")
        );
    }

    #[test]
    fn test_resolve_unknown_heading() {
        let themes = ThemeSet::default();
        assert_eq!(themes.resolve("Uncategorized"), None);
        assert_eq!(themes.resolve("🚀"), None);
        assert_eq!(themes.resolve(""), None);
    }

    #[test]
    fn test_new_rejects_empty() {
        let err = ThemeSet::new(Vec::<String>::new()).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_new_rejects_loose_duplicates() {
        let err = ThemeSet::new(["🐛 Bugs", "bugs"]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_new_rejects_symbol_only_label() {
        assert!(ThemeSet::new(["🐛"]).is_err());
    }

    #[test]
    fn test_markdown_list() {
        let themes = ThemeSet::new(["A", "B"]).unwrap();
        assert_eq!(themes.to_markdown_list(), "1. A\n2. B");
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let json = r#"["🐛 Bugs", "📚 Docs"]"#;
        let themes: ThemeSet = serde_json::from_str(json).unwrap();
        assert!(themes.contains("📚 Docs"));
        assert!(serde_json::from_str::<ThemeSet>("[]").is_err());
    }
}
