//! Prompt construction and parsing of the model's classification.
//!
//! The model is asked to answer in markdown, one `##` heading per theme
//! followed by bullet links to the issues in that theme:
//!
//! ```markdown
//! ## 🎯 Prompt, Token, and Cost Management
//! - [#123](https://github.com/org/repo/issues/123) – Title here
//! ```
//!
//! Parsing is line based and forgiving. Lines that do not fit the format
//! are ignored rather than failing the run.

use std::collections::BTreeMap;

use crate::theme::ThemeSet;
use crate::types::{Issue, IssueNumber};

/// Builds the classification prompt for a batch of issues.
///
/// # Examples
///
/// ```
/// use triage_core::classify::build_prompt;
/// use triage_core::{Issue, ThemeSet};
///
/// let issues = vec![Issue::new(1, "Crash on start", "https://github.com/o/r/issues/1")];
/// let prompt = build_prompt(&ThemeSet::default(), &issues);
/// assert!(prompt.contains("exactly 7 predefined themes"));
/// assert!(prompt.contains("- Crash on start (https://github.com/o/r/issues/1)"));
/// ```
pub fn build_prompt(themes: &ThemeSet, issues: &[Issue]) -> String {
    let issue_lines = issues
        .iter()
        .map(|i| format!("- {} ({})", i.title, i.html_url))
        .collect::<Vec<_>>()
        .join("\n");

    let example_theme = themes.iter().nth(2).or_else(|| themes.iter().next()).unwrap_or("");

    format!(
        "You are an AI assistant helping triage GitHub issues into exactly {count} predefined themes.\n\
         \n\
         Each issue must go into exactly one of the themes below:\n\
         \n\
         {themes}\n\
         \n\
         Format your output in Markdown like:\n\
         ## {example_theme}\n\
         - [#123](https://github.com/org/repo/issues/123) – Title here\n\
         \n\
         Classify these issues:\n\
         {issue_lines}\n",
        count = themes.len(),
        themes = themes.to_markdown_list(),
    )
}

/// Parses the model's markdown answer into an issue → theme map.
///
/// - `##` lines switch the current theme (resolved through `themes`).
/// - `- [#N]...` lines assign issue `N` to the current theme.
/// - Bullets before any heading or under an unknown heading are dropped.
/// - Bullets whose number does not parse are dropped.
/// - A later assignment of the same issue wins.
pub fn parse_classification(markdown: &str, themes: &ThemeSet) -> BTreeMap<IssueNumber, String> {
    let mut map = BTreeMap::new();
    let mut current: Option<&str> = None;

    for line in markdown.lines() {
        if line.starts_with("##") {
            let heading = line.trim_start_matches(['#', ' ']).trim();
            current = themes.resolve(heading);
            if current.is_none() {
                tracing::debug!(heading = %heading, "Ignoring unknown theme heading");
            }
        } else if line.trim_start().starts_with("- [#") {
            let Some(number) = bullet_number(line) else {
                tracing::debug!(line = %line, "Skipping malformed issue line");
                continue;
            };
            match current {
                Some(theme) => {
                    map.insert(number, theme.to_string());
                }
                None => {
                    tracing::debug!(issue = %number, "Issue listed outside a known theme");
                }
            }
        }
    }

    map
}

/// Extracts `N` from a `- [#N](...)` bullet.
fn bullet_number(line: &str) -> Option<IssueNumber> {
    let (_, rest) = line.split_once("[#")?;
    let (digits, _) = rest.split_once(']')?;
    digits.trim().parse().ok()
}
