//! Wiki page rendering.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::cache::ClassificationCache;
use crate::theme::ThemeSet;
use crate::types::{Issue, IssueNumber};

/// Title shown for cached issues absent from the title map.
pub const MISSING_TITLE: &str = "(missing)";

/// Renders the issue-categories wiki page.
///
/// Themes appear in `themes` order; themes without issues are omitted, and
/// so are cache entries whose label is not part of `themes`. Issues within a
/// theme are listed by ascending number. Each section ends with a blank line.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use triage_core::render::render_wiki;
/// use triage_core::{ClassificationCache, IssueNumber, ThemeSet};
///
/// let themes = ThemeSet::new(["Bugs"]).unwrap();
/// let mut cache = ClassificationCache::new();
/// cache.merge(BTreeMap::from([(IssueNumber::new(3), "Bugs".to_string())]));
///
/// let page = render_wiki(&themes, &cache, &BTreeMap::new(), "o/r");
/// assert_eq!(page, "## Bugs\n- [#3](https://github.com/o/r/issues/3) – (missing)\n\n");
/// ```
pub fn render_wiki(
    themes: &ThemeSet,
    cache: &ClassificationCache,
    titles: &BTreeMap<IssueNumber, Issue>,
    repo: &str,
) -> String {
    let mut sections: BTreeMap<&str, Vec<IssueNumber>> = BTreeMap::new();
    for (number, theme) in cache.iter() {
        if themes.contains(theme) {
            sections.entry(theme).or_default().push(number);
        } else {
            tracing::debug!(issue = %number, theme = %theme, "Cached theme not in theme set");
        }
    }

    let mut out = String::new();
    for theme in themes.iter() {
        let Some(numbers) = sections.get_mut(theme) else {
            continue;
        };
        numbers.sort();

        let _ = writeln!(out, "## {theme}");
        for number in numbers.iter() {
            match titles.get(number) {
                Some(issue) => {
                    let _ = writeln!(out, "- [#{number}]({}) – {}", issue.html_url, issue.title);
                }
                None => {
                    let _ = writeln!(
                        out,
                        "- [#{number}](https://github.com/{repo}/issues/{number}) – {MISSING_TITLE}"
                    );
                }
            }
        }
        out.push('\n');
    }
    out
}
