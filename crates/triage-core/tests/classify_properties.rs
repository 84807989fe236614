//! Property-based tests for classification parsing and rendering.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeMap;

use proptest::prelude::*;
use triage_core::classify::parse_classification;
use triage_core::render::render_wiki;
use triage_core::{ClassificationCache, Issue, IssueNumber, ThemeSet};

fn theme_index() -> impl Strategy<Value = usize> {
    0usize..7
}

proptest! {
    #[test]
    fn test_parse_never_panics(input in "\\PC*") {
        let _ = parse_classification(&input, &ThemeSet::default());
    }

    #[test]
    fn test_parsed_numbers_appear_in_input(input in "(## [A-Za-z ]{0,12}\n|## Agent & Automation Features\n|- \\[#[1-9][0-9]{0,3}\\]\\(u\\) t\n|[a-z ]{0,10}\n){0,20}") {
        let map = parse_classification(&input, &ThemeSet::default());
        for number in map.keys() {
            let needle = format!("[#{number}]");
            prop_assert!(input.contains(&needle));
        }
    }

    #[test]
    fn test_well_formed_answer_roundtrips(assignments in prop::collection::btree_map(1u64..5000, theme_index(), 0..40)) {
        let themes = ThemeSet::default();
        let labels: Vec<&str> = themes.iter().collect();

        let mut md = String::new();
        for (i, label) in labels.iter().enumerate() {
            md.push_str(&format!("## {label}\n"));
            for (n, t) in &assignments {
                if *t == i {
                    md.push_str(&format!("- [#{n}](https://github.com/o/r/issues/{n}) – t{n}\n"));
                }
            }
            md.push('\n');
        }

        let parsed = parse_classification(&md, &themes);
        let expected: BTreeMap<IssueNumber, String> = assignments
            .iter()
            .map(|(n, t)| (IssueNumber::new(*n), labels[*t].to_string()))
            .collect();
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn test_rendered_wiki_parses_back(assignments in prop::collection::btree_map(1u64..5000, theme_index(), 0..40)) {
        let themes = ThemeSet::default();
        let labels: Vec<&str> = themes.iter().collect();

        let mut cache = ClassificationCache::new();
        cache.merge(
            assignments
                .iter()
                .map(|(n, t)| (IssueNumber::new(*n), labels[*t].to_string()))
                .collect(),
        );
        let titles: BTreeMap<IssueNumber, Issue> = assignments
            .keys()
            .map(|n| (IssueNumber::new(*n), Issue::new(*n, format!("Issue {n}"), format!("https://h/{n}"))))
            .collect();

        let page = render_wiki(&themes, &cache, &titles, "o/r");
        let parsed = parse_classification(&page, &themes);
        prop_assert_eq!(parsed.len(), cache.len());
        for (n, label) in cache.iter() {
            prop_assert_eq!(parsed.get(&n).map(String::as_str), Some(label));
        }
    }
}
