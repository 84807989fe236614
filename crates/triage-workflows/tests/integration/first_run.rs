//! Integration tests for runs without prior state.

use std::sync::Arc;

use triage_core::llm::MockLlmProvider;
use triage_core::{ClassificationCache, IssueNumber};
use triage_github::StaticIssueSource;
use triage_workflows::TriageOutcome;

use crate::common::{AGENT_THEME, LLM_THEME, TestHarness, UX_THEME, answer, issue};

#[tokio::test]
async fn test_first_run_classifies_and_writes_everything() {
    let harness = TestHarness::new(
        &answer(&[(LLM_THEME, &[12, 3]), (UX_THEME, &[7])]),
        vec![issue(3, "Ollama"), issue(7, "Tabs"), issue(12, "Gemini")],
    );

    let outcome = harness
        .workflow()
        .run()
        .await
        .expect("Workflow should complete successfully");

    let TriageOutcome::Updated(report) = outcome else {
        unreachable!("Expected an updated outcome");
    };
    assert_eq!(report.submitted, 3);
    assert_eq!(report.classified, 3);
    assert!(report.removed.is_empty());
    assert_eq!(report.open, 3);

    let expected = "\
## 🔗 LLM Integration & Provider Support
- [#3](https://github.com/voideditor/void/issues/3) – Ollama
- [#12](https://github.com/voideditor/void/issues/12) – Gemini

## 🧩 Editor UX & Interaction Design
- [#7](https://github.com/voideditor/void/issues/7) – Tabs

";
    assert_eq!(report.wiki_markdown, expected);
    assert_eq!(harness.read("wiki/Issue-Categories.md"), expected);

    let cache = ClassificationCache::load(&harness.paths().cache_file).unwrap();
    assert_eq!(cache.get(IssueNumber::new(12)), Some(LLM_THEME));
    assert_eq!(cache.get(IssueNumber::new(7)), Some(UX_THEME));

    let stamp = harness.read(".github/last_triage.txt");
    assert!(stamp.ends_with('Z'));
    assert_ne!(stamp, "1970-01-01T00:00:00Z");
}

#[tokio::test]
async fn test_first_run_queries_since_epoch_then_full_listing() {
    let harness = TestHarness::new(&answer(&[(AGENT_THEME, &[1])]), vec![issue(1, "Agent")]);

    harness.workflow().run().await.unwrap();

    assert_eq!(
        harness.issues.queries(),
        vec![Some("1970-01-01T00:00:00Z".to_string()), None]
    );
    assert_eq!(harness.llm.call_count(), 1);
}

#[tokio::test]
async fn test_nothing_changed_without_cache_fetches_all() {
    let issues = Arc::new(StaticIssueSource::with_changed(
        Vec::new(),
        vec![issue(5, "Old but unclassified")],
    ));
    let llm = Arc::new(MockLlmProvider::with_response(answer(&[(AGENT_THEME, &[5])])));
    let harness = TestHarness::with_sources(llm, issues);

    let outcome = harness.workflow().run().await.unwrap();

    let TriageOutcome::Updated(report) = outcome else {
        unreachable!("Expected an updated outcome");
    };
    assert_eq!(report.submitted, 1);
    assert!(report.wiki_markdown.contains("- [#5]"));
    // since query, fallback full listing, pruning listing
    assert_eq!(harness.issues.queries().len(), 3);
}

#[tokio::test]
async fn test_empty_repository_skips_model() {
    let harness = TestHarness::new("unused", Vec::new());

    let outcome = harness.workflow().run().await.unwrap();

    let TriageOutcome::Updated(report) = outcome else {
        unreachable!("Expected an updated outcome");
    };
    assert_eq!(report.submitted, 0);
    assert!(report.wiki_markdown.is_empty());
    assert_eq!(harness.llm.call_count(), 0);
    assert_eq!(harness.read(".github/triage_cache.json"), "{}");
}
