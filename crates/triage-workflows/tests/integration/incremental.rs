//! Integration tests for runs on top of existing cache, stamp and wiki.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use triage_core::llm::MockLlmProvider;
use triage_core::{ClassificationCache, Error, Issue, IssueNumber, Result};
use triage_github::{IssueSource, StaticIssueSource};
use triage_workflows::{TriageOutcome, TriageSettings, TriageWorkflow};

use crate::common::{AGENT_THEME, LLM_THEME, REPO, TestHarness, UX_THEME, answer, issue};

const OLD_STAMP: &str = "2024-05-01T12:00:00Z";

fn seed(harness: &TestHarness) {
    harness.write(
        ".github/triage_cache.json",
        &format!("{{\n  \"1\": \"{LLM_THEME}\",\n  \"2\": \"{UX_THEME}\"\n}}"),
    );
    harness.write(".github/last_triage.txt", OLD_STAMP);
    harness.write("wiki/Issue-Categories.md", "old wiki\n");
}

#[tokio::test]
async fn test_unchanged_refreshes_stamp_only() {
    let harness = TestHarness::with_sources(
        Arc::new(MockLlmProvider::with_response("unused")),
        Arc::new(StaticIssueSource::with_changed(Vec::new(), vec![issue(1, "One")])),
    );
    seed(&harness);

    let outcome = harness.workflow().run().await.unwrap();

    let TriageOutcome::Unchanged { since } = outcome else {
        unreachable!("Expected an unchanged outcome");
    };
    assert_eq!(since.to_iso(), OLD_STAMP);
    assert_eq!(harness.llm.call_count(), 0);
    assert_eq!(harness.issues.queries(), vec![Some(OLD_STAMP.to_string())]);
    assert_eq!(harness.read("wiki/Issue-Categories.md"), "old wiki\n");
    assert_ne!(harness.read(".github/last_triage.txt"), OLD_STAMP);
}

#[tokio::test]
async fn test_missing_wiki_forces_rebuild() {
    let harness = TestHarness::with_sources(
        Arc::new(MockLlmProvider::with_response(answer(&[(LLM_THEME, &[1])]))),
        Arc::new(StaticIssueSource::with_changed(
            Vec::new(),
            vec![issue(1, "One"), issue(2, "Two")],
        )),
    );
    seed(&harness);
    std::fs::remove_file(harness.paths().wiki_file).unwrap();

    let outcome = harness.workflow().run().await.unwrap();

    assert!(matches!(outcome, TriageOutcome::Updated(_)));
    let wiki = harness.read("wiki/Issue-Categories.md");
    assert!(wiki.contains("- [#1](https://github.com/voideditor/void/issues/1) – One"));
    assert!(wiki.contains("- [#2](https://github.com/voideditor/void/issues/2) – Two"));
}

#[tokio::test]
async fn test_incremental_merge_and_stale_cleanup() {
    let harness = TestHarness::with_sources(
        Arc::new(MockLlmProvider::with_response(answer(&[(AGENT_THEME, &[3])]))),
        Arc::new(StaticIssueSource::with_changed(
            vec![issue(3, "Three")],
            vec![issue(1, "One"), issue(3, "Three")],
        )),
    );
    seed(&harness);

    let outcome = harness.workflow().run().await.unwrap();

    let TriageOutcome::Updated(report) = outcome else {
        unreachable!("Expected an updated outcome");
    };
    assert_eq!(report.removed, vec![IssueNumber::new(2)]);
    assert_eq!(report.open, 2);

    let cache = ClassificationCache::load(&harness.paths().cache_file).unwrap();
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(IssueNumber::new(1)), Some(LLM_THEME));
    assert_eq!(cache.get(IssueNumber::new(3)), Some(AGENT_THEME));
    assert_eq!(cache.get(IssueNumber::new(2)), None);

    let prompt = &harness.llm.requests()[0].messages[0].content;
    assert!(prompt.contains("- Three (https://github.com/voideditor/void/issues/3)"));
    assert!(!prompt.contains("- One ("));

    let wiki = harness.read("wiki/Issue-Categories.md");
    let llm_at = wiki.find(LLM_THEME).unwrap();
    let agent_at = wiki.find(AGENT_THEME).unwrap();
    assert!(llm_at < agent_at, "themes keep their configured order");
    assert!(!wiki.contains(UX_THEME));
}

#[tokio::test]
async fn test_reclassification_overrides_cache() {
    let harness = TestHarness::with_sources(
        Arc::new(MockLlmProvider::with_response(answer(&[(AGENT_THEME, &[1])]))),
        Arc::new(StaticIssueSource::with_changed(
            vec![issue(1, "One, edited")],
            vec![issue(1, "One, edited"), issue(2, "Two")],
        )),
    );
    seed(&harness);

    harness.workflow().run().await.unwrap();

    let cache = ClassificationCache::load(&harness.paths().cache_file).unwrap();
    assert_eq!(cache.get(IssueNumber::new(1)), Some(AGENT_THEME));
    assert_eq!(cache.get(IssueNumber::new(2)), Some(UX_THEME));
    assert!(harness.read("wiki/Issue-Categories.md").contains("One, edited"));
}

#[tokio::test]
async fn test_malformed_answer_lines_are_ignored() {
    let md = format!(
        "Here you go:\n## {AGENT_THEME}\n- [#3](u) – fine\n- [#oops](u) – broken\n## Not a theme\n- [#1](u) – lost\n"
    );
    let harness = TestHarness::with_sources(
        Arc::new(MockLlmProvider::with_response(md)),
        Arc::new(StaticIssueSource::with_changed(
            vec![issue(1, "One"), issue(3, "Three")],
            vec![issue(1, "One"), issue(2, "Two"), issue(3, "Three")],
        )),
    );
    seed(&harness);

    let outcome = harness.workflow().run().await.unwrap();

    let TriageOutcome::Updated(report) = outcome else {
        unreachable!("Expected an updated outcome");
    };
    assert_eq!(report.submitted, 2);
    assert_eq!(report.classified, 1);

    let cache = ClassificationCache::load(&harness.paths().cache_file).unwrap();
    // #1 keeps its earlier theme
    assert_eq!(cache.get(IssueNumber::new(1)), Some(LLM_THEME));
    assert_eq!(cache.get(IssueNumber::new(3)), Some(AGENT_THEME));
}

#[tokio::test]
async fn test_llm_failure_leaves_state_untouched() {
    let harness = TestHarness::with_sources(
        Arc::new(MockLlmProvider::new(Vec::new())),
        Arc::new(StaticIssueSource::new(vec![issue(1, "One")])),
    );
    seed(&harness);
    let cache_before = harness.read(".github/triage_cache.json");

    let result = harness.workflow().run().await;

    assert!(result.is_err());
    assert_eq!(harness.read(".github/triage_cache.json"), cache_before);
    assert_eq!(harness.read(".github/last_triage.txt"), OLD_STAMP);
    assert_eq!(harness.read("wiki/Issue-Categories.md"), "old wiki\n");
}

#[tokio::test]
async fn test_stdout_mode_does_not_touch_wiki() {
    let harness = TestHarness::new(&answer(&[(LLM_THEME, &[1])]), vec![issue(1, "One")]);
    let workflow = TriageWorkflow::new(
        harness.llm.clone(),
        harness.issues.clone(),
        TriageSettings::new(REPO)
            .with_paths(harness.paths())
            .with_write_wiki(false),
    );

    let outcome = workflow.run().await.unwrap();

    let TriageOutcome::Updated(report) = outcome else {
        unreachable!("Expected an updated outcome");
    };
    assert!(report.wiki_markdown.starts_with("## 🔗"));
    assert!(!harness.paths().wiki_file.exists());
}

#[tokio::test]
async fn test_stdout_mode_without_wiki_stays_incremental() {
    let harness = TestHarness::with_sources(
        Arc::new(MockLlmProvider::with_response("unused")),
        Arc::new(StaticIssueSource::with_changed(Vec::new(), vec![issue(1, "One")])),
    );
    seed(&harness);
    std::fs::remove_file(harness.paths().wiki_file).unwrap();
    let workflow = TriageWorkflow::new(
        harness.llm.clone(),
        harness.issues.clone(),
        TriageSettings::new(REPO)
            .with_paths(harness.paths())
            .with_write_wiki(false),
    );

    let outcome = workflow.run().await.unwrap();

    assert!(matches!(outcome, TriageOutcome::Unchanged { .. }));
    assert_eq!(harness.llm.call_count(), 0);
    assert_eq!(harness.issues.queries(), vec![Some(OLD_STAMP.to_string())]);
}

/// Static source whose first full listing fails.
struct FlakyListing {
    inner: StaticIssueSource,
    failed: AtomicBool,
}

#[async_trait]
impl IssueSource for FlakyListing {
    async fn open_issues(&self, since: Option<&str>) -> Result<Vec<Issue>> {
        if since.is_none() && !self.failed.swap(true, Ordering::SeqCst) {
            return Err(Error::github("connection reset"));
        }
        self.inner.open_issues(since).await
    }
}

#[tokio::test]
async fn test_failed_listing_keeps_stamp_for_retry() {
    let harness = TestHarness::new("unused", Vec::new());
    seed(&harness);
    let source = Arc::new(FlakyListing {
        inner: StaticIssueSource::with_changed(
            vec![issue(3, "Three")],
            vec![issue(1, "One"), issue(2, "Two"), issue(3, "Three")],
        ),
        failed: AtomicBool::new(false),
    });
    let answer = answer(&[(AGENT_THEME, &[3])]);
    let llm = Arc::new(MockLlmProvider::new(vec![answer.clone(), answer]));
    let workflow = TriageWorkflow::new(
        llm.clone(),
        source,
        TriageSettings::new(REPO).with_paths(harness.paths()),
    );

    let err = workflow.run().await.unwrap_err();
    assert!(err.to_string().contains("connection reset"));
    assert_eq!(harness.read(".github/last_triage.txt"), OLD_STAMP);
    assert_eq!(harness.read("wiki/Issue-Categories.md"), "old wiki\n");

    let outcome = workflow.run().await.unwrap();

    assert!(matches!(outcome, TriageOutcome::Updated(_)));
    assert_eq!(llm.call_count(), 2);
    assert!(harness.read("wiki/Issue-Categories.md").contains("Three"));
    assert_ne!(harness.read(".github/last_triage.txt"), OLD_STAMP);
}
