//! Common test utilities and harness for triage workflow integration tests.

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;
use triage_core::Issue;
use triage_core::llm::MockLlmProvider;
use triage_github::StaticIssueSource;
use triage_workflows::{TriagePaths, TriageSettings, TriageWorkflow};

pub const REPO: &str = "voideditor/void";

/// Test harness for integration tests.
///
/// Owns a temporary working directory for the cache, stamp and wiki files,
/// a mock LLM and a static issue source.
pub struct TestHarness {
    /// Working directory; files live under it
    pub dir: TempDir,
    /// Mock LLM provider
    pub llm: Arc<MockLlmProvider>,
    /// Static issue source
    pub issues: Arc<StaticIssueSource>,
}

impl TestHarness {
    /// Harness with one LLM answer and one issue list for every query.
    pub fn new(answer: &str, issues: Vec<Issue>) -> Self {
        Self::with_sources(
            Arc::new(MockLlmProvider::with_response(answer)),
            Arc::new(StaticIssueSource::new(issues)),
        )
    }

    /// Harness with custom mocks.
    pub fn with_sources(llm: Arc<MockLlmProvider>, issues: Arc<StaticIssueSource>) -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            llm,
            issues,
        }
    }

    /// File locations under the temporary directory.
    pub fn paths(&self) -> TriagePaths {
        TriagePaths::default().under(self.dir.path())
    }

    /// Workflow wired to the harness.
    pub fn workflow(&self) -> TriageWorkflow {
        TriageWorkflow::new(
            self.llm.clone(),
            self.issues.clone(),
            TriageSettings::new(REPO).with_paths(self.paths()),
        )
    }

    /// Writes `content` to a path relative to the working directory.
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Reads a file relative to the working directory.
    pub fn read(&self, relative: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.dir.path().join(relative)).unwrap()
    }
}

/// Issue with a canonical URL.
pub fn issue(number: u64, title: &str) -> Issue {
    Issue::new(
        number,
        title,
        format!("https://github.com/{REPO}/issues/{number}"),
    )
}

/// Model answer placing issues under default themes.
pub fn answer(sections: &[(&str, &[u64])]) -> String {
    let mut md = String::new();
    for (theme, numbers) in sections {
        md.push_str(&format!("## {theme}\n"));
        for n in *numbers {
            md.push_str(&format!(
                "- [#{n}](https://github.com/{REPO}/issues/{n}) – title\n"
            ));
        }
        md.push('\n');
    }
    md
}

pub const LLM_THEME: &str = "🔗 LLM Integration & Provider Support";
pub const UX_THEME: &str = "🧩 Editor UX & Interaction Design";
pub const AGENT_THEME: &str = "🤖 Agent & Automation Features";
