//! Issue identifiers and the issue record used by the pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// GitHub issue number.
///
/// Serialized transparently as an integer, which makes it usable as a JSON
/// object key (serde_json writes it as a decimal string).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates an issue number.
    ///
    /// # Examples
    ///
    /// ```
    /// use triage_core::IssueNumber;
    ///
    /// let n = IssueNumber::new(42);
    /// assert_eq!(n.get(), 42);
    /// ```
    pub fn new(number: u64) -> Self {
        Self(number)
    }

    /// Returns the raw number.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for IssueNumber {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl std::str::FromStr for IssueNumber {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// An open GitHub issue (never a pull request).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: IssueNumber,
    /// Issue title
    pub title: String,
    /// Browser URL of the issue
    pub html_url: String,
}

impl Issue {
    /// Creates an issue record.
    pub fn new(number: u64, title: impl Into<String>, html_url: impl Into<String>) -> Self {
        Self {
            number: IssueNumber::new(number),
            title: title.into(),
            html_url: html_url.into(),
        }
    }
}
