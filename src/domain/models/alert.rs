//! Alert domain model.
//!
//! An alert is a GitHub code-scanning or secret-scanning finding.
//! Alerts are read-only to the reconciler except for their open/fixed state.

use serde::{Deserialize, Serialize};

/// Kind of GitHub security alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    CodeScanning,
    SecretScanning,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CodeScanning => "code-scanning",
            Self::SecretScanning => "secret-scanning",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "code-scanning" => Some(Self::CodeScanning),
            "secret-scanning" => Some(Self::SecretScanning),
            _ => None,
        }
    }

    /// Prefix used when building the tracker issue title.
    pub fn title_prefix(&self) -> &'static str {
        match self {
            Self::CodeScanning => "[Code Scanning Alert]:",
            Self::SecretScanning => "[Secret Scanning Alert]:",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A security alert as observed on GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Repository this alert belongs to, `"org/repo"`.
    pub repo_id: String,
    /// GitHub's alert number within the repository.
    pub number: u64,
    pub kind: AlertKind,
    /// `true` = open/unresolved, `false` = fixed/resolved.
    pub open: bool,
    pub short_desc: String,
    pub long_desc: String,
    pub hyperlink: String,
}

impl Alert {
    /// Stable unique key for this alert, unique per (repo, kind, number).
    ///
    /// Embedded in issue descriptions; this is the only link between an
    /// issue and its alert, so the format must never change across runs.
    pub fn alert_key(&self) -> String {
        make_key(&format!(
            "{}/{}/{}",
            self.repo_id,
            self.kind.as_str(),
            self.number
        ))
    }
}

/// Normalize an arbitrary string into a lowercase key safe to embed in
/// issue descriptions and attachment names.
pub fn make_key(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Key under which a repository's issues are grouped in the tracker.
pub fn repo_key(repo_id: &str) -> String {
    make_key(repo_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(kind: AlertKind, number: u64) -> Alert {
        Alert {
            repo_id: "octo/widgets".to_string(),
            number,
            kind,
            open: true,
            short_desc: "sql injection".to_string(),
            long_desc: "tainted data reaches a query".to_string(),
            hyperlink: "https://example.invalid/alert/1".to_string(),
        }
    }

    #[test]
    fn alert_key_is_stable_and_unique() {
        let a = alert(AlertKind::CodeScanning, 7);
        assert_eq!(a.alert_key(), "octo-widgets-code-scanning-7");
        assert_eq!(a.alert_key(), a.alert_key());

        let b = alert(AlertKind::SecretScanning, 7);
        assert_ne!(a.alert_key(), b.alert_key());

        let c = alert(AlertKind::CodeScanning, 8);
        assert_ne!(a.alert_key(), c.alert_key());
    }

    #[test]
    fn make_key_normalizes() {
        assert_eq!(make_key("Octo/Widgets"), "octo-widgets");
        assert_eq!(make_key("a_b c"), "a-b-c");
    }
}
