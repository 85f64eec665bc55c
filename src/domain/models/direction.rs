//! Trust direction between GitHub and the tracker.

use serde::{Deserialize, Serialize};

/// Which system wins when alert and issue state disagree.
///
/// `Both` is the interesting mode: the authority is decided per alert and
/// per pass, by comparing the live alert state against the state persisted
/// after the previous pass (see [`Authority`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncDirection {
    /// Alert states always win over issue states.
    Gh2tracker,
    /// Issue states win over alert states where legal.
    Tracker2gh,
    /// Per-alert decision based on the persisted state.
    #[default]
    Both,
}

impl SyncDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gh2tracker => "gh2tracker",
            Self::Tracker2gh => "tracker2gh",
            Self::Both => "both",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "gh2tracker" => Some(Self::Gh2tracker),
            "tracker2gh" => Some(Self::Tracker2gh),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

impl std::fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authoritative side for one alert on one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    /// GitHub is the source of truth: push the alert state onto the issue.
    GitHub,
    /// The tracker is the source of truth: push the issue state onto the
    /// alert.
    Tracker,
}
