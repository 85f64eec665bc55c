//! Metadata codec for the alert-linking block embedded in issue descriptions.
//!
//! The tracker offers no structured field to relate an issue to an alert, so
//! the relation lives in a fixed-format trailer appended to the free-text
//! description. Encoding and decoding must stay in lockstep: the trailer is
//! the only link between an issue and its alert.

use thiserror::Error;

use crate::domain::models::alert::{repo_key, AlertKind};
use crate::domain::models::Alert;

const MARKER: &str = "DO NOT MODIFY DESCRIPTION BELOW LINE.";

const DESC_TEMPLATE: &str = "\
{long_desc}

{alert_url}

----
This issue was automatically generated from a GitHub alert, and will be \
automatically resolved once the underlying problem is fixed.
DO NOT MODIFY DESCRIPTION BELOW LINE.
REPOSITORY_NAME={repo_id}
ALERT_TYPE={alert_type}
ALERT_NUMBER={alert_num}
REPOSITORY_KEY={repo_key}
ALERT_KEY={alert_key}
";

/// Decoded metadata block of a managed issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertInfo {
    pub repo_id: String,
    /// `None` when the issue was created before alert types were recorded.
    pub alert_type: Option<AlertKind>,
    pub alert_num: u64,
    pub repo_key: String,
    pub alert_key: String,
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("ALERT_NUMBER is not an integer: {0:?}")]
    BadAlertNumber(String),
}

/// Render the full issue description for an alert, trailer included.
pub fn render_description(alert: &Alert) -> String {
    DESC_TEMPLATE
        .replace("{long_desc}", &alert.long_desc)
        .replace("{alert_url}", &alert.hyperlink)
        .replace("{repo_id}", &alert.repo_id)
        .replace("{alert_type}", alert.kind.as_str())
        .replace("{alert_num}", &alert.number.to_string())
        .replace("{repo_key}", &repo_key(&alert.repo_id))
        .replace("{alert_key}", &alert.alert_key())
}

/// Extract the metadata block from an issue description.
///
/// Returns `Ok(None)` when any mandatory field is missing (the issue is
/// unmanaged and must be left alone). `ALERT_TYPE` alone is optional.
/// A non-numeric `ALERT_NUMBER` is a hard error: the issue claims to be
/// managed but its block is corrupt, and guessing would risk touching an
/// issue we cannot match to an alert.
pub fn parse_alert_info(description: &str) -> Result<Option<AlertInfo>, MetadataError> {
    let Some(repo_id) = field(description, "REPOSITORY_NAME=") else {
        return Ok(None);
    };
    let alert_type = field(description, "ALERT_TYPE=").and_then(|v| AlertKind::from_str(&v));
    let Some(alert_num) = field(description, "ALERT_NUMBER=") else {
        return Ok(None);
    };
    let alert_num = alert_num
        .parse::<u64>()
        .map_err(|_| MetadataError::BadAlertNumber(alert_num))?;
    let Some(repo_key) = field(description, "REPOSITORY_KEY=") else {
        return Ok(None);
    };
    let Some(alert_key) = field(description, "ALERT_KEY=") else {
        return Ok(None);
    };

    Ok(Some(AlertInfo {
        repo_id,
        alert_type,
        alert_num,
        repo_key,
        alert_key,
    }))
}

/// Whether the description carries the codec's marker line.
pub fn has_marker(description: &str) -> bool {
    description.lines().any(|l| l.trim_end() == MARKER)
}

/// Line-anchored lookup of `PREFIX=value`.
fn field(description: &str, prefix: &str) -> Option<String> {
    description
        .lines()
        .find_map(|line| line.strip_prefix(prefix))
        .map(|v| v.trim_end().to_string())
}
