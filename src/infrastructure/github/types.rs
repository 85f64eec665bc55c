//! Wire types for the GitHub code-scanning and secret-scanning APIs.

use serde::Deserialize;

use crate::domain::models::{Alert, AlertKind};

#[derive(Debug, Deserialize)]
pub struct CodeScanningAlert {
    pub number: u64,
    pub state: String,
    pub html_url: String,
    pub rule: CodeScanningRule,
    #[serde(default)]
    pub most_recent_instance: Option<AlertInstance>,
}

#[derive(Debug, Deserialize)]
pub struct CodeScanningRule {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AlertInstance {
    #[serde(default)]
    pub message: Option<InstanceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct InstanceMessage {
    #[serde(default)]
    pub text: Option<String>,
}

impl CodeScanningAlert {
    pub fn into_alert(self, repo_id: &str) -> Alert {
        let short_desc = self
            .rule
            .description
            .clone()
            .or_else(|| self.rule.name.clone())
            .or(self.rule.id)
            .unwrap_or_else(|| format!("code scanning alert #{}", self.number));
        let long_desc = self
            .most_recent_instance
            .and_then(|i| i.message)
            .and_then(|m| m.text)
            .unwrap_or_else(|| short_desc.clone());
        Alert {
            repo_id: repo_id.to_string(),
            number: self.number,
            kind: AlertKind::CodeScanning,
            // "dismissed" and "fixed" both count as resolved
            open: self.state == "open",
            short_desc,
            long_desc,
            hyperlink: self.html_url,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SecretScanningAlert {
    pub number: u64,
    pub state: String,
    pub html_url: String,
    #[serde(default)]
    pub secret_type: Option<String>,
    #[serde(default)]
    pub secret_type_display_name: Option<String>,
}

impl SecretScanningAlert {
    pub fn into_alert(self, repo_id: &str) -> Alert {
        let short_desc = self
            .secret_type_display_name
            .or(self.secret_type)
            .unwrap_or_else(|| "secret".to_string());
        Alert {
            repo_id: repo_id.to_string(),
            number: self.number,
            kind: AlertKind::SecretScanning,
            open: self.state == "open",
            long_desc: format!("{short_desc} exposed in {repo_id}"),
            short_desc,
            hyperlink: self.html_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_scanning_state_mapping() {
        for (state, open) in [("open", true), ("dismissed", false), ("fixed", false)] {
            let alert = CodeScanningAlert {
                number: 3,
                state: state.to_string(),
                html_url: String::new(),
                rule: CodeScanningRule {
                    id: Some("js/sql-injection".to_string()),
                    name: None,
                    description: None,
                },
                most_recent_instance: None,
            }
            .into_alert("o/r");
            assert_eq!(alert.open, open, "state {state}");
            assert_eq!(alert.kind, AlertKind::CodeScanning);
        }
    }

    #[test]
    fn secret_scanning_descriptions() {
        let alert = SecretScanningAlert {
            number: 9,
            state: "resolved".to_string(),
            html_url: String::new(),
            secret_type: Some("gh_token".to_string()),
            secret_type_display_name: Some("GitHub Token".to_string()),
        }
        .into_alert("o/r");
        assert!(!alert.open);
        assert_eq!(alert.short_desc, "GitHub Token");
        assert_eq!(alert.long_desc, "GitHub Token exposed in o/r");
    }
}
