//! User-visible messages and how lookup failures map onto them.

use serde::{Deserialize, Serialize};

use crate::client::FetchError;

pub const EMPTY_INPUT: &str = "⚠️ Please enter a city";
pub const NOT_FOUND: &str = "❌ City not found";
pub const GENERIC_FAILURE: &str = "🌐 Something went wrong. Try again.";
pub const UNEXPECTED_RESPONSE: &str = "🧩 Unexpected response from weather service";

/// How much of the failure taxonomy the user gets to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagePolicy {
    /// Any HTTP error reads as "not found"; network and parse failures get
    /// the generic message.
    #[default]
    Collapsed,
    /// A distinct message per failure kind; only HTTP 404 reads as "not found".
    Detailed,
}

impl MessagePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessagePolicy::Collapsed => "collapsed",
            MessagePolicy::Detailed => "detailed",
        }
    }

    pub const fn all() -> &'static [MessagePolicy] {
        &[MessagePolicy::Collapsed, MessagePolicy::Detailed]
    }

    pub fn message_for(&self, err: &FetchError) -> String {
        match (self, err) {
            (_, FetchError::Network(_)) => GENERIC_FAILURE.to_string(),
            (MessagePolicy::Collapsed, FetchError::Http { .. }) => NOT_FOUND.to_string(),
            (MessagePolicy::Collapsed, FetchError::Parse(_)) => GENERIC_FAILURE.to_string(),
            (MessagePolicy::Detailed, _) if err.is_not_found() => NOT_FOUND.to_string(),
            (MessagePolicy::Detailed, FetchError::Http { status, .. }) => {
                format!("❌ Weather service responded with {status}")
            }
            (MessagePolicy::Detailed, FetchError::Parse(_)) => UNEXPECTED_RESPONSE.to_string(),
        }
    }
}

impl std::fmt::Display for MessagePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for MessagePolicy {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "collapsed" => Ok(MessagePolicy::Collapsed),
            "detailed" => Ok(MessagePolicy::Detailed),
            _ => Err(anyhow::anyhow!(
                "Unknown error message style '{value}'. Supported styles: collapsed, detailed."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn http(status: StatusCode) -> FetchError {
        FetchError::Http {
            status,
            body: String::new(),
        }
    }

    fn network() -> FetchError {
        FetchError::Network(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        )))
    }

    #[test]
    fn not_found_wins_under_both_policies() {
        for policy in MessagePolicy::all() {
            assert_eq!(policy.message_for(&http(StatusCode::NOT_FOUND)), NOT_FOUND);
        }
    }

    #[test]
    fn collapsed_reports_every_http_failure_as_not_found() {
        let policy = MessagePolicy::Collapsed;

        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            assert_eq!(policy.message_for(&http(status)), NOT_FOUND);
        }
    }

    #[test]
    fn collapsed_keeps_generic_message_for_network_and_parse() {
        let policy = MessagePolicy::Collapsed;

        assert_eq!(policy.message_for(&network()), GENERIC_FAILURE);
        assert_eq!(policy.message_for(&FetchError::Parse("bad".into())), GENERIC_FAILURE);
    }

    #[test]
    fn detailed_distinguishes_failure_kinds() {
        let policy = MessagePolicy::Detailed;

        assert_eq!(
            policy.message_for(&http(StatusCode::INTERNAL_SERVER_ERROR)),
            "❌ Weather service responded with 500 Internal Server Error"
        );
        assert_eq!(policy.message_for(&network()), GENERIC_FAILURE);
        assert_eq!(policy.message_for(&FetchError::Parse("bad".into())), UNEXPECTED_RESPONSE);
    }

    #[test]
    fn policy_as_str_roundtrip() {
        for policy in MessagePolicy::all() {
            let parsed = MessagePolicy::try_from(policy.as_str()).expect("roundtrip should succeed");
            assert_eq!(*policy, parsed);
        }
        assert_eq!(MessagePolicy::try_from("DETAILED").unwrap(), MessagePolicy::Detailed);
    }

    #[test]
    fn unknown_policy_error() {
        let err = MessagePolicy::try_from("verbose").unwrap_err();
        assert!(err.to_string().contains("Unknown error message style"));
    }

    #[test]
    fn policy_names_match_serde_names() {
        for policy in MessagePolicy::all() {
            let quoted = serde_json::to_string(policy).unwrap();
            assert_eq!(quoted, format!("\"{policy}\""));
        }
    }
}
