use serde_json::Value;
use thiserror::Error;

/// Failure of a Qash API operation.
///
/// Only two kinds exist. Either the server answered with an `error`/`errors`
/// body, or something else went wrong along the way (transport, malformed
/// body, unexpected shape), in which case the cause is dropped and callers see
/// the `unexpected_issue` sentinel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QashError {
    #[error("API error: {}", join_errors(.errors))]
    Api { errors: Vec<Value> },

    #[error("unexpected_issue")]
    UnexpectedIssue,
}

impl QashError {
    /// Sentinel reported for every failure that is not an API error.
    pub const UNEXPECTED_ISSUE: &'static str = "unexpected_issue";

    /// The error list as the server would report it.
    pub fn errors(&self) -> Vec<Value> {
        match self {
            Self::Api { errors } => errors.clone(),
            Self::UnexpectedIssue => vec![Value::String(Self::UNEXPECTED_ISSUE.to_string())],
        }
    }

    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::UnexpectedIssue)
    }
}

impl From<reqwest::Error> for QashError {
    fn from(err: reqwest::Error) -> Self {
        tracing::debug!(error = %err, "HTTP transport failure");
        Self::UnexpectedIssue
    }
}

impl From<serde_json::Error> for QashError {
    fn from(err: serde_json::Error) -> Self {
        tracing::debug!(error = %err, "JSON handling failure");
        Self::UnexpectedIssue
    }
}

fn join_errors(errors: &[Value]) -> String {
    errors
        .iter()
        .map(|e| match e {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
