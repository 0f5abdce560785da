use thiserror::Error;

/// Widget query field that must be filled before submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    Kpi,
    StartDate,
    EndDate,
    Site,
}

impl QueryField {
    pub fn label(&self) -> &'static str {
        match self {
            QueryField::Kpi => "KPI",
            QueryField::StartDate => "start date",
            QueryField::EndDate => "end date",
            QueryField::Site => "site",
        }
    }
}

fn join_fields(fields: &[QueryField]) -> String {
    fields
        .iter()
        .map(QueryField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failures surfaced by the KPI data pipeline.
///
/// Every variant is turned into an inline message by the component that
/// issued the operation; none of them propagate past it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KpiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Missing required fields: {}", join_fields(.0))]
    Validation(Vec<QueryField>),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl KpiError {
    /// Classify a non-2xx response
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = summarize_body(body, status);
        match status {
            401 | 403 => KpiError::Auth(format!("token rejected ({}): {}", status, message)),
            _ => KpiError::Http { status, message },
        }
    }

    pub fn missing_token() -> Self {
        KpiError::Auth("no bearer token in session".to_string())
    }
}

const MAX_MESSAGE_LEN: usize = 200;

fn summarize_body(body: &str, status: u16) -> String {
    // Prefer the API's own `message` / `detail` field when the body is JSON
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "detail", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("request failed with status {}", status);
    }
    trimmed.chars().take(MAX_MESSAGE_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses() {
        assert!(matches!(KpiError::from_status(401, ""), KpiError::Auth(_)));
        assert!(matches!(KpiError::from_status(403, ""), KpiError::Auth(_)));
    }

    #[test]
    fn test_http_status_uses_api_message() {
        let err = KpiError::from_status(500, r#"{"message":"compute failed"}"#);
        assert_eq!(
            err,
            KpiError::Http {
                status: 500,
                message: "compute failed".to_string()
            }
        );
        assert_eq!(err.to_string(), "HTTP error 500: compute failed");
    }

    #[test]
    fn test_empty_body_message_is_not_empty() {
        let err = KpiError::from_status(502, "  ");
        assert!(!err.to_string().is_empty());
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_validation_lists_fields() {
        let err = KpiError::Validation(vec![QueryField::Kpi, QueryField::EndDate]);
        assert_eq!(err.to_string(), "Missing required fields: KPI, end date");
    }
}
