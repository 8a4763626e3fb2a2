use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    BadRequest,
    Conflict,
    InternalError,
    #[serde(other)]
    Unknown,
}

impl ErrorCode {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            404 => Self::NotFound,
            409 => Self::Conflict,
            500..=599 => Self::InternalError,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(default)]
    pub rejected_value: serde_json::Value,
}

/// Error body returned by the backend on any non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetail {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ProblemDetail {
    pub fn new(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            detail: Some(detail.into()),
            code: Some(ErrorCode::from_status(status)),
            ..Self::default()
        }
    }

    pub fn with_field_error(
        mut self,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
            rejected_value: serde_json::Value::Null,
        });
        self
    }

    /// The detail text, falling back to the title when the backend sent none.
    pub fn message(&self) -> &str {
        self.detail
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_validation_problem_detail() {
        let raw = r#"{
            "type": "about:blank",
            "title": "BAD_REQUEST",
            "status": 400,
            "detail": "Validation Failed",
            "instance": "/properties",
            "code": "BAD_REQUEST",
            "errors": [{"field": "address", "message": "Address is required", "rejectedValue": ""}]
        }"#;
        let problem: ProblemDetail = serde_json::from_str(raw).expect("problem");
        assert_eq!(problem.code, Some(ErrorCode::BadRequest));
        assert_eq!(problem.message(), "Validation Failed");
        assert_eq!(problem.errors.len(), 1);
        assert_eq!(problem.errors[0].field, "address");
        assert_eq!(problem.errors[0].rejected_value, serde_json::json!(""));
    }

    #[test]
    fn unrecognised_code_maps_to_unknown() {
        let problem: ProblemDetail =
            serde_json::from_str(r#"{"detail":"boom","code":"TEAPOT"}"#).expect("problem");
        assert_eq!(problem.code, Some(ErrorCode::Unknown));
    }
}
