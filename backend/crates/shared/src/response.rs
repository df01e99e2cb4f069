//! Response Envelope
//!
//! Every endpoint of the gateway answers with `{data?, error?, message?}`.
//! Exactly one of `data` / `error` is populated; `message` is used for
//! informational success without a payload.

use serde::Serialize;

/// JSON response envelope.
///
/// Absent fields are omitted from the serialized body, so a payload response
/// renders as `{"data": ...}` and a failure as `{"error": "..."}`.
///
/// ```rust
/// use kernel::response::ApiResponse;
///
/// let ok = ApiResponse::data(vec![1, 2, 3]);
/// assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"data":[1,2,3]}"#);
///
/// let err = ApiResponse::<()>::error("Token inválido");
/// assert_eq!(serde_json::to_string(&err).unwrap(), r#"{"error":"Token inválido"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload.
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Failure response.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Successful response without payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: None,
            message: Some(message.into()),
        }
    }

    pub fn data_ref(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error_ref(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn message_ref(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only() {
        let res = ApiResponse::<()>::message("Logout realizado com sucesso");
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "Logout realizado com sucesso" })
        );
    }

    #[test]
    fn test_exactly_one_of_data_or_error() {
        let ok = ApiResponse::data(serde_json::json!({ "tokens": 0 }));
        assert!(ok.data_ref().is_some());
        assert!(ok.error_ref().is_none());

        let err = ApiResponse::<serde_json::Value>::error("Perfil não encontrado");
        assert!(err.data_ref().is_none());
        assert_eq!(err.error_ref(), Some("Perfil não encontrado"));
        assert!(err.message_ref().is_none());
    }
}
