// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Token inválido")]
    InvalidToken,

    #[error("Tipo de relatório inválido: '{0}'")]
    InvalidReportType(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Qualquer outro erro inesperado (serialização, dados inconsistentes...)
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// Erro já traduzido, pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let (status, key) = match self {
            AppError::InvalidToken | AppError::JwtError(_) => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::InvalidReportType(_) => (StatusCode::BAD_REQUEST, "invalid_report_type"),
            e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        ApiError {
            status,
            error: i18n.get(&locale.0, key),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> Locale {
        Locale("en".to_string())
    }

    #[test]
    fn test_invalid_report_type_is_a_bad_request() {
        let api = AppError::InvalidReportType("vendas".into()).to_api_error(&english(), &I18nStore::new());
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.error, "Invalid report type");
    }

    #[test]
    fn test_token_errors_are_unauthorized() {
        let store = I18nStore::new();
        assert_eq!(AppError::InvalidToken.to_api_error(&english(), &store).status, StatusCode::UNAUTHORIZED);

        let jwt = jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::ExpiredSignature);
        assert_eq!(AppError::from(jwt).to_api_error(&english(), &store).status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_errors_hide_the_cause() {
        let err = AppError::from(anyhow::anyhow!("pool fechado"));
        let api = err.to_api_error(&Locale("pt".into()), &I18nStore::new());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("pool"));
    }
}
