//! # API エラー定義
//!
//! ハンドラとユースケースが返すエラーと、RFC 9457 Problem Details 形式の
//! HTTP レスポンスへの変換を定義する。
//!
//! | 種別 | ステータス |
//! |------|-----------|
//! | `NotFound` | 404 |
//! | `InvalidIdentifierFormat` | 400 |
//! | `Validation` | 400 |
//! | `BadRequest` | 400 |
//! | `UpstreamStorage` | 500（detail は固定） |

use academy_domain::DomainError;
use academy_infra::InfraError;
use academy_shared::ErrorResponse;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// ドキュメントが見つからない
    #[error("{0}")]
    NotFound(String),

    /// パスの識別子が ObjectId の形式でない
    #[error("{0}")]
    InvalidIdentifierFormat(String),

    /// ボディがオブジェクトでない、未知のロール、必須パラメータの欠落
    #[error("{0}")]
    Validation(String),

    /// リクエストを解釈できない（JSON の構文エラーなど）
    #[error("{0}")]
    BadRequest(String),

    /// MongoDB との通信や BSON 変換の失敗
    #[error("データベースエラー: {0}")]
    UpstreamStorage(#[from] InfraError),
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(_) => Self::Validation(error.to_string()),
            DomainError::InvalidIdentifier(_) => Self::InvalidIdentifierFormat(error.to_string()),
            DomainError::NotFound { .. } => Self::NotFound(error.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::NotFound(msg) => ErrorResponse::not_found(msg.as_str()),
            ApiError::InvalidIdentifierFormat(msg) => ErrorResponse::invalid_identifier(msg.as_str()),
            ApiError::Validation(msg) => ErrorResponse::validation_error(msg.as_str()),
            ApiError::BadRequest(msg) => ErrorResponse::bad_request(msg.as_str()),
            ApiError::UpstreamStorage(e) => {
                tracing::error!(
                    span_trace = %e.span_trace(),
                    "データベースエラー: {}",
                    e
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
