//! # Impact Academy 共有ユーティリティ
//!
//! サーバーとインフラ層の双方から使われる、ビジネスロジックを含まない
//! 共通部品を提供する。
//!
//! ## 設計方針
//!
//! - axum には依存しない（`IntoResponse` 変換はサーバー側の責務）
//! - トレーシング初期化は `observability` feature の背後に置く

pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
