//! # ヘルスチェックハンドラ
//!
//! - `/` — 稼働確認用のテキスト
//! - `/health` — Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready` — Readiness Check（データベースへの疎通を確認）
//!
//! レスポンス型は [`academy_shared::HealthResponse`] / [`academy_shared::ReadinessResponse`] を参照。

use std::{collections::BTreeMap, sync::Arc};

use academy_infra::DatabaseProbe;
use academy_shared::{CheckStatus, HealthResponse, ReadinessResponse};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// ルートパスの応答テキスト
pub const ROOT_MESSAGE: &str = "Impact Academy Server is running";

/// GET /
pub async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub database_probe: Arc<dyn DatabaseProbe>,
}

/// GET /health/ready
///
/// データベースに `ping` できれば 200、できなければ 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database = match state.database_probe.ping().await {
        Ok(()) => CheckStatus::Ok,
        Err(e) => {
            tracing::warn!("データベースの疎通確認に失敗しました: {}", e);
            CheckStatus::Error
        }
    };

    let response = ReadinessResponse::from_checks(BTreeMap::from([(
        "database".to_string(),
        database,
    )]));
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
