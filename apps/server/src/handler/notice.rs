//! # お知らせハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /notices?noticeFor=` - お知らせ一覧（`borough` 昇順 → 新しい順）
//! - `GET /notices/{id}` - お知らせ取得
//! - `POST /notices` - お知らせ登録
//! - `DELETE /notices/{id}` - お知らせ削除
//! - `GET /announcement?email=` - ユーザーの最新の予約に対応するお知らせ

use std::sync::Arc;

use academy_domain::{DomainError, id::DocumentId, notice::Notice};
use academy_infra::repository::NoticeRepository;
use axum::{
    Json,
    extract::{
        Path,
        Query,
        State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;

use super::{
    acknowledgement::{DeleteAckDto, InsertAckDto},
    non_empty,
    required,
    user::EmailQuery,
};
use crate::{error::ApiError, usecase::NoticeUseCaseImpl};

/// お知らせ API の共有状態
pub struct NoticeState {
    pub notice_repository: Arc<dyn NoticeRepository>,
    pub usecase:           NoticeUseCaseImpl,
}

/// お知らせ一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListNoticesQuery {
    #[serde(rename = "noticeFor")]
    pub notice_for: Option<String>,
}

/// GET /notices
pub async fn list_notices(
    State(state): State<Arc<NoticeState>>,
    query: Result<Query<ListNoticesQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let notice_for = non_empty(query.notice_for);

    let notices = state
        .notice_repository
        .find_all(notice_for.as_deref())
        .await?;

    Ok(Json(notices))
}

/// GET /notices/{id}
pub async fn get_notice(
    State(state): State<Arc<NoticeState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = DocumentId::parse(&id)?;

    let notice = state
        .notice_repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "お知らせ",
            id:          id.to_hex(),
        })?;

    Ok(Json(notice))
}

/// POST /notices
pub async fn create_notice(
    State(state): State<Arc<NoticeState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let notice = Notice::try_from(body)?;

    let ack = state.notice_repository.insert(&notice).await?;

    Ok((StatusCode::CREATED, Json(InsertAckDto::from(ack))))
}

/// DELETE /notices/{id}
pub async fn delete_notice(
    State(state): State<Arc<NoticeState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = DocumentId::parse(&id)?;

    let ack = state.notice_repository.delete(&id).await?;

    Ok(Json(DeleteAckDto::from(ack)))
}

/// GET /announcement?email=
pub async fn announcement(
    State(state): State<Arc<NoticeState>>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let email = required(query.email, "email")?;

    let notices = state.usecase.announcement(&email).await?;

    Ok(Json(notices))
}
