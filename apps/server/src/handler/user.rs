//! # ユーザーハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /users?role=` - ユーザー一覧（ロールで絞り込み可）
//! - `GET /users/{email}` - メールアドレスでユーザーを取得
//! - `POST /users` - ユーザー登録（ボディをそのまま保存）
//! - `PUT /users?email=` - ユーザーを受講生に変更（upsert）
//! - `GET /users/{role}/{email}` - ロール判定（`admin` / `student` / `user`）
//!
//! ロール判定は `{"isAdmin": bool}` のように、ロールごとのキーで返す。

use std::sync::Arc;

use academy_domain::{
    DomainError,
    user::{Role, User},
};
use academy_infra::repository::UserRepository;
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
use serde_json::{Map, Value};

use super::{
    acknowledgement::{InsertAckDto, UpdateAckDto},
    non_empty,
    required,
};
use crate::{error::ApiError, usecase::UserUseCaseImpl};

/// ユーザー API の共有状態
pub struct UserState {
    pub user_repository: Arc<dyn UserRepository>,
    pub usecase:         UserUseCaseImpl,
}

/// ユーザー一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<String>,
}

/// メールアドレス指定のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// GET /users
pub async fn list_users(
    State(state): State<Arc<UserState>>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let role = non_empty(query.role);

    let users = state.user_repository.find_all(role.as_deref()).await?;

    Ok(Json(users))
}

/// GET /users/{email}
pub async fn get_user_by_email(
    State(state): State<Arc<UserState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(user) = state.user_repository.find_by_email(&email).await? else {
        return Err(DomainError::NotFound {
            entity_type: "ユーザー",
            id:          email,
        }
        .into());
    };

    Ok(Json(user))
}

/// POST /users
///
/// 同じメールアドレスのユーザーがいても登録する（重複チェックなし）。
pub async fn create_user(
    State(state): State<Arc<UserState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let user = User::try_from(body)?;

    let ack = state.user_repository.insert(&user).await?;

    Ok((StatusCode::CREATED, Json(InsertAckDto::from(ack))))
}

/// PUT /users?email=
pub async fn promote_to_student(
    State(state): State<Arc<UserState>>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let email = required(query.email, "email")?;

    let ack = state.usecase.promote_to_student(&email).await?;

    Ok(Json(UpdateAckDto::from(ack)))
}

/// GET /users/{role}/{email}
pub async fn check_role(
    State(state): State<Arc<UserState>>,
    Path((role, email)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let role = Role::parse(&role)?;

    let has_role = state.usecase.has_role(&email, role).await?;

    let mut body = Map::new();
    body.insert(role_flag(role).to_string(), Value::Bool(has_role));
    Ok(Json(body))
}

/// ロール判定レスポンスのキー名
fn role_flag(role: Role) -> &'static str {
    match role {
        Role::Admin => "isAdmin",
        Role::Student => "isStudent",
        Role::User => "isUser",
    }
}
