//! # ユーザーユースケース
//!
//! ロール判定と受講生への変更を扱う。ロールはクライアントが画面を
//! 出し分けるためだけに使われ、サーバー側の認可には使用しない。

use std::sync::Arc;

use academy_domain::user::Role;
use academy_infra::repository::{UpdateAck, UserRepository};

use crate::error::ApiError;

/// ユーザーユースケースの実装
pub struct UserUseCaseImpl {
    user_repository: Arc<dyn UserRepository>,
}

impl UserUseCaseImpl {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// 指定メールアドレスのユーザーが指定ロールを持つか判定する
    ///
    /// ユーザーが存在しない場合は `false`（エラーにしない）。
    pub async fn has_role(&self, email: &str, role: Role) -> Result<bool, ApiError> {
        let user = self.user_repository.find_by_email(email).await?;

        Ok(user.is_some_and(|user| user.has_role(role)))
    }

    /// ユーザーのロールを受講生に変更する
    ///
    /// メールアドレスをキーに upsert するため、ユーザーが存在しなければ
    /// `email` と `role` だけを持つドキュメントが作成される。
    /// 管理者であっても受講生に上書きされる。
    pub async fn promote_to_student(&self, email: &str) -> Result<UpdateAck, ApiError> {
        let ack = self
            .user_repository
            .upsert_role(email, Role::Student)
            .await?;

        tracing::info!(
            matched = ack.matched_count,
            upserted = ack.upserted_id.is_some(),
            "ユーザーを受講生に変更しました"
        );
        Ok(ack)
    }
}
