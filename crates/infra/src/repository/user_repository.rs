//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **メールアドレスで検索**: ユーザーはメールアドレスで特定する
//!   （一意制約はなく、重複登録も許容する）
//! - **ロール変更は upsert**: 受講生への昇格は該当ユーザーがいなければ
//!   メールアドレスとロールだけのドキュメントを作成する

use academy_domain::user::{EMAIL_FIELD, ROLE_FIELD, Role, User};
use async_trait::async_trait;
use bson::{Document, doc};
use mongodb::{Collection, Database, options::UpdateOptions};

use super::{InsertAck, UpdateAck, equality_filter, find_records, inserted_id, update_ack};
use crate::{
    db::USERS_COLLECTION,
    document::{from_bson_document, to_bson_document},
    error::InfraError,
};

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザー一覧を取得する（ロール指定時は保存値と完全一致で絞り込む）
    async fn find_all(&self, role: Option<&str>) -> Result<Vec<User>, InfraError>;

    /// メールアドレスでユーザーを検索する
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, InfraError>;

    /// ユーザーを挿入する
    async fn insert(&self, user: &User) -> Result<InsertAck, InfraError>;

    /// メールアドレスで一致するユーザーのロールを設定する（なければ作成する）
    async fn upsert_role(&self, email: &str, role: Role) -> Result<UpdateAck, InfraError>;
}

/// MongoDB 実装の UserRepository
#[derive(Debug, Clone)]
pub struct MongoUserRepository {
    collection: Collection<Document>,
}

impl MongoUserRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(role = ?role))]
    async fn find_all(&self, role: Option<&str>) -> Result<Vec<User>, InfraError> {
        let filter = equality_filter(ROLE_FIELD, role);
        find_records(&self.collection, filter, None, User::from_record).await
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, InfraError> {
        let document = self
            .collection
            .find_one(doc! { EMAIL_FIELD: email }, None)
            .await?;

        Ok(document.map(from_bson_document).map(User::from_record))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, user: &User) -> Result<InsertAck, InfraError> {
        let document = to_bson_document(user.as_record())?;
        let result = self.collection.insert_one(document, None).await?;

        Ok(InsertAck {
            inserted_id: inserted_id(result.inserted_id)?,
        })
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%role))]
    async fn upsert_role(&self, email: &str, role: Role) -> Result<UpdateAck, InfraError> {
        let options = UpdateOptions::builder().upsert(true).build();
        let result = self
            .collection
            .update_one(
                doc! { EMAIL_FIELD: email },
                doc! { "$set": { ROLE_FIELD: role.as_ref() } },
                options,
            )
            .await?;

        Ok(update_ack(result))
    }
}
