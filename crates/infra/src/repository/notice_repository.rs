//! # NoticeRepository
//!
//! お知らせの永続化を担当するリポジトリ。一覧のソート順は予約と同じ
//! （`borough` 昇順、`_id` 降順）。

use academy_domain::{
    id::DocumentId,
    notice::{NOTICE_FOR_FIELD, Notice},
};
use async_trait::async_trait;
use bson::Document;
use mongodb::{Collection, Database, options::FindOptions};

use super::{DeleteAck, InsertAck, equality_filter, find_records, id_filter, inserted_id, listing_sort};
use crate::{
    db::NOTICES_COLLECTION,
    document::{from_bson_document, to_bson_document},
    error::InfraError,
};

/// お知らせリポジトリトレイト
#[async_trait]
pub trait NoticeRepository: Send + Sync {
    /// お知らせ一覧を取得する（対象指定時は `noticeFor` の完全一致で絞り込む）
    async fn find_all(&self, notice_for: Option<&str>) -> Result<Vec<Notice>, InfraError>;

    /// ID でお知らせを検索する
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Notice>, InfraError>;

    /// お知らせを挿入する
    async fn insert(&self, notice: &Notice) -> Result<InsertAck, InfraError>;

    /// お知らせを削除する
    async fn delete(&self, id: &DocumentId) -> Result<DeleteAck, InfraError>;
}

/// MongoDB 実装の NoticeRepository
#[derive(Debug, Clone)]
pub struct MongoNoticeRepository {
    collection: Collection<Document>,
}

impl MongoNoticeRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(NOTICES_COLLECTION),
        }
    }
}

#[async_trait]
impl NoticeRepository for MongoNoticeRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(notice_for = ?notice_for))]
    async fn find_all(&self, notice_for: Option<&str>) -> Result<Vec<Notice>, InfraError> {
        let options = FindOptions::builder().sort(listing_sort()).build();
        find_records(
            &self.collection,
            equality_filter(NOTICE_FOR_FIELD, notice_for),
            options,
            Notice::from_record,
        )
        .await
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Notice>, InfraError> {
        let document = self.collection.find_one(id_filter(id), None).await?;

        Ok(document.map(from_bson_document).map(Notice::from_record))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, notice: &Notice) -> Result<InsertAck, InfraError> {
        let document = to_bson_document(notice.as_record())?;
        let result = self.collection.insert_one(document, None).await?;

        Ok(InsertAck {
            inserted_id: inserted_id(result.inserted_id)?,
        })
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &DocumentId) -> Result<DeleteAck, InfraError> {
        let result = self.collection.delete_one(id_filter(id), None).await?;

        Ok(DeleteAck {
            deleted_count: result.deleted_count,
        })
    }
}
