//! # CourseRepository
//!
//! 講座の永続化を担当するリポジトリ。講座には更新操作がない。
//! 削除しても関連する予約・お知らせは削除しない（カスケードなし）。

use academy_domain::{
    course::{Course, CourseSummary, NAME_FIELD},
    id::DocumentId,
};
use async_trait::async_trait;
use bson::{Document, doc};
use mongodb::{Collection, Database, options::FindOptions};

use super::{DeleteAck, InsertAck, find_records, id_filter, inserted_id};
use crate::{
    db::COURSES_COLLECTION,
    document::{from_bson_document, to_bson_document},
    error::InfraError,
};

/// 講座リポジトリトレイト
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// 講座一覧を取得する
    async fn find_all(&self) -> Result<Vec<Course>, InfraError>;

    /// 講座の要約（`_id` と `name` のみ）一覧を取得する
    async fn find_summaries(&self) -> Result<Vec<CourseSummary>, InfraError>;

    /// ID で講座を検索する
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Course>, InfraError>;

    /// 講座を挿入する
    async fn insert(&self, course: &Course) -> Result<InsertAck, InfraError>;

    /// 講座を削除する
    async fn delete(&self, id: &DocumentId) -> Result<DeleteAck, InfraError>;
}

/// MongoDB 実装の CourseRepository
#[derive(Debug, Clone)]
pub struct MongoCourseRepository {
    collection: Collection<Document>,
}

impl MongoCourseRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COURSES_COLLECTION),
        }
    }
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Course>, InfraError> {
        find_records(&self.collection, Document::new(), None, Course::from_record).await
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_summaries(&self) -> Result<Vec<CourseSummary>, InfraError> {
        let options = FindOptions::builder()
            .projection(doc! { NAME_FIELD: 1 })
            .build();
        find_records(&self.collection, Document::new(), options, |record| {
            Course::from_record(record).summary()
        })
        .await
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Course>, InfraError> {
        let document = self.collection.find_one(id_filter(id), None).await?;

        Ok(document.map(from_bson_document).map(Course::from_record))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, course: &Course) -> Result<InsertAck, InfraError> {
        let document = to_bson_document(course.as_record())?;
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
