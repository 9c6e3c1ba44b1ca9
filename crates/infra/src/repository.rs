//! # リポジトリ実装
//!
//! コレクションごとのリポジトリトレイトと MongoDB 実装を提供する。
//!
//! ## 設計方針
//!
//! - **1 コレクション 1 トレイト**: users / courses / bookings / notices
//! - **単一操作**: 各メソッドは MongoDB への操作を 1 回だけ発行する
//! - **テスタビリティ**: トレイト経由でインメモリ実装に差し替え可能
//!
//! 書き込み系メソッドはドライバの結果オブジェクトを
//! [`InsertAck`] / [`UpdateAck`] / [`DeleteAck`] に詰め替えて返す。

pub mod booking_repository;
pub mod course_repository;
pub mod notice_repository;
pub mod user_repository;

use academy_domain::{
    id::DocumentId,
    record::{BOROUGH_FIELD, ID_FIELD},
};
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::{Collection, options::FindOptions};

pub use booking_repository::{BookingRepository, MongoBookingRepository};
pub use course_repository::{CourseRepository, MongoCourseRepository};
pub use notice_repository::{MongoNoticeRepository, NoticeRepository};
pub use user_repository::{MongoUserRepository, UserRepository};

use crate::{document::from_bson_document, error::InfraError};

/// 挿入結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertAck {
    pub inserted_id: DocumentId,
}

/// 更新結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateAck {
    /// フィルタに一致したドキュメント数
    pub matched_count:  u64,
    /// 実際に変更されたドキュメント数
    pub modified_count: u64,
    /// upsert で新規作成された場合の ID
    pub upserted_id:    Option<DocumentId>,
}

/// 削除結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteAck {
    pub deleted_count: u64,
}

/// 一覧のソート順（地区の昇順 → 新しい順）
///
/// `borough` を持たないドキュメントは先頭に並ぶ。
pub(crate) fn listing_sort() -> Document {
    doc! { BOROUGH_FIELD: 1, ID_FIELD: -1 }
}

/// 等価フィルタを組み立てる（値がなければ全件）
pub(crate) fn equality_filter(field: &str, value: Option<&str>) -> Document {
    match value {
        Some(value) => doc! { field: value },
        None => Document::new(),
    }
}

/// ID フィルタを組み立てる
pub(crate) fn id_filter(id: &DocumentId) -> Document {
    doc! { "_id": id.as_object_id() }
}

/// 検索結果をすべて読み出して変換する
pub(crate) async fn find_records<T>(
    collection: &Collection<Document>,
    filter: Document,
    options: impl Into<Option<FindOptions>>,
    convert: impl Fn(academy_domain::record::Record) -> T,
) -> Result<Vec<T>, InfraError> {
    let cursor = collection.find(filter, options).await?;
    let documents: Vec<Document> = cursor.try_collect().await?;
    Ok(documents
        .into_iter()
        .map(from_bson_document)
        .map(convert)
        .collect())
}

/// `insert_one` の戻り値から ID を取り出す
pub(crate) fn inserted_id(bson: Bson) -> Result<DocumentId, InfraError> {
    match bson {
        Bson::ObjectId(oid) => Ok(DocumentId::from_object_id(oid)),
        other => Err(InfraError::unexpected(format!(
            "挿入 ID が ObjectId ではありません: {other}"
        ))),
    }
}

/// `update_one` の結果を UpdateAck に変換する
pub(crate) fn update_ack(result: mongodb::results::UpdateResult) -> UpdateAck {
    UpdateAck {
        matched_count:  result.matched_count,
        modified_count: result.modified_count,
        upserted_id:    result
            .upserted_id
            .and_then(|id| id.as_object_id())
            .map(DocumentId::from_object_id),
    }
}
