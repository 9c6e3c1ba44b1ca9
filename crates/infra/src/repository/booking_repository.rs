//! # BookingRepository
//!
//! 予約の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **一覧は地区 → 新しい順**: `borough` 昇順、`_id` 降順でソートする
//! - **承認は upsert しない**: 存在しない ID を承認しても部分的なドキュメントを
//!   作らない。一致件数 0 の判定はユースケース層で行う

use academy_domain::{
    booking::{APPROVED, Booking, EMAIL_FIELD, STATUS_FIELD},
    id::DocumentId,
};
use async_trait::async_trait;
use bson::{Document, doc};
use mongodb::{
    Collection,
    Database,
    options::{FindOneOptions, FindOptions},
};

use super::{
    DeleteAck,
    InsertAck,
    UpdateAck,
    equality_filter,
    find_records,
    id_filter,
    inserted_id,
    listing_sort,
    update_ack,
};
use crate::{
    db::BOOKINGS_COLLECTION,
    document::{from_bson_document, to_bson_document},
    error::InfraError,
};

/// 予約リポジトリトレイト
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// 予約一覧を取得する（メールアドレス指定時は絞り込む）
    ///
    /// `borough` 昇順、`_id` 降順で返す。
    async fn find_all(&self, email: Option<&str>) -> Result<Vec<Booking>, InfraError>;

    /// ステータスが完全一致する予約を取得する
    async fn find_by_status(&self, status: &str) -> Result<Vec<Booking>, InfraError>;

    /// メールアドレスに一致する最新の予約を取得する
    async fn find_latest_by_email(&self, email: &str) -> Result<Option<Booking>, InfraError>;

    /// 予約を挿入する
    async fn insert(&self, booking: &Booking) -> Result<InsertAck, InfraError>;

    /// 予約を承認済みにする（存在しない場合は何もしない）
    async fn approve(&self, id: &DocumentId) -> Result<UpdateAck, InfraError>;

    /// 予約を削除する
    async fn delete(&self, id: &DocumentId) -> Result<DeleteAck, InfraError>;
}

/// MongoDB 実装の BookingRepository
#[derive(Debug, Clone)]
pub struct MongoBookingRepository {
    collection: Collection<Document>,
}

impl MongoBookingRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(BOOKINGS_COLLECTION),
        }
    }
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self, email: Option<&str>) -> Result<Vec<Booking>, InfraError> {
        let options = FindOptions::builder().sort(listing_sort()).build();
        find_records(
            &self.collection,
            equality_filter(EMAIL_FIELD, email),
            options,
            Booking::from_record,
        )
        .await
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%status))]
    async fn find_by_status(&self, status: &str) -> Result<Vec<Booking>, InfraError> {
        find_records(
            &self.collection,
            doc! { STATUS_FIELD: status },
            None,
            Booking::from_record,
        )
        .await
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_latest_by_email(&self, email: &str) -> Result<Option<Booking>, InfraError> {
        let options = FindOneOptions::builder().sort(doc! { "_id": -1 }).build();
        let document = self
            .collection
            .find_one(doc! { EMAIL_FIELD: email }, options)
            .await?;

        Ok(document.map(from_bson_document).map(Booking::from_record))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, booking: &Booking) -> Result<InsertAck, InfraError> {
        let document = to_bson_document(booking.as_record())?;
        let result = self.collection.insert_one(document, None).await?;

        Ok(InsertAck {
            inserted_id: inserted_id(result.inserted_id)?,
        })
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn approve(&self, id: &DocumentId) -> Result<UpdateAck, InfraError> {
        let result = self
            .collection
            .update_one(
                id_filter(id),
                doc! { "$set": { STATUS_FIELD: APPROVED } },
                None,
            )
            .await?;

        Ok(update_ack(result))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &DocumentId) -> Result<DeleteAck, InfraError> {
        let result = self.collection.delete_one(id_filter(id), None).await?;

        Ok(DeleteAck {
            deleted_count: result.deleted_count,
        })
    }
}
