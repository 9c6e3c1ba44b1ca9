//! # 書き込み結果 DTO
//!
//! 挿入・更新・削除の結果を、MongoDB ドライバの結果オブジェクトと同じ
//! フィールド名（camelCase）で返す。
//!
//! ```json
//! { "acknowledged": true, "insertedId": "65f1c0..." }
//! { "acknowledged": true, "matchedCount": 1, "modifiedCount": 1, "upsertedCount": 0, "upsertedId": null }
//! { "acknowledged": true, "deletedCount": 1 }
//! ```

use academy_domain::id::DocumentId;
use academy_infra::repository::{DeleteAck, InsertAck, UpdateAck};
use serde::Serialize;

/// 挿入結果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAckDto {
    pub acknowledged: bool,
    pub inserted_id:  DocumentId,
}

impl From<InsertAck> for InsertAckDto {
    fn from(ack: InsertAck) -> Self {
        Self {
            acknowledged: true,
            inserted_id:  ack.inserted_id,
        }
    }
}

/// 更新結果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAckDto {
    pub acknowledged:   bool,
    pub matched_count:  u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id:    Option<DocumentId>,
}

impl From<UpdateAck> for UpdateAckDto {
    fn from(ack: UpdateAck) -> Self {
        Self {
            acknowledged:   true,
            matched_count:  ack.matched_count,
            modified_count: ack.modified_count,
            upserted_count: u64::from(ack.upserted_id.is_some()),
            upserted_id:    ack.upserted_id,
        }
    }
}

/// 削除結果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAckDto {
    pub acknowledged:  bool,
    pub deleted_count: u64,
}

impl From<DeleteAck> for DeleteAckDto {
    fn from(ack: DeleteAck) -> Self {
        Self {
            acknowledged:  true,
            deleted_count: ack.deleted_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_upsertした更新結果のjson形状() {
        let id = DocumentId::parse("65f1c0a2b3c4d5e6f7a8b9c0").unwrap();
        let dto = UpdateAckDto::from(UpdateAck {
            matched_count:  0,
            modified_count: 0,
            upserted_id:    Some(id),
        });

        assert_eq!(
            serde_json::to_value(dto).unwrap(),
            json!({
                "acknowledged": true,
                "matchedCount": 0,
                "modifiedCount": 0,
                "upsertedCount": 1,
                "upsertedId": "65f1c0a2b3c4d5e6f7a8b9c0"
            })
        );
    }

    #[test]
    fn test_upsertしていない更新結果はupserted_idがnull() {
        let dto = UpdateAckDto::from(UpdateAck {
            matched_count:  1,
            modified_count: 0,
            upserted_id:    None,
        });

        let json = serde_json::to_value(dto).unwrap();

        assert_eq!(json["upsertedCount"], 0);
        assert_eq!(json["upsertedId"], serde_json::Value::Null);
    }

    #[test]
    fn test_挿入結果と削除結果のjson形状() {
        let id = DocumentId::parse("65f1c0a2b3c4d5e6f7a8b9c0").unwrap();

        assert_eq!(
            serde_json::to_value(InsertAckDto::from(InsertAck { inserted_id: id })).unwrap(),
            json!({ "acknowledged": true, "insertedId": "65f1c0a2b3c4d5e6f7a8b9c0" })
        );
        assert_eq!(
            serde_json::to_value(DeleteAckDto::from(DeleteAck { deleted_count: 1 })).unwrap(),
            json!({ "acknowledged": true, "deletedCount": 1 })
        );
    }
}
