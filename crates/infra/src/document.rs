//! # Record ⇔ BSON 変換
//!
//! ドメインの [`Record`] と MongoDB の BSON ドキュメントを相互変換する。
//!
//! - 書き込み: JSON フィールドを BSON に変換し、識別子があれば `_id` に ObjectId を置く
//! - 読み出し: `_id` が ObjectId なら識別子として取り出し、残りは Relaxed Extended JSON
//!   に変換する（日時などの BSON 固有型は `{"$date": ...}` 形式になる）

use academy_domain::{
    id::DocumentId,
    record::{ID_FIELD, Record},
};
use bson::{Bson, Document};
use serde_json::{Map, Value};

use crate::error::InfraError;

/// Record を BSON ドキュメントに変換する
pub fn to_bson_document(record: &Record) -> Result<Document, InfraError> {
    let fields = bson::to_document(record.fields())?;

    let mut document = Document::new();
    if let Some(id) = record.id() {
        document.insert(ID_FIELD, id.as_object_id());
    }
    for (key, value) in fields {
        document.insert(key, value);
    }
    Ok(document)
}

/// BSON ドキュメントを Record に変換する
pub fn from_bson_document(mut document: Document) -> Record {
    let id = match document.get(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => {
            let id = DocumentId::from_object_id(*oid);
            document.remove(ID_FIELD);
            Some(id)
        }
        _ => None,
    };

    let fields = match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    Record::from_parts(id, fields)
}
