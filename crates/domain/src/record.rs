//! # スキーマレスなドキュメント
//!
//! クライアントが送った JSON オブジェクトを、識別子（`_id`）とそれ以外の
//! フィールドに分けて保持する。サーバーはフィールドの内容を検証せず、
//! 保存・取得時にそのまま素通しする。
//!
//! 例外として、BSON で表現できない整数（`i64` の範囲外）は受け付けない。

use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap};
use serde_json::{Map, Value};

use crate::{DomainError, id::DocumentId};

/// 識別子フィールド名
pub const ID_FIELD: &str = "_id";
/// 地区のフィールド名（予約・お知らせ一覧のソートキー）
pub const BOROUGH_FIELD: &str = "borough";

/// スキーマを持たないドキュメント
///
/// `fields` には `_id` 以外のすべてのフィールドが入る。
/// ただし保存済みドキュメントの `_id` が ObjectId でなかった場合は、
/// `id` を `None` とし `_id` を `fields` 側にそのまま残す。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    id:     Option<DocumentId>,
    fields: Map<String, Value>,
}

impl Record {
    /// フィールドからドキュメントを作成する（識別子なし）
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { id: None, fields }
    }

    /// 識別子とフィールドからドキュメントを復元する
    pub fn from_parts(id: Option<DocumentId>, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> Option<DocumentId> {
        self.id
    }

    /// 識別子を設定したドキュメントを返す
    pub fn with_id(self, id: DocumentId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// 文字列フィールドを取得する
    ///
    /// フィールドが存在しない、または文字列でない場合は `None`。
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// 文字列フィールドを設定する
    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        self.fields
            .insert(key.to_string(), Value::String(value.into()));
    }
}

impl TryFrom<Value> for Record {
    type Error = DomainError;

    /// JSON 値からドキュメントを作成する
    ///
    /// - オブジェクト以外は `Validation`
    /// - `_id` が文字列なら ObjectId としてパースし、不正なら `InvalidIdentifier`
    /// - `_id` が文字列以外なら `Validation`
    /// - `i64` の範囲を超える整数を含む場合は `Validation`
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut fields) = value else {
            return Err(DomainError::Validation(
                "リクエストボディは JSON オブジェクトである必要があります".to_string(),
            ));
        };

        let id = match fields.remove(ID_FIELD) {
            None => None,
            Some(Value::String(s)) => Some(DocumentId::parse(&s)?),
            Some(_) => {
                return Err(DomainError::Validation(
                    "_id は文字列である必要があります".to_string(),
                ));
            }
        };

        if let Some(path) = fields
            .iter()
            .find_map(|(key, value)| out_of_range_integer(key, value))
        {
            return Err(DomainError::Validation(format!(
                "{path} の整数は 64 ビット符号付き整数の範囲を超えています"
            )));
        }

        Ok(Self { id, fields })
    }
}

/// `i64` に収まらない整数の位置をドット区切りのパスで返す
fn out_of_range_integer(path: &str, value: &Value) -> Option<String> {
    match value {
        Value::Number(n) if n.is_u64() && n.as_i64().is_none() => Some(path.to_string()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, item)| out_of_range_integer(&format!("{path}.{i}"), item)),
        Value::Object(map) => map
            .iter()
            .find_map(|(key, item)| out_of_range_integer(&format!("{path}.{key}"), item)),
        _ => None,
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(id) = &self.id {
            map.serialize_entry(ID_FIELD, id)?;
        }
        for (key, value) in &self.fields {
            if self.id.is_some() && key == ID_FIELD {
                continue;
            }
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}
