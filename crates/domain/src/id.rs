//! # ドキュメント識別子
//!
//! MongoDB の `ObjectId` をラップした識別子型。
//! JSON 上では 24 桁の 16 進文字列として表現する。

use std::{cmp::Ordering, str::FromStr};

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::DomainError;

/// ドキュメント識別子
///
/// 順序は ObjectId のバイト列順（生成時刻 → カウンタ）で、
/// 新しく生成された ID ほど大きい。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("{_0}")]
pub struct DocumentId(ObjectId);

impl DocumentId {
    /// 新しい ID を生成する
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// 16 進文字列から ID をパースする
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        ObjectId::parse_str(value)
            .map(Self)
            .map_err(|_| DomainError::InvalidIdentifier(value.to_string()))
    }

    /// 既存の ObjectId から ID を作成する
    pub fn from_object_id(oid: ObjectId) -> Self {
        Self(oid)
    }

    /// 内部の ObjectId を取得する
    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }

    /// 16 進文字列表現を取得する
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for DocumentId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialOrd for DocumentId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DocumentId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.bytes().cmp(&other.0.bytes())
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}
