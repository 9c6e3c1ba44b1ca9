//! # 講座
//!
//! 講座は作成・削除のみで、更新操作は持たない。

use serde::{Deserialize, Serialize};

use crate::id::DocumentId;

/// 講座名のフィールド名
pub const NAME_FIELD: &str = "name";

define_record! {
    /// 講座
    pub struct Course;
}

impl Course {
    pub fn name(&self) -> Option<&str> {
        self.0.get_str(NAME_FIELD)
    }

    /// 名前だけに絞った要約を作成する
    pub fn summary(&self) -> CourseSummary {
        CourseSummary {
            id:   self.id(),
            name: self.name().map(str::to_string),
        }
    }
}

/// 講座の要約（`_id` と `name` のみ）
///
/// 専門分野の絞り込みドロップダウン用。その他のフィールドは決して含まない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id:   Option<DocumentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
