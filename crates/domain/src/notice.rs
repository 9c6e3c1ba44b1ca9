//! # お知らせ
//!
//! 講座ごと（またはカテゴリごと）に掲示されるお知らせ。
//! `noticeFor` に講座 ID を入れると、その講座の予約者向けの
//! アナウンスとして配信される。

/// 対象（講座 ID またはカテゴリタグ）のフィールド名
pub const NOTICE_FOR_FIELD: &str = "noticeFor";

define_record! {
    /// お知らせ
    pub struct Notice;
}

impl Notice {
    pub fn notice_for(&self) -> Option<&str> {
        self.0.get_str(NOTICE_FOR_FIELD)
    }
}
