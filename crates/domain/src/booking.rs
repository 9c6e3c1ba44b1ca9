//! # 予約
//!
//! 学生が講座を予約し、管理者が承認する。
//!
//! ## 状態遷移
//!
//! ```text
//! 作成（status 未設定） ──承認──→ Approved
//! ```
//!
//! 一方向のみで、却下・取り消しの状態は持たない。
//! `status` には運用上ほかの文字列が入っていることもあり、そのまま保持する。

/// 予約者メールアドレスのフィールド名
pub const EMAIL_FIELD: &str = "email";
/// 予約対象の講座 ID のフィールド名
pub const COURSE_ID_FIELD: &str = "courseId";
/// 予約ステータスのフィールド名
pub const STATUS_FIELD: &str = "status";

/// 承認済みステータス
pub const APPROVED: &str = "Approved";

define_record! {
    /// 予約
    pub struct Booking;
}

impl Booking {
    pub fn email(&self) -> Option<&str> {
        self.0.get_str(EMAIL_FIELD)
    }

    /// 予約対象の講座 ID
    ///
    /// 講座の `_id` を参照する想定だが、外部キー制約はない。
    pub fn course_id(&self) -> Option<&str> {
        self.0.get_str(COURSE_ID_FIELD)
    }

    pub fn status(&self) -> Option<&str> {
        self.0.get_str(STATUS_FIELD)
    }

    pub fn is_approved(&self) -> bool {
        self.status() == Some(APPROVED)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_作成直後の予約は未承認() {
        let booking = Booking::try_from(json!({
            "email": "a@x.com",
            "courseId": "c1"
        }))
        .unwrap();

        assert_eq!(booking.status(), None);
        assert!(!booking.is_approved());
        assert_eq!(booking.course_id(), Some("c1"));
    }

    #[test]
    fn test_ステータスがapprovedなら承認済み() {
        let booking = Booking::try_from(json!({
            "email": "a@x.com",
            "status": "Approved"
        }))
        .unwrap();

        assert!(booking.is_approved());
    }

    #[test]
    fn test_大文字小文字が異なるステータスは承認済みではない() {
        let booking = Booking::try_from(json!({ "status": "approved" })).unwrap();

        assert!(!booking.is_approved());
    }
}
