//! # お知らせユースケース
//!
//! ユーザーの最新の予約に紐づく講座のお知らせを抽出する。
//!
//! 1. メールアドレスに一致する予約のうち `_id` が最大（最新）のものを取得
//! 2. その予約の `courseId` を取り出す
//! 3. `noticeFor` が `courseId` と一致するお知らせを返す
//!
//! 予約がない、または予約に `courseId` がない場合は空リストを返す。

use std::sync::Arc;

use academy_domain::notice::Notice;
use academy_infra::repository::{BookingRepository, NoticeRepository};

use crate::error::ApiError;

/// お知らせユースケースの実装
pub struct NoticeUseCaseImpl {
    booking_repository: Arc<dyn BookingRepository>,
    notice_repository:  Arc<dyn NoticeRepository>,
}

impl NoticeUseCaseImpl {
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        notice_repository: Arc<dyn NoticeRepository>,
    ) -> Self {
        Self {
            booking_repository,
            notice_repository,
        }
    }

    /// ユーザー向けのお知らせを取得する
    pub async fn announcement(&self, email: &str) -> Result<Vec<Notice>, ApiError> {
        let Some(booking) = self.booking_repository.find_latest_by_email(email).await? else {
            tracing::debug!("予約がないためお知らせは空です");
            return Ok(Vec::new());
        };

        let Some(course_id) = booking.course_id() else {
            tracing::debug!(booking_id = ?booking.id(), "予約に講座 ID がありません");
            return Ok(Vec::new());
        };

        Ok(self.notice_repository.find_all(Some(course_id)).await?)
    }
}

#[cfg(test)]
mod tests {
    use academy_infra::mock::{MockBookingRepository, MockNoticeRepository};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    struct Setup {
        sut:      NoticeUseCaseImpl,
        bookings: MockBookingRepository,
        notices:  MockNoticeRepository,
    }

    fn setup() -> Setup {
        let bookings = MockBookingRepository::new();
        let notices = MockNoticeRepository::new();
        let sut = NoticeUseCaseImpl::new(Arc::new(bookings.clone()), Arc::new(notices.clone()));
        Setup {
            sut,
            bookings,
            notices,
        }
    }

    fn texts(notices: &[Notice]) -> Vec<&str> {
        notices
            .iter()
            .filter_map(|notice| notice.as_record().get_str("text"))
            .collect()
    }

    #[tokio::test]
    async fn test_予約した講座のお知らせだけを返す() {
        // Arrange
        let s = setup();
        s.bookings
            .add(json!({ "email": "a@x.com", "courseId": "c1" }));
        s.notices.add(json!({ "noticeFor": "c1", "text": "A" }));
        s.notices.add(json!({ "noticeFor": "c2", "text": "B" }));

        // Act
        let result = s.sut.announcement("a@x.com").await.unwrap();

        // Assert
        assert_eq!(texts(&result), vec!["A"]);
    }

    #[tokio::test]
    async fn test_最新の予約の講座が使われる() {
        // Arrange
        let s = setup();
        s.bookings
            .add(json!({ "email": "a@x.com", "courseId": "old" }));
        s.bookings
            .add(json!({ "email": "a@x.com", "courseId": "new" }));
        s.bookings
            .add(json!({ "email": "other@x.com", "courseId": "other" }));
        s.notices.add(json!({ "noticeFor": "old", "text": "旧" }));
        s.notices.add(json!({ "noticeFor": "new", "text": "新" }));

        // Act
        let result = s.sut.announcement("a@x.com").await.unwrap();

        // Assert
        assert_eq!(texts(&result), vec!["新"]);
    }

    #[tokio::test]
    async fn test_予約がなければ空リスト() {
        let s = setup();
        s.notices.add(json!({ "noticeFor": "c1", "text": "A" }));

        let result = s.sut.announcement("a@x.com").await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_予約に講座idがなければ空リスト() {
        let s = setup();
        s.bookings.add(json!({ "email": "a@x.com" }));
        s.notices.add(json!({ "noticeFor": "c1", "text": "A" }));

        let result = s.sut.announcement("a@x.com").await.unwrap();

        assert!(result.is_empty());
    }
}
