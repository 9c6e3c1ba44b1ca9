//! # 予約ユースケース
//!
//! 予約の承認を扱う。状態遷移は 未承認 → 承認済み の一方向のみ。

use std::sync::Arc;

use academy_domain::{DomainError, id::DocumentId};
use academy_infra::repository::{BookingRepository, UpdateAck};

use crate::error::ApiError;

/// 予約ユースケースの実装
pub struct BookingUseCaseImpl {
    booking_repository: Arc<dyn BookingRepository>,
}

impl BookingUseCaseImpl {
    pub fn new(booking_repository: Arc<dyn BookingRepository>) -> Self {
        Self { booking_repository }
    }

    /// 予約を承認する
    ///
    /// 存在しない ID は `NotFound`。ドキュメントは作成しない。
    /// 承認済みの予約を再度承認しても成功する（変更件数 0）。
    pub async fn approve(&self, id: &DocumentId) -> Result<UpdateAck, ApiError> {
        let ack = self.booking_repository.approve(id).await?;

        if ack.matched_count == 0 {
            return Err(DomainError::NotFound {
                entity_type: "予約",
                id:          id.to_hex(),
            }
            .into());
        }

        tracing::info!(%id, modified = ack.modified_count, "予約を承認しました");
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use academy_infra::mock::MockBookingRepository;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn setup() -> (BookingUseCaseImpl, MockBookingRepository) {
        let repo = MockBookingRepository::new();
        let sut = BookingUseCaseImpl::new(Arc::new(repo.clone()));
        (sut, repo)
    }

    #[tokio::test]
    async fn test_approveで未承認の予約が承認済みになる() {
        // Arrange
        let (sut, repo) = setup();
        let id = repo.add(json!({ "email": "a@x.com", "courseId": "c1" }));

        // Act
        let ack = sut.approve(&id).await.unwrap();

        // Assert
        assert_eq!(ack.matched_count, 1);
        assert_eq!(ack.modified_count, 1);
        let bookings = repo.all();
        assert!(bookings[0].is_approved());
        assert_eq!(bookings[0].course_id(), Some("c1"));
    }

    #[tokio::test]
    async fn test_approveは承認済みの予約でも成功する() {
        let (sut, repo) = setup();
        let id = repo.add(json!({ "email": "a@x.com", "status": "Approved" }));

        let ack = sut.approve(&id).await.unwrap();

        assert_eq!(ack.matched_count, 1);
        assert_eq!(ack.modified_count, 0);
    }

    #[tokio::test]
    async fn test_approveは存在しないidでnot_foundを返しドキュメントを作らない() {
        // Arrange
        let (sut, repo) = setup();
        repo.add(json!({ "email": "a@x.com" }));

        // Act
        let result = sut.approve(&DocumentId::new()).await;

        // Assert
        assert!(matches!(result, Err(ApiError::NotFound(_))));
        assert_eq!(repo.all().len(), 1);
        assert!(!repo.all()[0].is_approved());
    }
}
