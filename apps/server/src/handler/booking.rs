//! # 予約ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /bookings?email=` - 予約一覧（`borough` 昇順 → 新しい順）
//! - `GET /approved-student/{status}` - ステータスが一致する予約
//! - `POST /bookings` - 予約登録
//! - `PUT /bookings/{id}` - 予約の承認
//! - `DELETE /bookings/{id}` - 予約削除

use std::sync::Arc;

use academy_domain::{booking::Booking, id::DocumentId};
use academy_infra::repository::BookingRepository;
use axum::{
    Json,
    extract::{
        Path,
        Query,
        State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;

use super::{
    acknowledgement::{DeleteAckDto, InsertAckDto, UpdateAckDto},
    non_empty,
};
use crate::{error::ApiError, usecase::BookingUseCaseImpl};

/// 予約 API の共有状態
pub struct BookingState {
    pub booking_repository: Arc<dyn BookingRepository>,
    pub usecase:            BookingUseCaseImpl,
}

/// 予約一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    pub email: Option<String>,
}

/// GET /bookings
pub async fn list_bookings(
    State(state): State<Arc<BookingState>>,
    query: Result<Query<ListBookingsQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let email = non_empty(query.email);

    let bookings = state.booking_repository.find_all(email.as_deref()).await?;

    Ok(Json(bookings))
}

/// GET /approved-student/{status}
///
/// ステータスは大文字小文字を区別して完全一致で比較する。
pub async fn list_bookings_by_status(
    State(state): State<Arc<BookingState>>,
    Path(status): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let bookings = state.booking_repository.find_by_status(&status).await?;
    Ok(Json(bookings))
}

/// POST /bookings
pub async fn create_booking(
    State(state): State<Arc<BookingState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let booking = Booking::try_from(body)?;

    let ack = state.booking_repository.insert(&booking).await?;

    Ok((StatusCode::CREATED, Json(InsertAckDto::from(ack))))
}

/// PUT /bookings/{id}
pub async fn approve_booking(
    State(state): State<Arc<BookingState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = DocumentId::parse(&id)?;

    let ack = state.usecase.approve(&id).await?;

    Ok(Json(UpdateAckDto::from(ack)))
}

/// DELETE /bookings/{id}
pub async fn delete_booking(
    State(state): State<Arc<BookingState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = DocumentId::parse(&id)?;

    let ack = state.booking_repository.delete(&id).await?;

    Ok(Json(DeleteAckDto::from(ack)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::test_utils::TestApp;

    fn emails(value: &Value) -> Vec<&str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|booking| booking["email"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_list_bookingsは地区昇順かつ新しい順に並ぶ() {
        // Arrange
        let sut = TestApp::new();
        sut.bookings
            .add(json!({ "email": "old-b@x.com", "borough": "Brooklyn" }));
        sut.bookings
            .add(json!({ "email": "old-q@x.com", "borough": "Queens" }));
        sut.bookings
            .add(json!({ "email": "new-b@x.com", "borough": "Brooklyn" }));

        // Act
        let response = sut.get("/bookings").await;

        // Assert
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            emails(&response.json()),
            vec!["new-b@x.com", "old-b@x.com", "old-q@x.com"]
        );
    }

    #[tokio::test]
    async fn test_list_bookingsはメールアドレスで絞り込める() {
        let sut = TestApp::new();
        sut.bookings.add(json!({ "email": "a@x.com", "courseId": "c1" }));
        sut.bookings.add(json!({ "email": "b@x.com", "courseId": "c1" }));
        sut.bookings.add(json!({ "email": "a@x.com", "courseId": "c2" }));

        let response = sut.get("/bookings?email=a@x.com").await;

        assert_eq!(emails(&response.json()), vec!["a@x.com", "a@x.com"]);
    }

    #[tokio::test]
    async fn test_list_bookings_by_statusは完全一致で絞り込む() {
        // Arrange
        let sut = TestApp::new();
        sut.bookings
            .add(json!({ "email": "a@x.com", "status": "Approved" }));
        sut.bookings
            .add(json!({ "email": "b@x.com", "status": "approved" }));
        sut.bookings.add(json!({ "email": "c@x.com" }));

        // Act
        let response = sut.get("/approved-student/Approved").await;

        // Assert
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(emails(&response.json()), vec!["a@x.com"]);
    }

    #[tokio::test]
    async fn test_approve_bookingでステータスがapprovedになる() {
        // Arrange
        let sut = TestApp::new();
        let id = sut
            .bookings
            .add(json!({ "email": "a@x.com", "courseId": "c1" }));

        // Act
        let response = sut.put(&format!("/bookings/{id}")).await;

        // Assert
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.json(),
            json!({
                "acknowledged": true,
                "matchedCount": 1,
                "modifiedCount": 1,
                "upsertedCount": 0,
                "upsertedId": null
            })
        );
        assert!(sut.bookings.all()[0].is_approved());
    }

    #[tokio::test]
    async fn test_approve_bookingは存在しないidで404かつ作成しない() {
        let sut = TestApp::new();

        let response = sut.put(&format!("/bookings/{}", DocumentId::new())).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert!(sut.bookings.all().is_empty());
    }

    #[tokio::test]
    async fn test_approve_bookingは不正なidで400() {
        let sut = TestApp::new();

        let response = sut.put("/bookings/12345").await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_bookingとdelete_booking() {
        // Arrange
        let sut = TestApp::new();
        let created = sut
            .post_json(
                "/bookings",
                json!({ "email": "a@x.com", "courseId": "c1", "borough": "Queens" }),
            )
            .await;
        let id = created.json()["insertedId"].as_str().unwrap().to_string();

        // Act
        let deleted = sut.delete(&format!("/bookings/{id}")).await;
        let deleted_again = sut.delete(&format!("/bookings/{id}")).await;

        // Assert
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(deleted.json()["deletedCount"], 1);
        assert_eq!(deleted_again.json()["deletedCount"], 0);
        assert!(sut.bookings.all().is_empty());
    }
}
