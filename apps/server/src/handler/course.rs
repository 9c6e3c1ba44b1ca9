//! # 講座ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /courses` - 講座一覧
//! - `GET /coursesSpecialty` - 講座の要約一覧（`_id` と `name` のみ）
//! - `POST /courses` - 講座登録
//! - `GET /courses/{id}` - 講座取得
//! - `DELETE /courses/{id}` - 講座削除（予約・お知らせは残る）

use std::sync::Arc;

use academy_domain::{DomainError, course::Course, id::DocumentId};
use academy_infra::repository::CourseRepository;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;

use super::acknowledgement::{DeleteAckDto, InsertAckDto};
use crate::error::ApiError;

/// 講座 API の共有状態
pub struct CourseState {
    pub course_repository: Arc<dyn CourseRepository>,
}

/// GET /courses
pub async fn list_courses(
    State(state): State<Arc<CourseState>>,
) -> Result<impl IntoResponse, ApiError> {
    let courses = state.course_repository.find_all().await?;
    Ok(Json(courses))
}

/// GET /coursesSpecialty
pub async fn list_course_summaries(
    State(state): State<Arc<CourseState>>,
) -> Result<impl IntoResponse, ApiError> {
    let summaries = state.course_repository.find_summaries().await?;
    Ok(Json(summaries))
}

/// POST /courses
pub async fn create_course(
    State(state): State<Arc<CourseState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    let course = Course::try_from(body)?;

    let ack = state.course_repository.insert(&course).await?;

    Ok((StatusCode::CREATED, Json(InsertAckDto::from(ack))))
}

/// GET /courses/{id}
pub async fn get_course(
    State(state): State<Arc<CourseState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = DocumentId::parse(&id)?;

    let course = state
        .course_repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity_type: "講座",
            id:          id.to_hex(),
        })?;

    Ok(Json(course))
}

/// DELETE /courses/{id}
///
/// 存在しない ID でもエラーにせず、`deletedCount: 0` を返す。
pub async fn delete_course(
    State(state): State<Arc<CourseState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = DocumentId::parse(&id)?;

    let ack = state.course_repository.delete(&id).await?;

    Ok(Json(DeleteAckDto::from(ack)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use academy_domain::course::CourseSummary;
    use academy_infra::{InfraError, repository::{DeleteAck, InsertAck}};
    use async_trait::async_trait;
    use axum::{Router, routing::get};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{TestApp, TestResponse};

    #[tokio::test]
    async fn test_list_coursesは全フィールドを返す() {
        // Arrange
        let sut = TestApp::new();
        let id = sut
            .courses
            .add(json!({ "name": "Rust 入門", "price": 100, "seats": 20 }));

        // Act
        let response = sut.get("/courses").await;

        // Assert
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.json(),
            json!([{ "_id": id.to_hex(), "name": "Rust 入門", "price": 100, "seats": 20 }])
        );
    }

    #[tokio::test]
    async fn test_list_course_summariesはidと名前だけを返す() {
        // Arrange
        let sut = TestApp::new();
        let first = sut.courses.add(json!({ "name": "Rust 入門", "price": 100 }));
        let second = sut.courses.add(json!({ "description": "名前なし" }));

        // Act
        let response = sut.get("/coursesSpecialty").await;

        // Assert
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.json(),
            json!([
                { "_id": first.to_hex(), "name": "Rust 入門" },
                { "_id": second.to_hex() }
            ])
        );
    }

    #[tokio::test]
    async fn test_create_courseで登録した講座をidで取得できる() {
        // Arrange
        let sut = TestApp::new();

        // Act
        let created = sut
            .post_json("/courses", json!({ "name": "データ分析", "level": "beginner" }))
            .await;
        let id = created.json()["insertedId"].as_str().unwrap().to_string();
        let fetched = sut.get(&format!("/courses/{id}")).await;

        // Assert
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(fetched.status, StatusCode::OK);
        assert_eq!(
            fetched.json(),
            json!({ "_id": id, "name": "データ分析", "level": "beginner" })
        );
    }

    #[tokio::test]
    async fn test_create_courseはボディの不正な_idを拒否する() {
        let sut = TestApp::new();

        let response = sut
            .post_json("/courses", json!({ "_id": "not-an-id", "name": "x" }))
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(sut.courses.all().is_empty());
    }

    #[tokio::test]
    async fn test_create_courseはbsonに収まらない整数を400で拒否する() {
        let sut = TestApp::new();

        let response = sut
            .post_json(
                "/courses",
                json!({ "name": "x", "seats": 9_223_372_036_854_775_808_u64 }),
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(
            response.json()["type"]
                .as_str()
                .unwrap()
                .ends_with("/validation-error")
        );
        assert!(sut.courses.all().is_empty());
    }

    #[tokio::test]
    async fn test_get_courseは不正なidで400() {
        let sut = TestApp::new();

        let response = sut.get("/courses/xyz").await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert!(
            response.json()["type"]
                .as_str()
                .unwrap()
                .ends_with("/invalid-identifier-format")
        );
    }

    #[tokio::test]
    async fn test_get_courseは存在しなければ404() {
        let sut = TestApp::new();

        let response = sut.get(&format!("/courses/{}", DocumentId::new())).await;

        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_courseは一件だけ削除し予約とお知らせを残す() {
        // Arrange
        let sut = TestApp::new();
        let target = sut.courses.add(json!({ "name": "削除対象" }));
        sut.courses.add(json!({ "name": "残す講座" }));
        sut.bookings
            .add(json!({ "email": "a@x.com", "courseId": target.to_hex() }));
        sut.notices
            .add(json!({ "noticeFor": target.to_hex(), "text": "休講" }));

        // Act
        let response = sut.delete(&format!("/courses/{target}")).await;

        // Assert
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            response.json(),
            json!({ "acknowledged": true, "deletedCount": 1 })
        );
        let remaining = sut.courses.all();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name(), Some("残す講座"));
        assert_eq!(sut.bookings.all().len(), 1);
        assert_eq!(sut.notices.all().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_courseは存在しないidでdeleted_count0() {
        let sut = TestApp::new();

        let response = sut.delete(&format!("/courses/{}", DocumentId::new())).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json()["deletedCount"], 0);
    }

    // ===== ストレージ障害 =====

    struct FailingCourseRepository;

    #[async_trait]
    impl CourseRepository for FailingCourseRepository {
        async fn find_all(&self) -> Result<Vec<Course>, InfraError> {
            Err(InfraError::unexpected("接続が切断されました"))
        }

        async fn find_summaries(&self) -> Result<Vec<CourseSummary>, InfraError> {
            Err(InfraError::unexpected("接続が切断されました"))
        }

        async fn find_by_id(&self, _id: &DocumentId) -> Result<Option<Course>, InfraError> {
            Err(InfraError::unexpected("接続が切断されました"))
        }

        async fn insert(&self, _course: &Course) -> Result<InsertAck, InfraError> {
            Err(InfraError::unexpected("接続が切断されました"))
        }

        async fn delete(&self, _id: &DocumentId) -> Result<DeleteAck, InfraError> {
            Err(InfraError::unexpected("接続が切断されました"))
        }
    }

    #[tokio::test]
    async fn test_ストレージエラーは500で詳細を返さない() {
        // Arrange
        let state = Arc::new(CourseState {
            course_repository: Arc::new(FailingCourseRepository),
        });
        let router = Router::new()
            .route("/courses", get(list_courses))
            .with_state(state);

        // Act
        let response = TestResponse::send(router, "GET", "/courses", None).await;

        // Assert
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json()["detail"], "内部エラーが発生しました");
        assert!(!response.text().contains("切断"));
    }
}
