//! # テストユーティリティ
//!
//! インメモリリポジトリで組み立てたルーターに、リクエストを 1 件ずつ送る。
//!
//! ```ignore
//! use academy_server::test_utils::TestApp;
//!
//! let app = TestApp::new();
//! app.courses.add(serde_json::json!({ "name": "Rust 入門" }));
//! let response = app.get("/courses").await;
//! assert_eq!(response.status, StatusCode::OK);
//! ```

use std::sync::Arc;

use academy_infra::mock::{
    MockBookingRepository,
    MockCourseRepository,
    MockDatabaseProbe,
    MockNoticeRepository,
    MockUserRepository,
};
use axum::{
    Router,
    body::{Body, Bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use crate::app::{AppDependencies, build_app};

/// インメモリリポジトリを注入したアプリケーション
///
/// 各リポジトリはルーターと状態を共有しているため、テストから直接
/// データを投入・確認できる。
pub struct TestApp {
    pub users:    MockUserRepository,
    pub courses:  MockCourseRepository,
    pub bookings: MockBookingRepository,
    pub notices:  MockNoticeRepository,
    router:       Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_probe(MockDatabaseProbe::healthy())
    }

    pub fn with_probe(probe: MockDatabaseProbe) -> Self {
        let users = MockUserRepository::new();
        let courses = MockCourseRepository::new();
        let bookings = MockBookingRepository::new();
        let notices = MockNoticeRepository::new();

        let router = build_app(AppDependencies {
            user_repository:    Arc::new(users.clone()),
            course_repository:  Arc::new(courses.clone()),
            booking_repository: Arc::new(bookings.clone()),
            notice_repository:  Arc::new(notices.clone()),
            database_probe:     Arc::new(probe),
        });

        Self {
            users,
            courses,
            bookings,
            notices,
            router,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        TestResponse::send(self.router.clone(), "GET", uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        TestResponse::send(self.router.clone(), "POST", uri, Some(body.to_string())).await
    }

    /// JSON として正しくないボディを送る場合に使う
    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        TestResponse::send(self.router.clone(), "POST", uri, Some(body.to_string())).await
    }

    pub async fn put(&self, uri: &str) -> TestResponse {
        TestResponse::send(self.router.clone(), "PUT", uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        TestResponse::send(self.router.clone(), "DELETE", uri, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// レスポンスのステータスとボディ
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body:   Bytes,
}

impl TestResponse {
    /// 任意のルーターにリクエストを送る
    ///
    /// ボディがある場合は `content-type: application/json` を付ける。
    pub async fn send(router: Router, method: &str, uri: &str, body: Option<String>) -> Self {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .expect("テスト用リクエストを組み立てられること");

        let response = router
            .oneshot(request)
            .await
            .expect("ルーターはエラーを返さないこと");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("レスポンスボディを読み取れること");

        Self { status, body }
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("レスポンスボディが JSON であること")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
