//! # アプリケーション構築
//!
//! 依存コンポーネント（リポジトリ・死活確認）を受け取り、State とルーターを組み立てる。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! 認証・認可は行わない（ロールは保存されるだけで、どのエンドポイントも誰でも呼べる）。

use std::sync::Arc;

use academy_infra::{
    DatabaseProbe,
    repository::{BookingRepository, CourseRepository, NoticeRepository, UserRepository},
};
use axum::{
    Router,
    routing::{get, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handler::{
        BookingState,
        CourseState,
        NoticeState,
        ReadinessState,
        UserState,
        announcement,
        approve_booking,
        check_role,
        create_booking,
        create_course,
        create_notice,
        create_user,
        delete_booking,
        delete_course,
        delete_notice,
        get_course,
        get_notice,
        get_user_by_email,
        health_check,
        list_bookings,
        list_bookings_by_status,
        list_course_summaries,
        list_courses,
        list_notices,
        list_users,
        promote_to_student,
        readiness_check,
        root,
    },
    usecase::{BookingUseCaseImpl, NoticeUseCaseImpl, UserUseCaseImpl},
};

/// ルーター構築に必要な依存コンポーネント
pub struct AppDependencies {
    pub user_repository:    Arc<dyn UserRepository>,
    pub course_repository:  Arc<dyn CourseRepository>,
    pub booking_repository: Arc<dyn BookingRepository>,
    pub notice_repository:  Arc<dyn NoticeRepository>,
    pub database_probe:     Arc<dyn DatabaseProbe>,
}

/// State の初期化とルーター定義を行う
pub fn build_app(deps: AppDependencies) -> Router {
    let readiness_state = Arc::new(ReadinessState {
        database_probe: deps.database_probe,
    });

    let user_state = Arc::new(UserState {
        usecase:         UserUseCaseImpl::new(deps.user_repository.clone()),
        user_repository: deps.user_repository,
    });

    let course_state = Arc::new(CourseState {
        course_repository: deps.course_repository,
    });

    let booking_state = Arc::new(BookingState {
        usecase:            BookingUseCaseImpl::new(deps.booking_repository.clone()),
        booking_repository: deps.booking_repository.clone(),
    });

    // お知らせの抽出は予約を参照する
    let notice_state = Arc::new(NoticeState {
        usecase:           NoticeUseCaseImpl::new(
            deps.booking_repository,
            deps.notice_repository.clone(),
        ),
        notice_repository: deps.notice_repository,
    });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        // ユーザー API
        .merge(
            Router::new()
                .route(
                    "/users",
                    get(list_users).post(create_user).put(promote_to_student),
                )
                .route("/users/{email}", get(get_user_by_email))
                .route("/users/{role}/{email}", get(check_role))
                .with_state(user_state),
        )
        // 講座 API
        .merge(
            Router::new()
                .route("/courses", get(list_courses).post(create_course))
                .route("/coursesSpecialty", get(list_course_summaries))
                .route("/courses/{id}", get(get_course).delete(delete_course))
                .with_state(course_state),
        )
        // 予約 API
        .merge(
            Router::new()
                .route("/bookings", get(list_bookings).post(create_booking))
                .route("/approved-student/{status}", get(list_bookings_by_status))
                .route("/bookings/{id}", put(approve_booking).delete(delete_booking))
                .with_state(booking_state),
        )
        // お知らせ API
        .merge(
            Router::new()
                .route("/notices", get(list_notices).post(create_notice))
                .route("/notices/{id}", get(get_notice).delete(delete_notice))
                .route("/announcement", get(announcement))
                .with_state(notice_state),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
