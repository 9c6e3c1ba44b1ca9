//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各リソースのハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - 単純な読み書きはリポジトリを直接呼び、規則を伴う操作はユースケースに委譲
//! - 成功時はドキュメントや書き込み結果をそのまま返す（エンベロープなし）

pub mod acknowledgement;
pub mod booking;
pub mod course;
pub mod health;
pub mod notice;
pub mod user;

pub use booking::{
    BookingState,
    approve_booking,
    create_booking,
    delete_booking,
    list_bookings,
    list_bookings_by_status,
};
pub use course::{
    CourseState,
    create_course,
    delete_course,
    get_course,
    list_course_summaries,
    list_courses,
};
pub use health::{ReadinessState, health_check, readiness_check, root};
pub use notice::{
    NoticeState,
    announcement,
    create_notice,
    delete_notice,
    get_notice,
    list_notices,
};
pub use user::{
    UserState,
    check_role,
    create_user,
    get_user_by_email,
    list_users,
    promote_to_student,
};

use crate::error::ApiError;

/// 空文字列のクエリパラメータを未指定として扱う
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

/// 必須のクエリパラメータを取り出す
pub(crate) fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    non_empty(value)
        .ok_or_else(|| ApiError::Validation(format!("クエリパラメータ {name} は必須です")))
}
