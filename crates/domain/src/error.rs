//! # ドメイン層エラー定義
//!
//! ドメイン値の構築時に発生するエラーを表現する。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | リクエストボディ・パラメータの形式違反 |
//! | `InvalidIdentifier` | 400 Bad Request | ObjectId として解釈できない識別子 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//!
//! ## 使用例
//!
//! ```rust
//! use academy_domain::DomainError;
//!
//! let error = DomainError::NotFound {
//!     entity_type: "Course",
//!     id:          "507f1f77bcf86cd799439011".to_string(),
//! };
//! assert_eq!(
//!     error.to_string(),
//!     "Course が見つかりません: 507f1f77bcf86cd799439011"
//! );
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - リクエストボディが JSON オブジェクトでない
    /// - 未知のロール名
    /// - 必須のクエリパラメータが欠けている
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 識別子の形式エラー
    ///
    /// 24 桁の 16 進文字列でない識別子が渡された場合に使用する。
    #[error("不正な識別子です: {0}")]
    InvalidIdentifier(String),

    /// エンティティが見つからない
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"User", "Course" など）
        entity_type: &'static str,
        /// 検索に使用したキー
        id:          String,
    },
}
