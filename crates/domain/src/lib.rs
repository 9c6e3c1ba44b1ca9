//! # Impact Academy ドメイン層
//!
//! 講座予約サービスのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! 保存されるドキュメントはスキーマを持たない（クライアントが送った JSON を
//! そのまま保存する）。ドメイン層はサーバーが実際に解釈するフィールド
//! （フィルタ・ソートに使うもの）だけを型付きアクセサとして公開し、
//! それ以外のフィールドは [`record::Record`] に保持したまま素通しする。
//!
//! ## 依存関係の方向
//!
//! ```text
//! server → infra → domain
//!    ↘       ↘
//!      shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメインエラー
//! - [`id`] - ドキュメント識別子（ObjectId）
//! - [`record`] - スキーマレスなドキュメント本体
//! - [`user`] / [`course`] / [`booking`] / [`notice`] - 4 つのリソース
//!
//! ## 使用例
//!
//! ```rust
//! use academy_domain::{id::DocumentId, DomainError};
//!
//! let id = DocumentId::parse("507f1f77bcf86cd799439011").unwrap();
//! assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
//!
//! assert!(matches!(
//!     DocumentId::parse("not-an-id"),
//!     Err(DomainError::InvalidIdentifier(_))
//! ));
//! ```

#[macro_use]
mod macros;

pub mod booking;
pub mod course;
pub mod error;
pub mod id;
pub mod notice;
pub mod record;
pub mod user;

pub use error::DomainError;
