//! # Impact Academy インフラ層
//!
//! MongoDB との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: プロセス全体で共有する `mongodb::Client` の生成
//! - **ドキュメント変換**: ドメインの [`Record`](academy_domain::record::Record)
//!   と BSON ドキュメントの相互変換
//! - **リポジトリ実装**: コレクションごとのリポジトリトレイトと MongoDB 実装
//!
//! ## モジュール構成
//!
//! - [`db`] - 接続管理と死活確認
//! - [`document`] - Record ⇔ BSON 変換
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - `mock` - インメモリ実装（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use academy_infra::{db, repository::MongoCourseRepository};
//!
//! async fn setup() -> Result<(), academy_infra::InfraError> {
//!     let database = db::connect("mongodb://localhost:27017", "impactAcademy").await?;
//!     let courses = MongoCourseRepository::new(&database);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod document;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use db::{DatabaseProbe, MongoDatabaseProbe};
pub use error::{InfraError, InfraErrorKind};
