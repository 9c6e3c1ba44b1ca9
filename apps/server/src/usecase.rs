//! # ユースケース層
//!
//! リソース操作のうち、単純な読み書き以外の規則を実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: 一覧・取得・挿入・削除はハンドラからリポジトリを直接呼ぶ。
//!   ロール判定、予約承認、お知らせの抽出だけをここに置く
//!
//! ## モジュール構成
//!
//! - `user`: ロール判定、受講生への変更
//! - `booking`: 予約の承認
//! - `notice`: 最新の予約に基づくお知らせの抽出

pub mod booking;
pub mod notice;
pub mod user;

pub use booking::BookingUseCaseImpl;
pub use notice::NoticeUseCaseImpl;
pub use user::UserUseCaseImpl;
