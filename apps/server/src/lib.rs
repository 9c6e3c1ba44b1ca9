//! # Impact Academy サーバー
//!
//! 講座予約サービスの REST API。ルーター構築・ハンドラ・ユースケースを公開する。
//! `main.rs` は設定の読み込みとインフラ初期化、サーバー起動だけを行う。

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

// テストユーティリティ（内部実装、ドキュメントからは隠す）
#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;
