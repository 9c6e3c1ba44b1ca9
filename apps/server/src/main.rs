//! # Impact Academy サーバー
//!
//! 講座予約サービスの REST API サーバー。
//!
//! ## 役割
//!
//! - **ユーザー**: サインアップ、ロール判定、受講生への変更
//! - **講座**: 一覧・登録・削除
//! - **予約**: 一覧・登録・承認・削除
//! - **お知らせ**: 一覧・登録・削除、ユーザー向けの抽出
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env から DB_USER / DB_PASS を読み込む）
//! cargo run -p academy-server
//!
//! # ローカルの MongoDB に接続
//! DATABASE_URL=mongodb://localhost:27017 PORT=5000 cargo run -p academy-server --release
//! ```
//!
//! 環境変数の一覧は [`academy_server::config`] を参照。

use std::{net::SocketAddr, sync::Arc};

use academy_infra::{
    MongoDatabaseProbe,
    db,
    repository::{
        MongoBookingRepository,
        MongoCourseRepository,
        MongoNoticeRepository,
        MongoUserRepository,
    },
};
use academy_server::{
    app::{AppDependencies, build_app},
    config::ServerConfig,
};
use academy_shared::observability::{TracingConfig, init_tracing};
use anyhow::Context as _;
use tokio::net::TcpListener;

/// サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let _tracing_guard = init_tracing(TracingConfig::from_env("academy-server")).entered();

    // 設定読み込み
    let config = ServerConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Impact Academy サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベースに接続（クライアントはプロセス全体で共有する）
    let database = db::connect(&config.database_url, &config.database_name)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました: {}", config.database_name);

    let app = build_app(AppDependencies {
        user_repository:    Arc::new(MongoUserRepository::new(&database)),
        course_repository:  Arc::new(MongoCourseRepository::new(&database)),
        booking_repository: Arc::new(MongoBookingRepository::new(&database)),
        notice_repository:  Arc::new(MongoNoticeRepository::new(&database)),
        database_probe:     Arc::new(MongoDatabaseProbe::new(&database)),
    });

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Impact Academy サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
