//! # MongoDB 接続管理
//!
//! プロセス全体で共有するデータベースハンドルの作成と死活確認を行う。
//!
//! ## 接続の共有
//!
//! `mongodb::Client` は内部に接続プールを持ち、`Clone` は同じプールを共有する
//! 軽量なハンドルを返す。起動時に一度だけ作成し、各リポジトリへ
//! `Database` ハンドルとして注入する。
//!
//! ## タイムアウト
//!
//! クライアントの接続確立とサーバー選択を 3 秒で打ち切る。
//! データベースが停止している場合、起動時の接続と Readiness Check の `ping` は
//! 3 秒程度でエラーになる。リクエスト処理中の操作そのものには別途タイムアウトを設けない。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use academy_infra::db;
//!
//! async fn example() -> Result<(), academy_infra::InfraError> {
//!     let database = db::connect("mongodb://localhost:27017", "impactAcademy").await?;
//!     db::ping(&database).await?;
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use bson::doc;
use mongodb::{Client, Database, options::ClientOptions};

use crate::error::InfraError;

/// 接続確立・サーバー選択のタイムアウト
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// ユーザーコレクション名
pub const USERS_COLLECTION: &str = "users";
/// 講座コレクション名
pub const COURSES_COLLECTION: &str = "courses";
/// 予約コレクション名
pub const BOOKINGS_COLLECTION: &str = "bookings";
/// お知らせコレクション名
pub const NOTICES_COLLECTION: &str = "notices";

/// データベースに接続する
///
/// クライアントを作成し、`ping` で疎通を確認してから `Database` ハンドルを返す。
#[tracing::instrument(skip_all, fields(%database_name))]
pub async fn connect(uri: &str, database_name: &str) -> Result<Database, InfraError> {
    tracing::debug!("MongoDB クライアントを作成します");

    let database = open(uri, database_name).await?;
    ping(&database).await?;

    Ok(database)
}

/// 疎通確認をせずに `Database` ハンドルを作成する
///
/// クライアントは遅延接続のため、サーバーが停止していても成功する。
pub async fn open(uri: &str, database_name: &str) -> Result<Database, InfraError> {
    let options = tokio::time::timeout(CONNECT_TIMEOUT, ClientOptions::parse(uri))
        .await
        .map_err(|_| InfraError::unexpected("接続文字列の解決がタイムアウトしました"))??;
    let client = Client::with_options(client_options(options))?;
    Ok(client.database(database_name))
}

fn client_options(mut options: ClientOptions) -> ClientOptions {
    options.app_name = Some("impact-academy-server".to_string());
    options.connect_timeout = Some(CONNECT_TIMEOUT);
    options.server_selection_timeout = Some(CONNECT_TIMEOUT);
    options
}

/// データベースの疎通を確認する
pub async fn ping(database: &Database) -> Result<(), InfraError> {
    database.run_command(doc! { "ping": 1 }, None).await?;
    Ok(())
}

/// データベースの死活確認
///
/// Readiness Check から使用する。テストではインメモリ実装に差し替える。
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn ping(&self) -> Result<(), InfraError>;
}

/// MongoDB 実装の DatabaseProbe
#[derive(Debug, Clone)]
pub struct MongoDatabaseProbe {
    database: Database,
}

impl MongoDatabaseProbe {
    pub fn new(database: &Database) -> Self {
        Self {
            database: database.clone(),
        }
    }
}

#[async_trait]
impl DatabaseProbe for MongoDatabaseProbe {
    async fn ping(&self) -> Result<(), InfraError> {
        ping(&self.database).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn test_クライアントに接続とサーバー選択のタイムアウトが設定される() {
        let options = ClientOptions::parse("mongodb://127.0.0.1:27017").await.unwrap();

        let options = client_options(options);

        assert_eq!(options.connect_timeout, Some(CONNECT_TIMEOUT));
        assert_eq!(options.server_selection_timeout, Some(CONNECT_TIMEOUT));
    }

    #[tokio::test]
    async fn test_到達できないサーバーへのpingは数秒でエラーになる() {
        // Arrange
        let database = open("mongodb://127.0.0.1:1", "academy_test").await.unwrap();
        let sut = MongoDatabaseProbe::new(&database);
        let started = Instant::now();

        // Act
        let result = sut.ping().await;

        // Assert
        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(6));
    }
}
