//! # サーバー設定
//!
//! 環境変数からサーバーの設定を読み込む。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `5000`） |
//! | `DATABASE_URL` | No | MongoDB 接続 URI（指定時は `DB_USER` / `DB_PASS` より優先） |
//! | `DB_USER` / `DB_PASS` | `DATABASE_URL` 未指定時 | Atlas の認証情報 |
//! | `DB_CLUSTER` | No | Atlas のホスト名 |
//! | `DB_NAME` | No | データベース名（デフォルト: `impactAcademy`） |
//!
//! 空文字列の環境変数は未設定として扱う。

use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_CLUSTER: &str = "cluster0.bv0gyj5.mongodb.net";
const DEFAULT_DATABASE_NAME: &str = "impactAcademy";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT は有効なポート番号である必要があります: {0}")]
    InvalidPort(String),

    #[error("DATABASE_URL または DB_USER / DB_PASS が設定されていません")]
    MissingDatabaseCredentials,
}

/// サーバーの設定
#[derive(Clone)]
pub struct ServerConfig {
    /// バインドアドレス
    pub host:          String,
    /// ポート番号
    pub port:          u16,
    /// MongoDB 接続 URI
    pub database_url:  String,
    /// データベース名
    pub database_name: String,
}

impl ServerConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let port = match var("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value.clone()))?,
            None => DEFAULT_PORT,
        };

        let database_url = match var("DATABASE_URL") {
            Some(url) => url,
            None => {
                let (Some(user), Some(pass)) = (var("DB_USER"), var("DB_PASS")) else {
                    return Err(ConfigError::MissingDatabaseCredentials);
                };
                let cluster = var("DB_CLUSTER").unwrap_or_else(|| DEFAULT_CLUSTER.to_string());
                format!("mongodb+srv://{user}:{pass}@{cluster}/?retryWrites=true&w=majority")
            }
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url,
            database_name: var("DB_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string()),
        })
    }
}

// 接続 URI には認証情報が含まれるため出力しない
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &"***")
            .field("database_name", &self.database_name)
            .finish()
    }
}
