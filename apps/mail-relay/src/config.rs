//! # Mail Relay 設定
//!
//! 環境変数から Mail Relay サーバーの設定を読み込む。
//! 設定はプロセス起動時に一度だけ構築し、リクエスト処理中には読み直さない。
//!
//! 読み込みは lookup 関数を経由するため、テストではプロセスの環境変数に
//! 触れずに任意の値を注入できる。

use blastenergy_infra::{SmtpSecurity, SmtpSettings, is_deliverable_address};
use thiserror::Error;

/// お問い合わせフォームを設置しているオリジン
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://blastenergy.com.au",
    "https://www.blastenergy.com.au",
    "https://blast-energy.vercel.app",
    "http://localhost:3000",
    "http://localhost:8000",
    "http://localhost:8001",
    "http://localhost:8002",
];

const DEFAULT_MAILBOX: &str = "info@blastenergy.com.au";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 数値として解釈できない
    #[error("{name} は有効なポート番号である必要があります: {value:?}")]
    InvalidPort { name: &'static str, value: String },

    /// 列挙値として解釈できない
    #[error("{name} の値が不正です: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    /// 送信元・送信先としてメールヘッダーに書けない
    #[error("{name} はメールアドレスである必要があります: {value:?}")]
    InvalidMailbox { name: &'static str, value: String },
}

/// メール送信の実装
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationBackend {
    /// SMTP サーバー経由で送信する
    #[default]
    Smtp,
    /// 送信せずログのみ出力する
    Noop,
}

/// SMTP 接続設定
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host:     String,
    pub port:     u16,
    /// 認証ユーザー名。送信元アドレスを兼ねる
    pub username: String,
    /// 未設定なら認証しない
    pub password: Option<String>,
    pub security: SmtpSecurity,
}

impl SmtpConfig {
    /// infra 層の接続設定に変換する
    pub fn to_settings(&self) -> SmtpSettings {
        SmtpSettings {
            host:         self.host.clone(),
            port:         self.port,
            security:     self.security,
            username:     self.username.clone(),
            password:     self.password.clone(),
            from_address: self.username.clone(),
        }
    }
}

/// Mail Relay サーバーの設定
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// バインドアドレス
    pub host:            String,
    /// ポート番号
    pub port:            u16,
    pub smtp:            SmtpConfig,
    /// 事業者向け通知の送信先
    pub owner_email:     String,
    pub backend:         NotificationBackend,
    /// CORS で許可するオリジン（完全一致）
    pub allowed_origins: Vec<String>,
}

impl RelayConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の lookup 関数から設定を読み込む
    ///
    /// 空文字の変数は未設定として扱う。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let var_or = |name: &str, default: &str| var(name).unwrap_or_else(|| default.to_string());

        Ok(Self {
            host:            var_or("RELAY_HOST", "0.0.0.0"),
            port:            parse_port("RELAY_PORT", var("RELAY_PORT"), 8080)?,
            smtp:            SmtpConfig {
                host:     var_or("SMTP_HOST", "smtp.hostinger.com"),
                port:     parse_port("SMTP_PORT", var("SMTP_PORT"), 465)?,
                username: parse_mailbox("SMTP_USER", var_or("SMTP_USER", DEFAULT_MAILBOX))?,
                password: var("SMTP_PASS"),
                security: parse_security(var("SMTP_SECURE"))?,
            },
            owner_email:     parse_mailbox("OWNER_EMAIL", var_or("OWNER_EMAIL", DEFAULT_MAILBOX))?,
            backend:         parse_backend(var("NOTIFICATION_BACKEND"))?,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| (*origin).to_string())
                .collect(),
        })
    }
}

fn parse_port(name: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort { name, value }),
    }
}

fn parse_mailbox(name: &'static str, value: String) -> Result<String, ConfigError> {
    if is_deliverable_address(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidMailbox { name, value })
    }
}

fn parse_security(value: Option<String>) -> Result<SmtpSecurity, ConfigError> {
    let Some(value) = value else {
        return Ok(SmtpSecurity::Tls);
    };

    match value.to_ascii_lowercase().as_str() {
        "true" | "tls" => Ok(SmtpSecurity::Tls),
        "false" | "starttls" => Ok(SmtpSecurity::StartTls),
        "none" => Ok(SmtpSecurity::None),
        _ => Err(ConfigError::InvalidValue {
            name: "SMTP_SECURE",
            value,
        }),
    }
}

fn parse_backend(value: Option<String>) -> Result<NotificationBackend, ConfigError> {
    match value.as_deref() {
        None | Some("smtp") => Ok(NotificationBackend::Smtp),
        Some("noop") => Ok(NotificationBackend::Noop),
        Some(other) => Err(ConfigError::InvalidValue {
            name:  "NOTIFICATION_BACKEND",
            value: other.to_string(),
        }),
    }
}
