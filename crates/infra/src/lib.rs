//! # Blast Energy インフラ層
//!
//! 外部システム（SMTP サーバー）との通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! ドメイン層で定義されたメールメッセージを受け取り、具体的な送信手段に
//! 変換する。送信手段は [`notification::NotificationSender`] trait で抽象化し、
//! ユースケース層は具象型に依存しない。
//!
//! ## 依存関係
//!
//! ```text
//! mail-relay → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`notification`] - メール送信 trait と SMTP / Noop 実装
//! - `mock` - テスト用モック（`test-utils` feature）

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;

pub use notification::{
    NoopNotificationSender,
    NotificationSender,
    SmtpNotificationSender,
    SmtpSecurity,
    SmtpSettings,
    is_deliverable_address,
};
