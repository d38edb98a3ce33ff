//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（本番・Mailpit）、Noop（SMTP なしでの動作確認用）
//! - **接続確認**: 送信前に `verify()` で接続と認証を確認する
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択

mod noop;
mod smtp;

use async_trait::async_trait;
use blastenergy_domain::notification::{DeliveryReceipt, EmailMessage, NotificationError};
use lettre::message::Mailbox;
pub use noop::NoopNotificationSender;
pub use smtp::{SmtpNotificationSender, SmtpSecurity, SmtpSettings};

/// メール送信トレイト
///
/// 通知基盤の中核。メール送信の具体的な方法を抽象化する。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// 送信先サーバーへの接続と認証を確認する
    ///
    /// 失敗した場合は `NotificationError::VerifyFailed` を返す。
    async fn verify(&self) -> Result<(), NotificationError>;

    /// メールを送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, NotificationError>;
}

/// 宛先・返信先としてそのまま使えるアドレスか
///
/// SMTP 送信時と同じく lettre の `Mailbox` として解釈し、表示名や山括弧を
/// 伴わない素のアドレスとして往復できるものだけを受け付ける。
/// `jane@example..com` のように `local@domain.tld` の形をしていても
/// メールヘッダーに書けないものは `false` になる。
pub fn is_deliverable_address(address: &str) -> bool {
    address
        .parse::<Mailbox>()
        .is_ok_and(|mailbox| mailbox.name.is_none() && mailbox.email.to_string() == address)
}

/// Message-ID を生成する
///
/// `<{UUID v7}@{送信元ドメイン}>` の形式。
pub(crate) fn generate_message_id(from_address: &str) -> String {
    let domain = from_address
        .split_once('@')
        .map_or("localhost", |(_, domain)| domain);
    format!("<{}@{}>", uuid::Uuid::now_v7(), domain)
}
