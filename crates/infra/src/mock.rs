//! # テスト用モック
//!
//! ユースケース・ハンドラのテストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! blastenergy-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blastenergy_domain::notification::{DeliveryReceipt, EmailMessage, NotificationError};

use crate::notification::NotificationSender;

// ===== MockNotificationSender =====

#[derive(Debug, Default)]
struct SenderLog {
    verify_calls:  usize,
    send_attempts: usize,
    sent:          Vec<EmailMessage>,
}

/// 送信内容を記録するモック
///
/// `clone()` したインスタンス同士で記録を共有するため、
/// ユースケースに渡した後もテスト側から呼び出し回数を検証できる。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    log:          Arc<Mutex<SenderLog>>,
    fail_verify:  bool,
    fail_on_send: Option<usize>,
}

impl MockNotificationSender {
    /// 常に成功するモック
    pub fn new() -> Self {
        Self::default()
    }

    /// 接続確認が失敗するモック
    pub fn failing_verify() -> Self {
        Self {
            fail_verify: true,
            ..Self::default()
        }
    }

    /// `nth` 回目（1 始まり）の送信が失敗するモック
    pub fn failing_on_send(nth: usize) -> Self {
        Self {
            fail_on_send: Some(nth),
            ..Self::default()
        }
    }

    /// 接続確認の呼び出し回数
    pub fn verify_calls(&self) -> usize {
        self.log.lock().unwrap().verify_calls
    }

    /// 送信の試行回数（失敗を含む）
    pub fn send_attempts(&self) -> usize {
        self.log.lock().unwrap().send_attempts
    }

    /// 送信に成功したメール
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        self.log.lock().unwrap().sent.clone()
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn verify(&self) -> Result<(), NotificationError> {
        self.log.lock().unwrap().verify_calls += 1;

        if self.fail_verify {
            return Err(NotificationError::VerifyFailed(
                "535 5.7.8 Error: authentication failed: smtp.internal.example".to_string(),
            ));
        }
        Ok(())
    }

    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, NotificationError> {
        let mut log = self.log.lock().unwrap();
        log.send_attempts += 1;

        if self.fail_on_send == Some(log.send_attempts) {
            return Err(NotificationError::SendFailed(
                "SMTP 送信失敗: 421 4.4.2 mx.internal.example connection timed out".to_string(),
            ));
        }

        log.sent.push(email.clone());
        Ok(DeliveryReceipt {
            message_id: format!("<mock-{}@blastenergy.test>", log.send_attempts),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> EmailMessage {
        EmailMessage {
            sender_name: "Blast Energy".to_string(),
            to:          to.to_string(),
            reply_to:    None,
            subject:     "件名".to_string(),
            html_body:   "<p>本文</p>".to_string(),
            text_body:   "本文".to_string(),
        }
    }

    #[tokio::test]
    async fn cloneしたモック同士で記録を共有する() {
        let sender = MockNotificationSender::new();
        let cloned = sender.clone();

        cloned.verify().await.unwrap();
        cloned.send_email(&email("a@example.com")).await.unwrap();

        assert_eq!(sender.verify_calls(), 1);
        assert_eq!(sender.sent_emails().len(), 1);
    }

    #[tokio::test]
    async fn 指定した回の送信だけが失敗する() {
        let sender = MockNotificationSender::failing_on_send(2);

        assert!(sender.send_email(&email("a@example.com")).await.is_ok());
        assert!(sender.send_email(&email("b@example.com")).await.is_err());

        assert_eq!(sender.send_attempts(), 2);
        assert_eq!(sender.sent_emails().len(), 1);
        assert_eq!(sender.sent_emails()[0].to, "a@example.com");
    }
}
