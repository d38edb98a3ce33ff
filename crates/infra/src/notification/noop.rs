//! Noop 通知送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! SMTP サーバーなしでフォーム送信を確認したいときに使用する。

use async_trait::async_trait;
use blastenergy_domain::notification::{DeliveryReceipt, EmailMessage, NotificationError};

use super::{NotificationSender, generate_message_id};

/// Noop 通知送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn verify(&self) -> Result<(), NotificationError> {
        Ok(())
    }

    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, NotificationError> {
        let message_id = generate_message_id("noop@localhost");
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            message_id = %message_id,
            "Noop: メール送信をスキップ"
        );
        Ok(DeliveryReceipt { message_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_emailがエラーを返さない() {
        let sender = NoopNotificationSender;
        let email = EmailMessage {
            sender_name: "Blast Energy".to_string(),
            to:          "test@example.com".to_string(),
            reply_to:    None,
            subject:     "テスト件名".to_string(),
            html_body:   "<p>テスト</p>".to_string(),
            text_body:   "テスト".to_string(),
        };

        assert!(sender.verify().await.is_ok());
        let receipt = sender.send_email(&email).await.unwrap();
        assert!(receipt.message_id.ends_with("@localhost>"));
    }
}
