//! SMTP 通知送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 本番では Hostinger の SMTP（ポート 465, 暗黙的 TLS）に、
//! 開発環境では Mailpit（ローカル SMTP サーバー）に接続する。
//!
//! コネクションプールは使用しない（lettre の `pool` feature を無効化）。
//! 接続確認と各送信はそれぞれ新しい接続で行われる。

use std::fmt;

use async_trait::async_trait;
use blastenergy_domain::notification::{DeliveryReceipt, EmailMessage, NotificationError};
use lettre::{
    Address,
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::{NotificationSender, generate_message_id};

/// SMTP 接続の暗号化方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmtpSecurity {
    /// 接続直後から TLS（SMTPS, 通常ポート 465）
    #[default]
    Tls,
    /// 平文で接続後に STARTTLS で昇格（通常ポート 587）
    StartTls,
    /// 暗号化なし（Mailpit 等のローカル SMTP 向け）
    None,
}

/// SMTP 接続設定
///
/// プロセス起動時に一度だけ構築し、送信実装に渡す。
#[derive(Clone)]
pub struct SmtpSettings {
    /// SMTP サーバーのホスト名
    pub host:         String,
    /// SMTP サーバーのポート番号
    pub port:         u16,
    /// 暗号化方式
    pub security:     SmtpSecurity,
    /// 認証ユーザー名（送信元アドレスを兼ねる）
    pub username:     String,
    /// 認証パスワード（未設定なら認証しない）
    pub password:     Option<String>,
    /// 送信元メールアドレス
    pub from_address: String,
}

// パスワードをログに出さない
impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("security", &self.security)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("from_address", &self.from_address)
            .finish()
    }
}

/// SMTP 通知送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
pub struct SmtpNotificationSender {
    transport:    AsyncSmtpTransport<Tokio1Executor>,
    from_address: Address,
}

impl SmtpNotificationSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// この時点では接続しない。接続確認は [`NotificationSender::verify`] で行う。
    ///
    /// # エラー
    ///
    /// 送信元アドレスが不正な場合、または TLS パラメータを構築できない場合は
    /// `NotificationError::InvalidConfig` を返す。
    pub fn new(settings: &SmtpSettings) -> Result<Self, NotificationError> {
        let from_address: Address = settings.from_address.parse().map_err(|e| {
            NotificationError::InvalidConfig(format!(
                "送信元アドレス不正 ({}): {e}",
                settings.from_address
            ))
        })?;

        let mut builder = match settings.security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
                .map_err(|e| NotificationError::InvalidConfig(format!("TLS 設定失敗: {e}")))?,
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host).map_err(
                    |e| NotificationError::InvalidConfig(format!("STARTTLS 設定失敗: {e}")),
                )?
            }
            // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
            SmtpSecurity::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            }
        };

        builder = builder.port(settings.port);

        if let Some(password) = &settings.password {
            builder = builder.credentials(Credentials::new(
                settings.username.clone(),
                password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from_address,
        })
    }

    /// ドメインのメールメッセージから lettre のメッセージを構築する
    fn build_message(
        &self,
        email: &EmailMessage,
        message_id: String,
    ) -> Result<Message, NotificationError> {
        let from = Mailbox::new(Some(email.sender_name.clone()), self.from_address.clone());
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| NotificationError::SendFailed(format!("宛先アドレス不正: {e}")))?;

        let mut builder = Message::builder()
            .message_id(Some(message_id))
            .from(from)
            .to(to)
            .subject(&email.subject);

        if let Some(reply_to) = &email.reply_to {
            let reply_to: Mailbox = reply_to
                .parse()
                .map_err(|e| NotificationError::SendFailed(format!("返信先アドレス不正: {e}")))?;
            builder = builder.reply_to(reply_to);
        }

        builder
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )
            .map_err(|e| NotificationError::SendFailed(format!("メッセージ構築失敗: {e}")))
    }
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn verify(&self) -> Result<(), NotificationError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(NotificationError::VerifyFailed(
                "SMTP サーバーが接続確認に応答しません".to_string(),
            )),
            Err(e) => Err(NotificationError::VerifyFailed(e.to_string())),
        }
    }

    async fn send_email(&self, email: &EmailMessage) -> Result<DeliveryReceipt, NotificationError> {
        let message_id = generate_message_id(self.from_address.as_ref());
        let message = self.build_message(email, message_id.clone())?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;

        Ok(DeliveryReceipt { message_id })
    }
}
