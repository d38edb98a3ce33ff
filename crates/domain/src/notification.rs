//! # 通知
//!
//! お問い合わせに伴うメール通知のドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`EmailMessage`] | メールメッセージ | テンプレートレンダリングの出力。送信実装に渡される |
//! | [`DeliveryReceipt`] | 送信受領 | 送信した 1 通の Message-ID |
//! | [`NotificationKind`] | 通知種別 | 事業者向け通知 / お客様向け確認 |
//!
//! ## 設計方針
//!
//! - **接続確認と送信の分離**: 接続確認の失敗（設定エラー）と個別送信の失敗を
//!   別のバリアントで表現する
//! - **テンプレート分離**: メール生成は mail-relay の TemplateRenderer が担当する

use strum::IntoStaticStr;
use thiserror::Error;

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// SMTP 設定が不正（トランスポートを構築できない）
    #[error("SMTP 設定が不正: {0}")]
    InvalidConfig(String),

    /// SMTP サーバーへの接続確認・認証に失敗
    #[error("SMTP 接続確認に失敗: {0}")]
    VerifyFailed(String),

    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 通知種別
///
/// 1 件のお問い合わせにつき、この順序で 1 通ずつ送信する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    /// 事業者向け: 新規お問い合わせの通知
    OwnerNotification,
    /// お客様向け: 受付確認
    CustomerConfirmation,
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡される。
/// 送信元アドレスは送信実装が保持し、表示名のみをメッセージ毎に指定する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信元の表示名（例: "Blast Energy Website"）
    pub sender_name: String,
    /// 送信先メールアドレス
    pub to:          String,
    /// 返信先メールアドレス
    pub reply_to:    Option<String>,
    /// 件名
    pub subject:     String,
    /// HTML 本文
    pub html_body:   String,
    /// プレーンテキスト本文
    pub text_body:   String,
}

/// 送信受領
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// 送信したメッセージの Message-ID
    pub message_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_通知種別の文字列変換() {
        assert_eq!(
            NotificationKind::OwnerNotification.to_string(),
            "owner_notification"
        );
        let kind: &'static str = NotificationKind::CustomerConfirmation.into();
        assert_eq!(kind, "customer_confirmation");
    }

    #[test]
    fn test_エラーメッセージに詳細が含まれる() {
        let error = NotificationError::VerifyFailed("535 authentication failed".to_string());
        assert_eq!(
            error.to_string(),
            "SMTP 接続確認に失敗: 535 authentication failed"
        );
    }
}
