//! # メール送信ディスパッチャ
//!
//! 1 件のお問い合わせにつき、接続確認 → 事業者向け通知 → お客様向け確認の
//! 順で送信する。
//!
//! ## 設計方針
//!
//! - **全か無か**: 2 通とも送れた場合のみ成功。途中で失敗した場合は
//!   どの段階で失敗したかをエラーで区別するが、呼び出し側には部分成功を見せない
//! - **再送しない**: リトライ・バックオフ・冪等キーは持たない
//! - **逐次送信**: 2 通目は 1 通目の完了後に送る

use std::sync::Arc;

use blastenergy_domain::{
    enquiry::Enquiry,
    notification::{DeliveryReceipt, NotificationError, NotificationKind},
};
use blastenergy_infra::NotificationSender;
use thiserror::Error;

use super::{MailAddresses, TemplateRenderer};

/// 送信エラー
#[derive(Debug, Error)]
pub enum DispatchError {
    /// 本文の生成に失敗（送信前）
    #[error("メール本文の生成に失敗: {0}")]
    Template(NotificationError),

    /// 接続確認・認証に失敗（送信前）
    #[error("SMTP 接続確認に失敗: {0}")]
    Configuration(NotificationError),

    /// 事業者向け通知の送信に失敗
    #[error("事業者向け通知の送信に失敗: {0}")]
    OwnerLeg(NotificationError),

    /// お客様向け確認の送信に失敗（事業者向け通知は送信済み）
    #[error("お客様向け確認の送信に失敗（事業者向け通知 {owner_message_id} は送信済み）: {source}")]
    CustomerLeg {
        owner_message_id: String,
        source:           NotificationError,
    },
}

impl DispatchError {
    /// 送信済みの事業者向け通知の Message-ID
    pub fn owner_message_id(&self) -> Option<&str> {
        match self {
            DispatchError::CustomerLeg {
                owner_message_id, ..
            } => Some(owner_message_id),
            _ => None,
        }
    }

    /// 失敗した通知
    pub fn failed_leg(&self) -> Option<NotificationKind> {
        match self {
            DispatchError::OwnerLeg(_) => Some(NotificationKind::OwnerNotification),
            DispatchError::CustomerLeg { .. } => Some(NotificationKind::CustomerConfirmation),
            DispatchError::Template(_) | DispatchError::Configuration(_) => None,
        }
    }
}

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub owner:    DeliveryReceipt,
    pub customer: DeliveryReceipt,
}

/// メール送信ディスパッチャ
///
/// 送信実装と宛先はプロセス起動時に注入され、リクエスト間で共有される。
pub struct MailDispatcher {
    sender:    Arc<dyn NotificationSender>,
    renderer:  TemplateRenderer,
    addresses: MailAddresses,
}

impl MailDispatcher {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        renderer: TemplateRenderer,
        addresses: MailAddresses,
    ) -> Self {
        Self {
            sender,
            renderer,
            addresses,
        }
    }

    /// お問い合わせを 2 通のメールとして送信する
    pub async fn dispatch(&self, enquiry: &Enquiry) -> Result<DispatchReport, DispatchError> {
        let owner_email = self
            .renderer
            .render(NotificationKind::OwnerNotification, enquiry, &self.addresses)
            .map_err(DispatchError::Template)?;
        let customer_email = self
            .renderer
            .render(
                NotificationKind::CustomerConfirmation,
                enquiry,
                &self.addresses,
            )
            .map_err(DispatchError::Template)?;

        self.sender
            .verify()
            .await
            .map_err(DispatchError::Configuration)?;

        let owner = self
            .sender
            .send_email(&owner_email)
            .await
            .map_err(DispatchError::OwnerLeg)?;
        tracing::info!(
            notification.kind = %NotificationKind::OwnerNotification,
            message_id = %owner.message_id,
            "事業者向け通知を送信"
        );

        let customer = self
            .sender
            .send_email(&customer_email)
            .await
            .map_err(|source| DispatchError::CustomerLeg {
                owner_message_id: owner.message_id.clone(),
                source,
            })?;
        tracing::info!(
            notification.kind = %NotificationKind::CustomerConfirmation,
            message_id = %customer.message_id,
            "お客様向け確認を送信"
        );

        Ok(DispatchReport { owner, customer })
    }
}
