//! # お問い合わせ受付ユースケース
//!
//! 送信フォームの判定 → メール送信を行い、各段階をビジネスイベントとして記録する。
//!
//! 形式検証を通過しても SMTP ヘッダーに書けないアドレスは、接続確認より前に
//! 形式不正として却下する。

use async_trait::async_trait;
use blastenergy_domain::{
    DomainError,
    enquiry::{EnquiryForm, Screening},
};
use blastenergy_infra::is_deliverable_address;
use blastenergy_shared::{event_log::event, log_business_event};

use super::{DispatchReport, EnquiryUseCase, MailDispatcher};
use crate::error::RelayError;

/// 受付結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 2 通とも送信した
    Delivered(DispatchReport),
    /// ハニーポットに値があったため送信せずに破棄した
    SpamSuppressed,
}

pub struct EnquiryUseCaseImpl {
    dispatcher: MailDispatcher,
}

impl EnquiryUseCaseImpl {
    pub fn new(dispatcher: MailDispatcher) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EnquiryUseCase for EnquiryUseCaseImpl {
    async fn submit(&self, form: EnquiryForm) -> Result<SubmissionOutcome, RelayError> {
        let screening = match form.screen() {
            Screening::Accepted(enquiry) if !is_deliverable_address(enquiry.email().as_str()) => {
                Screening::Rejected(DomainError::InvalidEmail)
            }
            screening => screening,
        };
        let screening_kind: &'static str = (&screening).into();

        let enquiry = match screening {
            Screening::Accepted(enquiry) => enquiry,
            Screening::Spam => {
                log_business_event!(
                    event.category = event::category::ENQUIRY,
                    event.action = event::action::ENQUIRY_SPAM_SUPPRESSED,
                    event.result = event::result::SUCCESS,
                    enquiry.screening = screening_kind,
                    "ハニーポットに値があるため送信せずに破棄"
                );
                return Ok(SubmissionOutcome::SpamSuppressed);
            }
            Screening::Rejected(e) => {
                log_business_event!(
                    event.category = event::category::ENQUIRY,
                    event.action = event::action::ENQUIRY_REJECTED,
                    event.result = event::result::FAILURE,
                    enquiry.screening = screening_kind,
                    reason = %e,
                    "お問い合わせを却下"
                );
                return Err(e.into());
            }
        };

        log_business_event!(
            event.category = event::category::ENQUIRY,
            event.action = event::action::ENQUIRY_ACCEPTED,
            event.result = event::result::SUCCESS,
            enquiry.screening = screening_kind,
            enquiry.service_type = enquiry.service_type(),
            "お問い合わせを受理"
        );

        match self.dispatcher.dispatch(&enquiry).await {
            Ok(report) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::ENQUIRY_DISPATCHED,
                    event.result = event::result::SUCCESS,
                    owner_message_id = %report.owner.message_id,
                    customer_message_id = %report.customer.message_id,
                    "お問い合わせメールを送信"
                );
                Ok(SubmissionOutcome::Delivered(report))
            }
            Err(e) => {
                let failed_leg: Option<&'static str> = e.failed_leg().map(Into::into);
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::ENQUIRY_DISPATCH_FAILED,
                    event.result = event::result::FAILURE,
                    notification.failed_leg = failed_leg.unwrap_or("-"),
                    owner_message_id = e.owner_message_id().unwrap_or("-"),
                    "お問い合わせメールの送信に失敗"
                );
                Err(e.into())
            }
        }
    }
}
