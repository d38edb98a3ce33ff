//! # ユースケース層
//!
//! お問い合わせ受付のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: ハンドラのテストでスタブに差し替えられるようにする
//! - **依存性注入**: 送信実装・時計・宛先は外部から注入
//! - **薄いハンドラ**: ハンドラはリクエストの解釈とレスポンス変換のみ行う

pub mod enquiry;
pub mod notification;

use async_trait::async_trait;
use blastenergy_domain::enquiry::EnquiryForm;
pub use enquiry::{EnquiryUseCaseImpl, SubmissionOutcome};
pub use notification::{
    DispatchError,
    DispatchReport,
    MailAddresses,
    MailDispatcher,
    TemplateRenderer,
};

use crate::error::RelayError;

/// お問い合わせ受付ユースケーストレイト
#[async_trait]
pub trait EnquiryUseCase: Send + Sync {
    /// 送信フォームを判定し、受理されたものをメールで送信する
    ///
    /// スパムは送信せずに [`SubmissionOutcome::SpamSuppressed`] を返す。
    async fn submit(&self, form: EnquiryForm) -> Result<SubmissionOutcome, RelayError>;
}
