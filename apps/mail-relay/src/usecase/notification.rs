//! # 通知ユースケース
//!
//! お問い合わせに伴うメールの生成・送信を統合する。
//!
//! ## モジュール構成
//!
//! - [`template_renderer`] - tera テンプレートエンジンによるメール生成
//! - [`dispatcher`] - 接続確認 + 2 通の逐次送信

pub mod dispatcher;
pub mod template_renderer;

pub use dispatcher::{DispatchError, DispatchReport, MailDispatcher};
pub use template_renderer::TemplateRenderer;

/// 通知の宛先
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAddresses {
    /// 事業者向け通知の送信先（`OWNER_EMAIL`）
    pub owner:    String,
    /// 送信元メールボックス（`SMTP_USER`）。お客様向け確認の返信先になる
    pub operator: String,
}
