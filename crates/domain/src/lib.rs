//! # Blast Energy ドメイン層
//!
//! お問い合わせ（Enquiry）の受付とメール通知に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: メールアドレスは生成時に形式を検証する
//! - **タグ付き結果**: スパム判定・バリデーションの結果を [`enquiry::Screening`]
//!   で表現し、ハンドラに bool を散らばらせない
//! - **I/O を持たない**: SMTP 送信などの外部通信はインフラ層が担当する
//!
//! ## 依存関係の方向
//!
//! ```text
//! mail-relay → infra → domain
//!          ↘           ↗
//!            shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`enquiry`] - お問い合わせフォームと検証済みお問い合わせ
//! - [`notification`] - メールメッセージと送信エラー
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層で発生するエラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use blastenergy_domain::enquiry::{EnquiryForm, Screening};
//!
//! let form = EnquiryForm {
//!     name: Some("Jane Doe".to_string()),
//!     email: Some("jane@example.com".to_string()),
//!     service_type: Some("Home Energy Audit".to_string()),
//!     ..Default::default()
//! };
//!
//! assert!(matches!(form.screen(), Screening::Accepted(_)));
//! ```

pub mod clock;
pub mod enquiry;
pub mod error;
pub mod notification;

pub use error::DomainError;
