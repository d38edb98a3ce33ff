//! # ドメイン層エラー定義
//!
//! お問い合わせ内容がビジネスルールに違反している状態を表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `MissingRequiredFields` | 400 Bad Request | 氏名・メールアドレス・サービス種別の未入力 |
//! | `InvalidEmail` | 400 Bad Request | メールアドレスの形式不正 |
//!
//! `Display` の文言はそのままクライアントに返すため、英語で定義する。
//!
//! ## 使用例
//!
//! ```rust
//! use blastenergy_domain::DomainError;
//!
//! let error = DomainError::InvalidEmail;
//! assert_eq!(error.to_string(), "Invalid email address");
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、400 Bad Request に変換する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// 必須フィールド（name, email, serviceType）のいずれかが未入力
    #[error("Missing required fields: name, email, and service type are required")]
    MissingRequiredFields,

    /// メールアドレスが `local@domain.tld` 形式ではない
    #[error("Invalid email address")]
    InvalidEmail,
}
