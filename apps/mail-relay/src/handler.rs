//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置し、親モジュールで re-export する
//! - ハンドラは薄く保ち、判定と送信は usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `enquiry`: お問い合わせフォームの送信

pub mod enquiry;
pub mod health;

pub use enquiry::{EnquiryState, method_not_allowed, send_email};
pub use health::health_check;
