//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! `jq` で問い合わせの流れを追えるよう、ログフィールドの命名規約と
//! ヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` に `error.category` + `error.kind` フィールドを直接追加する。
//! 定数は [`error`] モジュールで提供。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用。JSON 出力でフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
///
/// ## 使用例
///
/// ```
/// use blastenergy_shared::{event_log::event, log_business_event};
///
/// log_business_event!(
///     event.category = event::category::ENQUIRY,
///     event.action = event::action::ENQUIRY_SPAM_SUPPRESSED,
///     event.result = event::result::SUCCESS,
///     "スパムを破棄"
/// );
/// ```
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const ENQUIRY: &str = "enquiry";
        pub const NOTIFICATION: &str = "notification";
    }

    /// イベントアクション
    pub mod action {
        // 問い合わせ受付
        pub const ENQUIRY_ACCEPTED: &str = "enquiry.accepted";
        pub const ENQUIRY_SPAM_SUPPRESSED: &str = "enquiry.spam_suppressed";
        pub const ENQUIRY_REJECTED: &str = "enquiry.rejected";

        // メール送信
        pub const ENQUIRY_DISPATCHED: &str = "enquiry.dispatched";
        pub const ENQUIRY_DISPATCH_FAILED: &str = "enquiry.dispatch_failed";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// 外部サービス呼び出し（SMTP サーバー）
        pub const EXTERNAL_SERVICE: &str = "external_service";
        /// アプリケーション内部（テンプレート等）
        pub const INTERNAL: &str = "internal";
    }

    /// エラー種別
    pub mod kind {
        pub const SMTP_VERIFY: &str = "smtp_verify";
        pub const SMTP_SEND: &str = "smtp_send";
        pub const TEMPLATE: &str = "template";
    }
}
