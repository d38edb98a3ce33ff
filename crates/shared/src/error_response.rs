//! # レスポンスエンベロープ
//!
//! フォーム送信 API が返す JSON の形を定義する。
//!
//! - 失敗時: `{ "error": "..." }`
//! - 成功時（スパム破棄を含む）: `{ "success": true, "message": "..." }`
//!
//! axum の `IntoResponse` 変換はサービス側の責務（shared に axum 依存を入れない）。

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// `error` はクライアントにそのまま表示される文言。
/// SMTP のエラー詳細など内部情報は入れない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// 受付完了レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
}

impl SubmissionResponse {
    /// 受付成功
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
