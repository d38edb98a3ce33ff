//! # Mail Relay エラー定義
//!
//! お問い合わせ受付で発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! クライアントに返す文言は固定とし、SMTP のエラー詳細はログにのみ出力する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blastenergy_domain::DomainError;
use blastenergy_shared::{ErrorResponse, event_log::error};
use thiserror::Error;

use crate::usecase::DispatchError;

/// 送信設定エラー時のレスポンス文言
pub const CONFIGURATION_ERROR_MESSAGE: &str = "Email service configuration error";

/// 送信失敗時のレスポンス文言
pub const SEND_FAILURE_MESSAGE: &str =
    "Failed to send email. Please try again later or contact us directly.";

/// Mail Relay で発生するエラー
#[derive(Debug, Error)]
pub enum RelayError {
    /// リクエストボディを解釈できない
    #[error("Invalid request body")]
    InvalidBody,

    /// 必須項目の不足・メール形式の不正
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// メール送信の失敗
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// 許可されていないメソッド
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            RelayError::InvalidBody => (StatusCode::BAD_REQUEST, self.to_string()),
            RelayError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            RelayError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
            RelayError::Dispatch(e @ DispatchError::Configuration(_)) => {
                tracing::error!(
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::SMTP_VERIFY,
                    "SMTP 接続確認に失敗: {}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CONFIGURATION_ERROR_MESSAGE.to_string(),
                )
            }
            RelayError::Dispatch(e @ DispatchError::Template(_)) => {
                tracing::error!(
                    error.category = error::category::INTERNAL,
                    error.kind = error::kind::TEMPLATE,
                    "メール本文の生成に失敗: {}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SEND_FAILURE_MESSAGE.to_string(),
                )
            }
            RelayError::Dispatch(e) => {
                tracing::error!(
                    error.category = error::category::EXTERNAL_SERVICE,
                    error.kind = error::kind::SMTP_SEND,
                    owner_message_id = e.owner_message_id().unwrap_or("-"),
                    "メール送信に失敗: {}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    SEND_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use blastenergy_domain::notification::NotificationError;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn into_parts(error: RelayError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_検証エラーは400で理由を返す() {
        let (status, body) = into_parts(DomainError::InvalidEmail.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "Invalid email address" }));
    }

    #[tokio::test]
    async fn test_接続確認の失敗は設定エラーの文言を返す() {
        let error = DispatchError::Configuration(NotificationError::VerifyFailed(
            "535 authentication failed".to_string(),
        ));

        let (status, body) = into_parts(error.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], CONFIGURATION_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_送信失敗はsmtpの詳細を含めない() {
        let error = DispatchError::CustomerLeg {
            owner_message_id: "<owner@blastenergy.com.au>".to_string(),
            source:           NotificationError::SendFailed("550 mailbox unavailable".to_string()),
        };

        let (status, body) = into_parts(error.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], SEND_FAILURE_MESSAGE);
        assert!(!body.to_string().contains("550"));
    }

    #[tokio::test]
    async fn test_メソッド不許可は405() {
        let (status, body) = into_parts(RelayError::MethodNotAllowed).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method not allowed");
    }
}
