//! # お問い合わせハンドラ
//!
//! ## エンドポイント
//!
//! - `POST /api/send-email` - お問い合わせフォームの送信
//! - `OPTIONS /api/send-email` - CORS プリフライト（ミドルウェアで応答）
//! - その他のメソッド - 405
//!
//! ボディは JSON を基本とし、`application/x-www-form-urlencoded` も受け付ける。

use std::sync::Arc;

use axum::{
    Form,
    Json,
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::header,
};
use blastenergy_domain::enquiry::EnquiryForm;
use blastenergy_shared::SubmissionResponse;

use crate::{
    error::RelayError,
    usecase::{EnquiryUseCase, SubmissionOutcome},
};

/// 送信完了時のレスポンス文言
pub const DELIVERED_MESSAGE: &str = "Thank you for your enquiry. We will respond to you shortly.";

/// スパム破棄時のレスポンス文言（送信完了と見分けがつかない程度に短い定型文）
pub const SPAM_SUPPRESSED_MESSAGE: &str = "Thank you for your enquiry";

/// お問い合わせハンドラの共有状態
pub struct EnquiryState {
    pub usecase: Arc<dyn EnquiryUseCase>,
}

/// POST /api/send-email
pub async fn send_email(
    State(state): State<Arc<EnquiryState>>,
    request: Request,
) -> Result<Json<SubmissionResponse>, RelayError> {
    let form = parse_form(request).await?;

    tracing::debug!(
        name = form.name.as_deref().unwrap_or_default(),
        email = form.email.as_deref().unwrap_or_default(),
        service_type = form.service_type.as_deref().unwrap_or_default(),
        property_type = form.property_type.as_deref().unwrap_or_default(),
        has_phone = form.phone.is_some(),
        has_property_address = form.property_address.is_some(),
        has_message = form.message.as_deref().is_some_and(|m| !m.is_empty()),
        "お問い合わせを受信"
    );

    let message = match state.usecase.submit(form).await? {
        SubmissionOutcome::Delivered(_) => DELIVERED_MESSAGE,
        SubmissionOutcome::SpamSuppressed => SPAM_SUPPRESSED_MESSAGE,
    };

    Ok(Json(SubmissionResponse::accepted(message)))
}

/// POST / OPTIONS 以外のメソッド
pub async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}

/// リクエストボディを送信フォームとして解釈する
///
/// 空ボディと JSON の `null` は全項目未入力のフォームとして扱い、
/// 後段の必須項目チェックで 400 にする。
async fn parse_form(request: Request) -> Result<EnquiryForm, RelayError> {
    let is_urlencoded = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    if is_urlencoded {
        let Form(form) = Form::<EnquiryForm>::from_request(request, &())
            .await
            .map_err(|_| RelayError::InvalidBody)?;
        return Ok(form);
    }

    let body = Bytes::from_request(request, &())
        .await
        .map_err(|_| RelayError::InvalidBody)?;

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(EnquiryForm::default());
    }

    serde_json::from_slice::<Option<EnquiryForm>>(&body)
        .map(Option::unwrap_or_default)
        .map_err(|_| RelayError::InvalidBody)
}
