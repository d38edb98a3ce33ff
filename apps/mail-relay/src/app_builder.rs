//! # Mail Relay アプリケーション構築
//!
//! DI（ユースケース・State）の初期化とルーター構築を担当する。
//! `main.rs` は設定読み込み・送信実装の選択とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use blastenergy_domain::{clock::Clock, notification::NotificationError};
use blastenergy_infra::NotificationSender;
use blastenergy_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{EnquiryState, health_check, method_not_allowed, send_email},
    middleware::cors_layer,
    usecase::{EnquiryUseCaseImpl, MailAddresses, MailDispatcher, TemplateRenderer},
};

/// ルーター構築に必要な依存
pub struct AppDeps {
    pub sender:          Arc<dyn NotificationSender>,
    pub clock:           Arc<dyn Clock>,
    pub addresses:       MailAddresses,
    pub allowed_origins: Vec<String>,
}

/// ユースケースの組み立てとルーター定義を行う
///
/// テンプレートの登録に失敗した場合のみエラーを返す。
pub fn build_app(deps: AppDeps) -> Result<Router, NotificationError> {
    let renderer = TemplateRenderer::new(deps.clock)?;
    let dispatcher = MailDispatcher::new(deps.sender, renderer, deps.addresses);
    let enquiry_state = Arc::new(EnquiryState {
        usecase: Arc::new(EnquiryUseCaseImpl::new(dispatcher)),
    });

    // レイヤー順序: 下に書いたものが外側
    // CORS はお問い合わせ API のみに適用し、/health には付与しない
    let app = Router::new()
        .route(
            "/api/send-email",
            post(send_email).fallback(method_not_allowed),
        )
        .with_state(enquiry_state)
        .layer(cors_layer(&deps.allowed_origins))
        .route("/health", get(health_check))
        .layer(CanonicalLogLineLayer)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));

    Ok(app)
}
