//! # ヘルスチェックハンドラ
//!
//! レスポンス型は [`blastenergy_shared::HealthResponse`] を参照。

use axum::Json;
use blastenergy_shared::HealthResponse;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}
