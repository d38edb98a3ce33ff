//! # CORS
//!
//! お問い合わせフォームを設置したサイトからのクロスオリジン送信を許可する。
//!
//! - `Access-Control-Allow-Origin` は許可リストと完全一致した場合のみ、
//!   リクエストの `Origin` をそのまま返す
//! - `Vary: Origin` はオリジンに関係なく常に付与する
//! - `OPTIONS`（プリフライト）はハンドラに渡さず、空ボディの 200 を返す
//!
//! 資格情報（Cookie 等）は扱わないため `allow_credentials` は設定しない。

use axum::http::{
    HeaderValue,
    Method,
    header::{CONTENT_TYPE, ORIGIN},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// お問い合わせ API 用の CORS レイヤーを構築する
///
/// ヘッダー値として不正なオリジンとワイルドカード（`*`）は許可リストから除外する。
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| {
            if origin == "*" {
                tracing::warn!(origin = %origin, "ワイルドカードは許可リストに指定できません");
                return None;
            }
            origin
                .parse::<HeaderValue>()
                .inspect_err(|e| tracing::warn!(origin = %origin, "不正なオリジンを無視: {}", e))
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .vary([ORIGIN])
}
