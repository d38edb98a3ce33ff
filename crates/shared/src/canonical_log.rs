//! # Canonical Log Line ミドルウェア
//!
//! お問い合わせ 1 件の受付結果を 1 行のサマリログにまとめる tower Layer。
//!
//! ## 出力項目
//!
//! | フィールド | 内容 |
//! |-----------|------|
//! | `http.method` / `http.path` | リクエスト行 |
//! | `http.body_format` | `json` / `form` / `none` / `other`（`Content-Type` から判定） |
//! | `http.status_code` | レスポンスステータス |
//! | `http.outcome` | `success` / `client_error` / `server_error` |
//! | `http.latency_ms` | SMTP 送信を含む処理時間 |
//!
//! 5xx は SMTP 側の障害を示すため WARN、それ以外は INFO で出力する。
//! ヘルスチェックと CORS プリフライトは出力しない。
//!
//! TraceLayer のスパン内に配置することで、`request_id` と `origin` が
//! JSON ログに自動的に含まれる。

use std::{
    fmt::Display,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Method, Request, Response, StatusCode, header::CONTENT_TYPE};
use tower::{Layer, Service};

/// Canonical Log Line を出力する Layer
///
/// ```text
/// TraceLayer → CanonicalLogLineLayer → cors → handler
/// ```
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService { inner }
    }
}

/// [`CanonicalLogLineLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner: S,
}

/// 完了サマリを指定レベルで出力する（`tracing` のレベルは定数である必要がある）
macro_rules! completed_line {
    ($level:expr, $line:ident, $status:ident) => {
        tracing::event!(
            $level,
            log.r#type = "canonical",
            http.method = %$line.method,
            http.path = %$line.path,
            http.body_format = $line.body_format,
            http.status_code = $status.as_u16(),
            http.outcome = outcome($status),
            http.latency_ms = $line.latency_ms(),
            "リクエスト完了"
        )
    };
}

/// リクエスト受信時点で確定する項目
struct RequestLine {
    method:      Method,
    path:        String,
    body_format: &'static str,
    started_at:  Instant,
}

impl RequestLine {
    /// 出力対象外のリクエストでは `None`
    fn capture<B>(req: &Request<B>) -> Option<Self> {
        let path = req.uri().path();
        if path.starts_with("/health") || req.method() == Method::OPTIONS {
            return None;
        }

        Some(Self {
            method:      req.method().clone(),
            path:        path.to_owned(),
            body_format: body_format(req),
            started_at:  Instant::now(),
        })
    }

    fn latency_ms(&self) -> u64 {
        u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn completed(&self, status: StatusCode) {
        if status.is_server_error() {
            completed_line!(tracing::Level::WARN, self, status);
        } else {
            completed_line!(tracing::Level::INFO, self, status);
        }
    }

    fn failed(&self, err: &dyn Display) {
        tracing::error!(
            log.r#type = "canonical",
            http.method = %self.method,
            http.path = %self.path,
            http.body_format = self.body_format,
            http.latency_ms = self.latency_ms(),
            error.message = %err,
            "リクエスト処理エラー"
        );
    }
}

/// `Content-Type` からボディ形式を判定する
fn body_format<B>(req: &Request<B>) -> &'static str {
    let Some(content_type) = req.headers().get(CONTENT_TYPE) else {
        return "none";
    };

    match content_type.to_str().map(str::to_ascii_lowercase) {
        Ok(ct) if ct.starts_with("application/x-www-form-urlencoded") => "form",
        Ok(ct) if ct.contains("json") => "json",
        _ => "other",
    }
}

fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "server_error"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "success"
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // poll_ready 済みの inner を取り出し、代わりに clone を残す
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let Some(line) = RequestLine::capture(&req) else {
            return Box::pin(async move { inner.call(req).await });
        };

        Box::pin(async move {
            let result = inner.call(req).await;
            match &result {
                Ok(response) => line.completed(response.status()),
                Err(err) => line.failed(err),
            }
            result
        })
    }
}
