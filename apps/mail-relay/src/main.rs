//! # Mail Relay サーバー
//!
//! お問い合わせフォームの送信先となる公開 API サーバー。
//!
//! ```text
//! ┌──────────────┐  POST /api/send-email  ┌──────────────┐  SMTP  ┌──────────────┐
//! │ 静的サイト   │───────────────────────→│  Mail Relay  │───────→│ SMTP サーバー │
//! └──────────────┘                        └──────────────┘        └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `RELAY_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `RELAY_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `SMTP_HOST` | No | SMTP サーバー（デフォルト: `smtp.hostinger.com`） |
//! | `SMTP_PORT` | No | SMTP ポート（デフォルト: `465`） |
//! | `SMTP_USER` | No | 認証ユーザー兼送信元（デフォルト: `info@blastenergy.com.au`） |
//! | `SMTP_PASS` | No | 認証パスワード（未設定なら認証しない） |
//! | `SMTP_SECURE` | No | `true` / `starttls` / `none`（デフォルト: `true`） |
//! | `OWNER_EMAIL` | No | 事業者向け通知の送信先（デフォルト: `info@blastenergy.com.au`） |
//! | `NOTIFICATION_BACKEND` | No | `smtp` / `noop`（デフォルト: `smtp`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（Mailpit）
//! SMTP_HOST=localhost SMTP_PORT=1025 SMTP_SECURE=none cargo run -p blastenergy-mail-relay
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use blastenergy_domain::clock::SystemClock;
use blastenergy_infra::{NoopNotificationSender, NotificationSender, SmtpNotificationSender};
use blastenergy_mail_relay::{
    app_builder::{AppDeps, build_app},
    config::{NotificationBackend, RelayConfig},
    usecase::MailAddresses,
};
use blastenergy_shared::observability::{TracingConfig, init_tracing};
use tokio::{net::TcpListener, signal};

/// Mail Relay サーバーのエントリーポイント
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. 設定の読み込み
/// 4. 送信実装の選択とルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("mail-relay"));
    let _tracing_guard = tracing::info_span!("app", service = "mail-relay").entered();

    let config = RelayConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Mail Relay サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let sender: Arc<dyn NotificationSender> = match config.backend {
        NotificationBackend::Smtp => {
            tracing::info!(
                smtp.host = %config.smtp.host,
                smtp.port = config.smtp.port,
                smtp.security = ?config.smtp.security,
                smtp.auth = config.smtp.password.is_some(),
                "SMTP で送信します"
            );
            Arc::new(
                SmtpNotificationSender::new(&config.smtp.to_settings())
                    .context("SMTP トランスポートの構築に失敗しました")?,
            )
        }
        NotificationBackend::Noop => {
            tracing::warn!("NOTIFICATION_BACKEND=noop: メールは送信されません");
            Arc::new(NoopNotificationSender)
        }
    };

    let app = build_app(AppDeps {
        sender,
        clock: Arc::new(SystemClock),
        addresses: MailAddresses {
            owner:    config.owner_email.clone(),
            operator: config.smtp.username.clone(),
        },
        allowed_origins: config.allowed_origins.clone(),
    })
    .context("メールテンプレートの読み込みに失敗しました")?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Mail Relay サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Mail Relay サーバーを停止しました");
    Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Ctrl-C ハンドラの登録に失敗: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("SIGTERM ハンドラの登録に失敗: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
