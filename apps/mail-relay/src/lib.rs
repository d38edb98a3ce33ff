//! # Blast Energy Mail Relay ライブラリ
//!
//! Web サイトのお問い合わせフォームを受け付け、事業者向け通知と
//! お客様向け確認の 2 通のメールとして SMTP で中継する。
//!
//! ## モジュール構成
//!
//! - `app_builder`: DI とルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラー定義と HTTP レスポンス変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: CORS
//! - `usecase`: 受付判定とメール送信

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;
