//! # ミドルウェア

mod cors;

pub use cors::cors_layer;
