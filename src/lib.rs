//! 皮膚画像AIトリアージ
//!
//! 画像を上流のマルチモーダルモデルに送り、レスポンスを
//! 常に全フィールドが埋まった解析結果へ正規化する

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod image_input;
pub mod profile;
pub mod server;
