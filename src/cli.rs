use clap::{Parser, Subcommand};
use crate::profile::ProfilePreset;
use skin_triage_common::ResponseStyle;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skin-triage")]
#[command(about = "皮膚画像AIトリアージ・解析サーバー", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// モデルプロファイル (flash/pro/lite)。未指定時は設定ファイルの値
    #[arg(long, global = true)]
    pub profile: Option<ProfilePreset>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// HTTPサーバーを起動
    Serve {
        /// 待ち受けホスト（デフォルト: 設定値）
        #[arg(long)]
        host: Option<String>,

        /// 待ち受けポート（デフォルト: 設定値）
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// 画像1枚を解析してJSONを出力
    Analyze {
        /// 画像のURL、data URI、またはローカルファイルパス
        #[arg(required = true)]
        image: String,

        /// 出力JSONファイル（未指定時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定管理
    Config {
        /// モデルIDを設定
        #[arg(long)]
        set_model: Option<String>,

        /// レスポンス形式を設定 (tool-call/json-text)
        #[arg(long)]
        set_style: Option<ResponseStyle>,

        /// ゲートウェイURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["skin-triage", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
            }
            _ => panic!("Expected Serve"),
        }
    }

    #[test]
    fn test_parse_analyze_with_profile() {
        let cli = Cli::try_parse_from([
            "skin-triage", "--profile", "lite", "analyze", "rash.jpg", "-o", "out.json",
        ])
        .unwrap();
        assert_eq!(cli.profile, Some(ProfilePreset::Lite));
        match cli.command {
            Commands::Analyze { image, output } => {
                assert_eq!(image, "rash.jpg");
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("Expected Analyze"),
        }
    }

    #[test]
    fn test_parse_config_style() {
        let cli = Cli::try_parse_from(["skin-triage", "config", "--set-style", "json-text"]).unwrap();
        match cli.command {
            Commands::Config { set_style, show, .. } => {
                assert_eq!(set_style, Some(ResponseStyle::JsonText));
                assert!(!show);
            }
            _ => panic!("Expected Config"),
        }
    }

    #[test]
    fn test_parse_config_style_invalid() {
        assert!(Cli::try_parse_from(["skin-triage", "config", "--set-style", "xml"]).is_err());
    }
}
