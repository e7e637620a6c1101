use clap::Parser;
use skin_triage::{analyzer, cli, config, error, image_input, server};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = config.with_env_overrides();
            if let Some(preset) = cli.profile {
                config.apply_profile(preset.model_profile());
            }
            if config.api_key().is_err() {
                tracing::warn!("{} is not set; every analysis request will fail", skin_triage::config::API_KEY_ENV);
            }

            let host = host.unwrap_or_else(|| config.host.clone());
            let port = port.unwrap_or(config.port);

            let analyzer = Arc::new(analyzer::Analyzer::from_config(config)?);
            server::serve(analyzer, &host, port).await?;
        }

        Commands::Analyze { image, output } => {
            let mut config = config.with_env_overrides();
            if let Some(preset) = cli.profile {
                config.apply_profile(preset.model_profile());
            }

            println!("🩺 skin-triage - 画像解析\n");

            println!("[1/2] 画像を読み込み中...");
            let image = image_input::resolve_image_reference(&image)?;
            println!("✔ 読み込み完了\n");

            println!("[2/2] AI解析中... ({})", config.model);
            let analyzer = analyzer::Analyzer::from_config(config)?;
            let result = analyzer.analyze(&image).await?;
            println!("✔ 解析完了\n");

            let json = serde_json::to_string_pretty(&result)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &json)?;
                    println!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", json),
            }

            if result.is_inconclusive() {
                println!("\n⚠ 判定できませんでした。明るく鮮明な写真で再度お試しください");
            }
        }

        Commands::Config { set_model, set_style, set_endpoint, show } => {
            let mut config = config;
            let changed = set_model.is_some() || set_style.is_some() || set_endpoint.is_some();

            if let Some(model) = set_model {
                config.model = model;
            }
            if let Some(style) = set_style {
                config.response_style = style;
            }
            if let Some(endpoint) = set_endpoint {
                config.endpoint = endpoint;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                let resolved = config.clone().with_env_overrides();
                println!("設定:");
                println!("  モデル: {}", resolved.model);
                println!("  レスポンス形式: {}", resolved.response_style);
                println!("  ゲートウェイ: {}", resolved.endpoint);
                println!("  タイムアウト: {}秒", resolved.timeout_seconds);
                println!("  待ち受け: {}:{}", resolved.host, resolved.port);
                println!(
                    "  APIキー: {}",
                    if resolved.api_key().is_ok() { "設定済み" } else { "未設定" }
                );
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "skin_triage=debug,tower_http=debug"
    } else {
        "skin_triage=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
