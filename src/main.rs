use anyhow::Context;
use clap::Parser;
use threat_score::utils::logger;
use threat_score::{execute, CliConfig, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting threat-score");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?
                .with_overrides(&cli);
            execute(&config).await
        }
        None => execute(&cli).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}
