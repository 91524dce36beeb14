use bsky_list_merge::app::pipelines::run_import;
use bsky_list_merge::utils::logger;
use bsky_list_merge::CliConfig;
use clap::error::ErrorKind;
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: bsky-list-merge <source_list_url> <target_list_url>");
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting bsky-list-merge CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = match config.settings(|key| std::env::var(key).ok()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    match run_import(&settings, &config.source_list_url, &config.target_list_url).await {
        Ok(report) => {
            tracing::info!(
                "✅ Added {} of {} members from {} to {}",
                report.appended,
                report.fetched,
                report.source,
                report.target
            );
            println!("Import complete.");
        }
        Err(e) => {
            tracing::error!(
                "❌ Import failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}
