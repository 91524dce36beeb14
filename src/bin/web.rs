use anyhow::Context;
use bsky_list_merge::config::web::WebArgs;
use bsky_list_merge::utils::logger;
use bsky_list_merge::web;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = WebArgs::parse();
    logger::init_server_logger(args.verbose, args.log_json);

    let config = args
        .resolve_config(|key| std::env::var(key).ok())
        .context("invalid web configuration")?;
    tracing::info!("🚀 Starting starter pack merge form against {}", config.service);

    web::serve(config).await.context("web server failed")?;
    Ok(())
}
