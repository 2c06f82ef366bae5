use prospector_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    prospector_app::init_tracing();
    tracing::info!("Starting Prospector v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_with_env()?;
    let report = prospector_app::run(&config).await?;

    let rendered = prospector_app::render_emails(&report.aggregated);
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    tracing::info!("Found {} unique emails", report.aggregated.len());
    Ok(())
}
