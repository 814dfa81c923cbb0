mod source;

use source::HarmoniaSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = harmonia_config::load_harmonia_settings()?;
    log::info!(
        "Harmonia daemon starting, polling every {}s",
        settings.poll_interval.as_secs()
    );
    let mut source = HarmoniaSource::new(&settings)?;

    loop {
        match source.poll().await {
            Ok(reading) => {
                log::info!(
                    "Score {} ({}), recommendation {}",
                    reading.alignment_score,
                    if reading.should_notify { "notify" } else { "quiet" },
                    reading.prescription.recommendation_key
                );
                match serde_json::to_string(&reading) {
                    Ok(json) => log::info!("{json}"),
                    Err(e) => log::error!("Failed to serialize reading: {e}"),
                }
            }
            Err(e) => log::error!("Harmonia poll failed: {e}"),
        }
    }
}
