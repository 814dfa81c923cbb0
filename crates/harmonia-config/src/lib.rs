use chrono::{DateTime, Utc};
use harmonia::ephemeris::parse_moment;
use harmonia::GeoLocation;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HarmoniaSettings {
    /// `None` lets the adapter fall back to `SWISS_EPHEMERIS_PATH` and its default
    pub ephemeris_path: Option<PathBuf>,
    pub poll_interval: Duration,
    pub natal_moment: DateTime<Utc>,
    pub natal_location: GeoLocation,
    pub location: GeoLocation,
}

#[derive(Debug, Clone, Deserialize)]
struct HarmoniaToml {
    #[serde(default)]
    ephemeris_path: Option<PathBuf>,
    #[serde(default = "default_poll_interval_secs")]
    poll_interval_secs: u64,
    natal: NatalToml,
    #[serde(default)]
    location: Option<LocationToml>,
}

#[derive(Debug, Clone, Deserialize)]
struct NatalToml {
    moment: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LocationToml {
    lat: f64,
    lon: f64,
}

fn default_poll_interval_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    harmonia: Option<HarmoniaToml>,
}

/// Try common relative paths for `configs/harmonia.toml`, from the workspace
/// root or from inside `apps/<name>`.
pub fn read_config_text() -> anyhow::Result<String> {
    let paths = ["configs/harmonia.toml", "../../configs/harmonia.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load harmonia.toml from {:?}", paths);
}

pub fn load_harmonia_settings() -> anyhow::Result<HarmoniaSettings> {
    let text = read_config_text()?;
    parse_harmonia_settings(&text)
}

/// Parse and validate the `[harmonia]` table of a config document.
///
/// When `[harmonia.location]` is absent the natal coordinates are used.
pub fn parse_harmonia_settings(text: &str) -> anyhow::Result<HarmoniaSettings> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse harmonia.toml: {e}"))?;
    let cfg = root.harmonia.ok_or_else(|| {
        anyhow::anyhow!("Missing [harmonia] config (needs a [harmonia.natal] table)")
    })?;
    let HarmoniaToml {
        ephemeris_path,
        poll_interval_secs,
        natal,
        location,
    } = cfg;

    if poll_interval_secs == 0 {
        anyhow::bail!("harmonia.poll_interval_secs must be greater than zero");
    }

    let natal_moment = parse_moment(&natal.moment)
        .map_err(|e| anyhow::anyhow!("harmonia.natal.moment: {e}"))?;
    let natal_location = GeoLocation::new(natal.lat, natal.lon)
        .map_err(|e| anyhow::anyhow!("harmonia.natal: {e}"))?;
    let location = match location {
        Some(LocationToml { lat, lon }) => {
            GeoLocation::new(lat, lon).map_err(|e| anyhow::anyhow!("harmonia.location: {e}"))?
        }
        None => natal_location,
    };

    if let Some(path) = &ephemeris_path {
        if !path.exists() {
            anyhow::bail!("harmonia.ephemeris_path does not exist: {}", path.display());
        }
    }

    Ok(HarmoniaSettings {
        ephemeris_path,
        poll_interval: Duration::from_secs(poll_interval_secs),
        natal_moment,
        natal_location,
        location,
    })
}
