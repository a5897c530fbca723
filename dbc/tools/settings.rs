/*!
Layered configuration: an optional TOML file, then `CANCONV_DBC_*`
environment variables.
*/

use canconv_dbc::prelude::StringPolicy;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

const PKG_NAME: &str = "canconv-dbc";
const ENV_PREFIX: &str = "CANCONV_DBC";

#[derive(Debug, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub string_policy: StringPolicy,

    /// Where the configuration came from, reported once logging is up.
    #[serde(skip)]
    source: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
            string_policy: StringPolicy::default(),
            source: String::new(),
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "canconv", PKG_NAME)
        .map(|proj_dirs| proj_dirs.config_local_dir().to_path_buf())
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut b = config::Config::builder();

        let source = if let Some(path) = path {
            b = b.add_source(config::File::from(path).format(config::FileFormat::Toml));
            format!(
                "Using configuration file '{}' specified on command line",
                path.display()
            )
        } else if let Ok(path) = std::env::var(format!("{ENV_PREFIX}_CONFIG_FILE")) {
            b = b.add_source(config::File::with_name(&path).format(config::FileFormat::Toml));
            format!(
                "Using configuration file '{path}' specified by {ENV_PREFIX}_CONFIG_FILE environment variable"
            )
        } else if let Some(dir) = config_dir() {
            let path = dir.join(format!("{PKG_NAME}.config"));
            b = b.add_source(
                config::File::from(path.as_path())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
            format!("Using optional configuration file '{}'", path.display())
        } else {
            "No configuration file".to_string()
        };

        // Pull in environment vars
        b = b.add_source(config::Environment::with_prefix(ENV_PREFIX));

        let mut settings: Settings = b
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;
        settings.source = source;
        Ok(settings)
    }
}

/// Logs go to stderr, so generated output on stdout stays clean.
pub fn init_logger(settings: &Settings, verbose: bool) -> anyhow::Result<()> {
    let mut log_level = settings.log_level.parse::<LevelFilter>().map_err(|e| {
        anyhow::anyhow!(
            "Invalid 'log_level' value '{}' in configuration: {e}",
            settings.log_level
        )
    })?;
    if verbose {
        log_level = log_level.max(LevelFilter::DEBUG);
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level)
        .with_target(log_level > LevelFilter::INFO)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))?;

    info!("{}", settings.source);
    Ok(())
}
