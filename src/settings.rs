use std::path::Path;

use uinv_lib::{Config, InventoryError};

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > <config dir>/uinv/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, InventoryError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        InventoryError::Config(format!("Failed to read config {}: {}", loc, e))
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        InventoryError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Log effective config to stderr (verbose mode).
pub fn log_effective_config(config_path: Option<&Path>, config: &Config) {
    eprintln!("{}", format_effective_config(config, config_path));
}

/// Format effective config as a single-line string.
pub fn format_effective_config(config: &Config, config_source: Option<&Path>) -> String {
    let source = config_source
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "defaults".to_string());
    format!(
        "Effective config [{source}]: identity: volatile_attributes=[{}], include_accessible_name={}, essentials: include_evidence={}",
        config.identity.volatile_attributes.join(","),
        config.identity.include_accessible_name,
        config.essentials.include_evidence,
    )
}

/// Initialize the `log` backend. `--verbose` raises the default level to
/// debug; `RUST_LOG` still wins when set.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .try_init();
}
