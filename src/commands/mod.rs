mod catalog;
mod details;

pub use catalog::{run_components, run_styles};
pub use details::{run_component, run_essentials, run_style};

use std::path::Path;

use uinv_lib::{assign_keys, load_snapshot, ComponentKey, Config, InventoryError, InventorySnapshot};

use crate::settings::{load_config, log_effective_config};

/// Config, snapshot and component keys shared by every subcommand.
pub(crate) struct Prepared {
    pub config: Config,
    pub snapshot: InventorySnapshot,
    pub keys: Vec<ComponentKey>,
}

pub(crate) fn prepare(
    config_path: Option<&Path>,
    verbose: bool,
    input: &Path,
) -> Result<Prepared, InventoryError> {
    let config = load_config(config_path)?;
    if verbose {
        log_effective_config(config_path, &config);
        eprintln!("Loading snapshot {}\u{2026}", input.display());
    }
    let snapshot = load_snapshot(input)?;
    let keys = assign_keys(&snapshot.captures, &config.identity);
    if verbose {
        eprintln!(
            "Keyed {} captures into {} distinct identities",
            snapshot.captures.len(),
            distinct(&keys)
        );
    }
    Ok(Prepared {
        config,
        snapshot,
        keys,
    })
}

fn distinct(keys: &[ComponentKey]) -> usize {
    keys.iter()
        .collect::<std::collections::BTreeSet<_>>()
        .len()
}
