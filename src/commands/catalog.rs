use std::path::PathBuf;
use std::process::ExitCode;

use uinv_lib::output::UINV_OUTPUT_VERSION;
use uinv_lib::{
    build_style_catalog, derive_components, keyed, ComponentsOutput, InventoryError,
    InventoryOutput, StyleKind, StylesOutput,
};

use super::prepare;
use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};

/// Run the components command.
pub fn run_components(
    config_path: Option<PathBuf>,
    verbose: bool,
    input: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let prepared = match prepare(config_path.as_deref(), verbose, &input) {
        Ok(p) => p,
        Err(err) => return render_error(err, format, output),
    };
    let captures = keyed(&prepared.snapshot.captures, &prepared.keys);
    let components = derive_components(&captures, &prepared.snapshot.overrides);
    if verbose {
        eprintln!("Derived {} components", components.len());
    }

    let body = InventoryOutput::Components(ComponentsOutput {
        version: UINV_OUTPUT_VERSION.to_string(),
        capture_count: prepared.snapshot.captures.len(),
        components,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(InventoryError::Config(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}

/// Run the styles command.
pub fn run_styles(
    config_path: Option<PathBuf>,
    verbose: bool,
    input: PathBuf,
    kind: Option<StyleKind>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let prepared = match prepare(config_path.as_deref(), verbose, &input) {
        Ok(p) => p,
        Err(err) => return render_error(err, format, output),
    };
    let mut styles = build_style_catalog(&prepared.snapshot.captures);
    if verbose {
        eprintln!("Catalogued {} distinct styles", styles.len());
    }
    if let Some(kind) = kind {
        styles.retain(|s| s.kind == kind);
    }

    let body = InventoryOutput::Styles(StylesOutput {
        version: UINV_OUTPUT_VERSION.to_string(),
        capture_count: prepared.snapshot.captures.len(),
        styles,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(InventoryError::Config(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}
