use std::path::PathBuf;
use std::process::ExitCode;

use uinv_lib::output::UINV_OUTPUT_VERSION;
use uinv_lib::{
    build_style_catalog, dedupe_by_url, derive_capture_essentials, derive_component_captures,
    derive_components, derive_related_components_for_style, derive_style_locations, keyed,
    representative_capture, ComponentDetailsOutput, EssentialsOutput, InventoryError,
    InventoryOutput, StyleDetailsOutput,
};

use super::prepare;
use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};

/// Run the component command: captures, sources and essentials for one key.
pub fn run_component(
    config_path: Option<PathBuf>,
    verbose: bool,
    input: PathBuf,
    key: String,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let prepared = match prepare(config_path.as_deref(), verbose, &input) {
        Ok(p) => p,
        Err(err) => return render_error(err, format, output),
    };
    let captures = keyed(&prepared.snapshot.captures, &prepared.keys);
    let components = derive_components(&captures, &prepared.snapshot.overrides);

    let Some(component) = components.into_iter().find(|c| c.id == key) else {
        let err = InventoryError::not_found(format!("component '{key}' has no captures"));
        return render_error(err, format, output);
    };
    let Some(representative) = representative_capture(&key, &captures) else {
        let err = InventoryError::not_found(format!("component '{key}' has no captures"));
        return render_error(err, format, output);
    };

    let component_captures = derive_component_captures(&key, &captures);
    let sources = dedupe_by_url(&component_captures);
    let essentials =
        derive_capture_essentials(representative, prepared.config.essentials.include_evidence);
    if verbose {
        eprintln!(
            "Component {} has {} captures across {} sources; {} essentials rows from {}",
            component.name,
            component_captures.len(),
            sources.len(),
            essentials.rows.len(),
            representative.id
        );
    }

    let body = InventoryOutput::ComponentDetails(ComponentDetailsOutput {
        version: UINV_OUTPUT_VERSION.to_string(),
        component,
        captures: component_captures,
        sources,
        essentials,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(InventoryError::Config(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}

/// Run the style command. An unknown id yields empty lists, not an error.
pub fn run_style(
    config_path: Option<PathBuf>,
    verbose: bool,
    input: PathBuf,
    id: String,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let prepared = match prepare(config_path.as_deref(), verbose, &input) {
        Ok(p) => p,
        Err(err) => return render_error(err, format, output),
    };
    let captures = keyed(&prepared.snapshot.captures, &prepared.keys);
    let styles = build_style_catalog(&prepared.snapshot.captures);
    let components = derive_components(&captures, &prepared.snapshot.overrides);

    let locations = derive_style_locations(&id, &captures, &styles);
    let related_components =
        derive_related_components_for_style(&id, &captures, &components, &styles);
    let style = styles.into_iter().find(|s| s.id == id);
    if verbose {
        match &style {
            Some(s) => eprintln!(
                "Style {} = {} found in {} captures, {} components",
                s.token,
                s.value,
                locations.len(),
                related_components.len()
            ),
            None => eprintln!("No style with id {id} in this snapshot"),
        }
    }

    let body = InventoryOutput::StyleDetails(StyleDetailsOutput {
        version: UINV_OUTPUT_VERSION.to_string(),
        style,
        locations,
        related_components,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(InventoryError::Config(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}

/// Run the essentials command for a single capture.
pub fn run_essentials(
    config_path: Option<PathBuf>,
    verbose: bool,
    input: PathBuf,
    capture_id: String,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let prepared = match prepare(config_path.as_deref(), verbose, &input) {
        Ok(p) => p,
        Err(err) => return render_error(err, format, output),
    };
    let captures = keyed(&prepared.snapshot.captures, &prepared.keys);
    let Some(kc) = captures.iter().find(|kc| kc.capture.id == capture_id) else {
        let err = InventoryError::not_found(format!("capture '{capture_id}' not in snapshot"));
        return render_error(err, format, output);
    };

    let essentials =
        derive_capture_essentials(kc.capture, prepared.config.essentials.include_evidence);
    if verbose {
        eprintln!("Derived {} essentials rows", essentials.rows.len());
    }

    let body = InventoryOutput::Essentials(EssentialsOutput {
        version: UINV_OUTPUT_VERSION.to_string(),
        capture_id,
        component_id: kc.key.to_string(),
        essentials,
    });
    if let Err(err) = write_output(&body, format, output.clone()) {
        return render_error(InventoryError::Config(err.to_string()), format, output);
    }
    ExitCode::SUCCESS
}
