use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use uinv_lib::output::UINV_OUTPUT_VERSION;
use uinv_lib::types::{Section, VisualEssentials};
use uinv_lib::{ErrorOutput, InventoryError, InventoryOutput};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &InventoryOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: InventoryError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = InventoryOutput::Error(ErrorOutput {
        version: UINV_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(
    body: &InventoryOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &InventoryOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &InventoryOutput, colorize: bool) -> String {
    match body {
        InventoryOutput::Components(out) => {
            let mut buf = String::new();
            let header = color("[COMPONENTS]", "36", colorize);
            writeln!(
                buf,
                "{} {} components from {} captures",
                header,
                out.components.len(),
                out.capture_count
            )
            .ok();
            for component in &out.components {
                writeln!(
                    buf,
                    "- {} [{} / {}] {} capture(s), {} ({})",
                    component.name,
                    component.category,
                    component.component_type,
                    component.capture_count,
                    component.source,
                    short_key(&component.id)
                )
                .ok();
            }
            buf
        }
        InventoryOutput::Styles(out) => {
            let mut buf = String::new();
            let header = color("[STYLES]", "35", colorize);
            writeln!(
                buf,
                "{} {} styles from {} captures",
                header,
                out.styles.len(),
                out.capture_count
            )
            .ok();
            for style in &out.styles {
                writeln!(
                    buf,
                    "- {:10} {} = {} (used {}x) {}",
                    style.kind.as_str(),
                    style.token,
                    style.value,
                    style.usage_count,
                    style.id
                )
                .ok();
            }
            buf
        }
        InventoryOutput::ComponentDetails(out) => {
            let mut buf = String::new();
            let header = color("[COMPONENT]", "36", colorize);
            let component = &out.component;
            writeln!(buf, "{} {}", header, component.name).ok();
            writeln!(
                buf,
                "Category: {}  Type: {}  Status: {}",
                component.category, component.component_type, component.status
            )
            .ok();
            writeln!(
                buf,
                "Captures: {} (representative {})",
                component.capture_count, component.representative_capture_id
            )
            .ok();
            if !out.sources.is_empty() {
                writeln!(buf, "Sources:").ok();
                for source in &out.sources {
                    writeln!(buf, "- {} {}", source.source, source.url).ok();
                }
            }
            write_essentials(&mut buf, &out.essentials, colorize);
            buf
        }
        InventoryOutput::StyleDetails(out) => {
            let mut buf = String::new();
            let header = color("[STYLE]", "35", colorize);
            match &out.style {
                Some(style) => {
                    writeln!(
                        buf,
                        "{} {} = {} ({}, used {}x)",
                        header, style.token, style.value, style.kind, style.usage_count
                    )
                    .ok();
                }
                None => {
                    writeln!(buf, "{} No style with that id", header).ok();
                }
            }
            if !out.locations.is_empty() {
                writeln!(buf, "Locations:").ok();
                for loc in &out.locations {
                    writeln!(
                        buf,
                        "- {} {} x{} ({})",
                        loc.capture_id, loc.source, loc.usage_count, loc.url
                    )
                    .ok();
                }
            }
            if !out.related_components.is_empty() {
                writeln!(buf, "Components:").ok();
                for related in &out.related_components {
                    writeln!(
                        buf,
                        "- {} [{}] x{} across {} capture(s)",
                        related.name, related.category, related.usage_count, related.capture_count
                    )
                    .ok();
                }
            }
            buf
        }
        InventoryOutput::Essentials(out) => {
            let mut buf = String::new();
            let header = color("[ESSENTIALS]", "34", colorize);
            writeln!(
                buf,
                "{} Capture {} ({})",
                header,
                out.capture_id,
                short_key(&out.component_id)
            )
            .ok();
            write_essentials(&mut buf, &out.essentials, colorize);
            buf
        }
        InventoryOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

/// Rows grouped under their section headings, empty sections omitted.
fn write_essentials(buf: &mut String, essentials: &VisualEssentials, colorize: bool) {
    if essentials.rows.is_empty() {
        writeln!(buf, "Visual essentials: none recorded").ok();
    }
    for section in Section::ORDER {
        let rows: Vec<_> = essentials
            .rows
            .iter()
            .filter(|r| r.row.section == section)
            .collect();
        if rows.is_empty() {
            continue;
        }
        writeln!(buf, "{}:", color(section.as_str(), "1", colorize)).ok();
        for row in rows {
            let mut line = format!("  {:14} {}", row.row.label, row.row.value);
            if let Some(hex8) = &row.row.hex8 {
                if !row.row.value.eq_ignore_ascii_case(hex8) {
                    write!(line, " ({hex8})").ok();
                }
            }
            if let Some(token) = &row.token {
                write!(line, " token {token}").ok();
            }
            if let Some(authored) = &row.authored {
                write!(line, " authored {authored}").ok();
            }
            writeln!(buf, "{line}").ok();
        }
    }
    if let Some(note) = essentials.evidence.as_ref().and_then(|e| e.note.as_deref()) {
        writeln!(buf, "{}", color(note, "33", colorize)).ok();
    }
}

fn short_key(key: &str) -> &str {
    key.get(..12).unwrap_or(key)
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
