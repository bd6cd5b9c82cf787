mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_component, run_components, run_essentials, run_style, run_styles};

fn main() -> ExitCode {
    let args = cli::parse();
    settings::init_logging(args.verbose);

    match args.command {
        Commands::Components {
            input,
            format,
            output,
        } => run_components(args.config, args.verbose, input, format, output),
        Commands::Styles {
            input,
            kind,
            format,
            output,
        } => run_styles(args.config, args.verbose, input, kind, format, output),
        Commands::Component {
            input,
            key,
            format,
            output,
        } => run_component(args.config, args.verbose, input, key, format, output),
        Commands::Style {
            input,
            id,
            format,
            output,
        } => run_style(args.config, args.verbose, input, id, format, output),
        Commands::Essentials {
            input,
            capture,
            format,
            output,
        } => run_essentials(args.config, args.verbose, input, capture, format, output),
    }
}
