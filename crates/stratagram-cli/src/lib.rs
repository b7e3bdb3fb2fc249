//! CLI logic for the Stratagram diagram tool.
//!
//! This module contains the core CLI logic: loading a cloud assembly,
//! resolving its stacks and writing the D2 diagram.

pub mod error_adapter;
pub mod loader;

mod args;
mod config;

pub use args::Args;

use std::{
    fs::File,
    io::{self, BufWriter},
    path::Path,
};

use log::{info, warn};

use stratagram::{DiagramBuilder, ResolvedDiagram, StratagramError};

use error_adapter::diagnostic_reportables;

/// Output path meaning standard output.
const STDOUT: &str = "-";

/// Run the Stratagram CLI application
///
/// Loads the cloud assembly named by the arguments, resolves its stacks and
/// writes the resulting D2 source to the output file or stdout. Resolution
/// diagnostics are logged as warnings and do not fail the run.
///
/// # Errors
///
/// Returns `StratagramError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid manifests or templates
/// - Export errors
pub fn run(args: &Args) -> Result<(), StratagramError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing cloud assembly"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = DiagramBuilder::new(app_config);

    let assembly = loader::load(Path::new(&args.input), &builder, &args.stacks)?;
    let diagram = builder.resolve(&assembly.manifest, assembly.stacks);
    report_diagnostics(&diagram);

    if args.output == STDOUT {
        builder.write_d2(&diagram, io::stdout().lock())?;
    } else {
        let file = File::create(&args.output)?;
        builder.write_d2(&diagram, BufWriter::new(file))?;
    }

    info!(output_file = args.output; "D2 exported successfully");

    Ok(())
}

fn report_diagnostics(diagram: &ResolvedDiagram) {
    let reporter = miette::GraphicalReportHandler::new();

    for reportable in diagnostic_reportables(diagram) {
        let mut writer = String::new();
        match reporter.render_report(&mut writer, &reportable) {
            Ok(()) => warn!("{writer}"),
            Err(_) => warn!("{reportable}"),
        }
    }
}
