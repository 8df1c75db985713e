use super::open_input;
use crate::cli::ContactsArgs;
use crate::config::PartialContactConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use kdcontacts::core::io::contacts::ContactTableWriter;
use kdcontacts::core::io::pdb::PdbFile;
use kdcontacts::core::io::traits::StructureFile;
use kdcontacts::engine::error::EngineError;
use kdcontacts::engine::progress::ProgressReporter;
use kdcontacts::workflows;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{debug, info, warn};

pub fn run(args: &ContactsArgs, quiet: bool) -> Result<()> {
    let config = PartialContactConfig::load(args)?.merge_with_cli(args)?;

    info!("Loading ATOM records from {}", describe(args.input.as_deref(), "standard input"));
    let mut reader = open_input(args.input.as_deref())?;
    let (points, report) = PdbFile::read_from(&mut reader, config.malformed_records)
        .map_err(EngineError::from)?;
    info!(
        atoms = report.atoms,
        lines = report.lines_read,
        first_model_only = report.stopped_at_end_of_model,
        insertion_codes = report.insertion_code_atoms,
        "Structure loaded."
    );
    if report.alt_loc_atoms > 0 {
        info!(
            "{} atom(s) carry alternate locations; contacts are reported for every conformer.",
            report.alt_loc_atoms
        );
    }
    if report.skipped > 0 {
        warn!("Skipped {} malformed ATOM record(s).", report.skipped);
    }

    let progress_handler = CliProgressHandler::new(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let result = workflows::contacts::run(&points, &config, &reporter)?;
    debug!(tree_height = result.tree_height, "Search finished.");

    info!(
        "Writing {} contact(s) to {}",
        result.contacts.len(),
        describe(args.output.as_deref(), "standard output")
    );
    let output: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::FileWriting {
                path: path.clone(),
                source,
            })?;
            Box::new(file)
        }
        None => Box::new(io::stdout().lock()),
    };

    let mut table = ContactTableWriter::new(BufWriter::new(output)).map_err(EngineError::from)?;
    table
        .write_all(&points, &result.contacts)
        .map_err(EngineError::from)?;
    info!(rows = table.rows(), "Contact table written.");
    table.finish().map_err(EngineError::from)?;
    Ok(())
}

fn describe(path: Option<&std::path::Path>, fallback: &str) -> String {
    path.map_or_else(|| fallback.to_string(), |p| format!("{:?}", p))
}
