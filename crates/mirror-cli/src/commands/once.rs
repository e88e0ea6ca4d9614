//! Single-pass command

use mirror_core::run_once;

use super::{prepare_replica, resolve_settings};
use crate::cli::SessionArgs;
use crate::error::{CliError, Result};
use crate::interactive::Needs;
use crate::logging;
use crate::render::{self, ConsoleSink};

/// Run one pass and report it.
///
/// Exits with an error if the pass failed, after reporting whatever it
/// completed.
pub fn run_single(session: &SessionArgs, json: bool, verbose: bool) -> Result<()> {
    let settings = resolve_settings(
        session,
        None,
        Needs {
            interval: false,
            log_file: false,
        },
    )?;
    logging::init(settings.log_file.as_deref(), verbose)?;
    prepare_replica(&settings, json)?;

    let mut sink = if json {
        ConsoleSink::quiet()
    } else {
        ConsoleSink::new()
    };
    let result = run_once(&settings.source, &settings.replica, &mut sink);

    if json {
        println!("{}", serde_json::to_string_pretty(&result.summary())?);
    } else {
        render::print_pass_report(&result);
    }

    match result.failure {
        Some(failure) => Err(CliError::Core(failure)),
        None => Ok(()),
    }
}
