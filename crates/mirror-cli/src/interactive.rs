//! Interactive prompts for settings not given on the command line
//!
//! Uses dialoguer for terminal input.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use dialoguer::Input;
use mirror_core::PartialSettings;

use crate::error::Result;

/// Which settings the command needs prompted when missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Needs {
    pub interval: bool,
    pub log_file: bool,
}

/// Whether prompting is possible at all.
pub fn can_prompt(no_prompt: bool) -> bool {
    !no_prompt && std::io::stdin().is_terminal()
}

/// Ask for every missing field the command needs.
pub fn fill_missing(settings: &mut PartialSettings, needs: Needs) -> Result<()> {
    if settings.source.is_none() {
        settings.source = Some(prompt_path("Source folder", validate_source)?);
    }
    if settings.replica.is_none() {
        settings.replica = Some(prompt_path("Replica folder", validate_replica)?);
    }
    if needs.interval && settings.interval.is_none() {
        let text: String = Input::new()
            .with_prompt("Synchronization interval (HH:MM:SS)")
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                mirror_core::parse_interval(input)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()?;
        settings.interval = Some(mirror_core::parse_interval(&text)?);
    }
    if needs.log_file && settings.log_file.is_none() {
        settings.log_file = Some(prompt_path("Log file path", validate_log_file)?);
    }
    Ok(())
}

fn prompt_path(prompt: &str, validate: fn(&Path) -> std::result::Result<(), String>) -> Result<PathBuf> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| validate(Path::new(input.trim())))
        .interact_text()?;
    Ok(PathBuf::from(text.trim()))
}

fn validate_source(path: &Path) -> std::result::Result<(), String> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(format!("'{}' is not an existing directory", path.display()))
    }
}

fn validate_replica(path: &Path) -> std::result::Result<(), String> {
    if path.exists() && !path.is_dir() {
        Err(format!("'{}' exists and is not a directory", path.display()))
    } else {
        Ok(())
    }
}

fn validate_log_file(path: &Path) -> std::result::Result<(), String> {
    if path.is_dir() {
        Err(format!("'{}' is a directory", path.display()))
    } else if path.as_os_str().is_empty() {
        Err("a log file path is required".to_string())
    } else {
        Ok(())
    }
}
