use std::path::PathBuf;

use qs_core::QuestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("scripts-dir does not exist: {}", path.display())]
    SourceNotFound { path: PathBuf },
    #[error("scripts-dir is not a directory: {}", path.display())]
    SourceNotDir { path: PathBuf },
    #[error("No .quest files under {}.", path.display())]
    SourceEmpty { path: PathBuf },
    #[error("Failed to read file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse world file {}: {source}", path.display())]
    ParseWorld {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Quest(#[from] QuestError),
}

impl CliError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => "CLI_SOURCE_NOT_FOUND",
            Self::SourceNotDir { .. } => "CLI_SOURCE_NOT_DIR",
            Self::SourceEmpty { .. } => "CLI_SOURCE_EMPTY",
            Self::ReadFile { .. } => "CLI_SOURCE_READ",
            Self::ParseWorld { .. } => "CLI_WORLD_INVALID",
            Self::Quest(error) => error.code(),
        }
    }
}

pub(crate) fn emit_error(error: &CliError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code());
    match serde_json::to_string(&error.to_string()) {
        Ok(message) => println!("ERROR_MSG_JSON:{}", message),
        Err(_) => println!("ERROR_MSG:{}", error),
    }
    1
}
