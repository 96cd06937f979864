//! State file persistence.
//!
//! The store snapshot lives in `state.json` inside the data directory.
//! A missing file is a fresh store; a malformed one is an error, not a
//! silent reset.

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::state::AppState;

pub const STATE_FILE: &str = "state.json";

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed state file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Read `state.json` from the data directory. Missing file → default state.
pub fn read_state(data_dir: &Path) -> Result<AppState, StateError> {
    let path = data_dir.join(STATE_FILE);
    if !path.exists() {
        return Ok(AppState::default());
    }
    let content = fs::read_to_string(&path).map_err(|e| StateError::Read {
        path: path.clone(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| StateError::Parse { path, source: e })
}

/// Write `state.json` to the data directory.
pub fn write_state(data_dir: &Path, state: &AppState) -> Result<(), StateError> {
    let path = data_dir.join(STATE_FILE);
    let content = serde_json::to_string_pretty(state).map_err(|e| StateError::Write {
        path: path.clone(),
        source: e.into(),
    })?;
    fs::write(&path, content).map_err(|e| StateError::Write { path, source: e })
}
