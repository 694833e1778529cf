//! Error types for Hilbert Core

use std::path::PathBuf;

use num_bigint::BigUint;
use thiserror::Error;

use crate::models::Guest;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Room {room} is already occupied by {occupant}")]
    Occupied { room: BigUint, occupant: Guest },

    #[error("Could not write to file '{}': {source}", .path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed report: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
