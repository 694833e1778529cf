//! Hilbert Core Library
//!
//! The Infinite Hotel engine: guests queued per channel are placed in
//! rooms numbered `p1^sequence * p2^channel`, with quadratic probing on
//! collisions. Also provides the heap sort, report export and config
//! loading used by the console front end.

pub mod config;
pub mod error;
pub mod export;
pub mod hotel;
pub mod invariants;
pub mod models;
pub mod primes;
pub mod sort;
pub mod traversal;

pub use config::{ConfigError, HotelConfig};
pub use error::{Error, Result};
pub use export::{export_to_path, read_report, write_report, ExportFormat, HotelSnapshot, Report};
pub use hotel::{Assignment, BatchReport, Footprint, HilbertHotel, PrimePair};
pub use models::*;
pub use primes::{is_prime, next_prime};
pub use sort::heap_sort;
pub use traversal::{Cell, DiagonalLayer};

/// Re-exported so callers can name room numbers without a direct dependency
pub use num_bigint::BigUint;
