//! Data models for the hotel

mod guest;
mod tag;

pub use guest::*;
pub use tag::*;
