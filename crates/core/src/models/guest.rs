//! Guest model - a single hotel occupant

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Tag;

/// A guest with their origin channel, sequence position, and arrival round
///
/// Guests are immutable once created. A room binding lasts until the
/// guest is removed by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guest {
    pub channel: Tag,
    pub sequence: Tag,
    /// 1-based index of the batch in which the channel was last advanced
    pub round: u64,
}

impl Guest {
    pub fn new(channel: Tag, sequence: Tag, round: u64) -> Self {
        Self {
            channel,
            sequence,
            round,
        }
    }

    /// Guest placed by the assignment engine
    pub fn numbered(channel: u32, sequence: u32, round: u64) -> Self {
        Self::new(Tag::Numbered(channel), Tag::Numbered(sequence), round)
    }

    /// Guest inserted by hand with no channel or sequence of its own
    pub fn manual(round: u64) -> Self {
        Self::new(Tag::Manual, Tag::Manual, round)
    }
}

impl fmt::Display for Guest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Guest(Ch={}, Seq={}, Round={})",
            self.channel, self.sequence, self.round
        )
    }
}
