//! Approximate memory usage of the hotel state

use std::fmt;
use std::mem::size_of;

use num_bigint::BigUint;

use super::HilbertHotel;
use crate::models::{Guest, Tag};

/// Estimated heap usage of the registry and queues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub occupants: usize,
    pub pending_channels: usize,
    /// Bytes held by big-integer digits of the room numbers
    pub room_digit_bytes: usize,
    /// Table slots allocated for the registry
    pub registry_bytes: usize,
    /// Table slots allocated for the round counters
    pub round_bytes: usize,
}

impl Footprint {
    pub fn total_bytes(&self) -> usize {
        self.room_digit_bytes + self.registry_bytes + self.round_bytes
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} occupants using approximately {} bytes ({} registry, {} room digits, {} round counters)",
            self.occupants,
            self.total_bytes(),
            self.registry_bytes,
            self.room_digit_bytes,
            self.round_bytes
        )
    }
}

impl HilbertHotel {
    /// Estimate memory held by the hotel state
    pub fn footprint(&self) -> Footprint {
        let rooms = self.rooms();
        // Digits are stored in 64-bit limbs
        let room_digit_bytes = rooms
            .keys()
            .map(|room| room.bits().div_ceil(64) as usize * 8)
            .sum();

        Footprint {
            occupants: rooms.len(),
            pending_channels: self.pending().len(),
            room_digit_bytes,
            registry_bytes: rooms.capacity() * size_of::<(BigUint, Guest)>(),
            round_bytes: self.rounds().capacity() * size_of::<(Tag, u64)>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_hotel() {
        let footprint = HilbertHotel::new().footprint();
        assert_eq!(footprint.occupants, 0);
        assert_eq!(footprint.room_digit_bytes, 0);
    }

    #[test]
    fn test_grows_with_occupants() {
        let mut hotel = HilbertHotel::new();
        let empty = hotel.footprint();

        hotel.enqueue(1, 20).unwrap();
        hotel.enqueue(2, 5).unwrap();
        hotel.assign_pending().unwrap();

        let full = hotel.footprint();
        assert_eq!(full.occupants, 25);
        assert_eq!(full.pending_channels, 0);
        assert!(full.room_digit_bytes >= 25 * 8);
        assert!(full.total_bytes() > empty.total_bytes());
        assert!(full.to_string().starts_with("25 occupants"));
    }
}
