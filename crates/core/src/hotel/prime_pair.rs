//! The two prime bases used to encode room numbers

use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::primes::{is_prime, next_prime};
use crate::traversal::Cell;

/// Ordered pair of prime bases
///
/// A guest at `(channel, sequence)` maps to the nominal room
/// `first^sequence * second^channel`. Unique factorization makes this
/// injective for a fixed pair of distinct primes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPrimePair")]
pub struct PrimePair {
    first: u64,
    second: u64,
}

#[derive(Deserialize)]
struct RawPrimePair {
    first: u64,
    second: u64,
}

impl TryFrom<RawPrimePair> for PrimePair {
    type Error = Error;

    fn try_from(raw: RawPrimePair) -> Result<Self> {
        Self::new(raw.first, raw.second)
    }
}

impl PrimePair {
    /// Create a pair, rejecting non-prime or equal bases
    pub fn new(first: u64, second: u64) -> Result<Self> {
        for base in [first, second] {
            if !is_prime(base) {
                return Err(Error::InvalidInput(format!("{} is not prime", base)));
            }
        }
        if first == second {
            return Err(Error::InvalidInput(format!(
                "Bases must be distinct, got {} twice",
                first
            )));
        }
        Ok(Self { first, second })
    }

    /// Build a pair without validation
    #[cfg(test)]
    pub(crate) fn new_unchecked(first: u64, second: u64) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> u64 {
        self.first
    }

    pub fn second(&self) -> u64 {
        self.second
    }

    /// The pair used by the next batch
    ///
    /// Distinct primes stay distinct: for `p < q`,
    /// `next_prime(p) <= q < next_prime(q)`.
    pub fn advanced(&self) -> Self {
        Self {
            first: next_prime(self.first),
            second: next_prime(self.second),
        }
    }

    /// Nominal (pre-probing) room for a grid cell
    pub fn room_for(&self, cell: Cell) -> BigUint {
        BigUint::from(self.first).pow(cell.sequence) * BigUint::from(self.second).pow(cell.channel)
    }
}

impl Default for PrimePair {
    fn default() -> Self {
        Self {
            first: 2,
            second: 3,
        }
    }
}

impl fmt::Display for PrimePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_two_three() {
        let pair = PrimePair::default();
        assert_eq!((pair.first(), pair.second()), (2, 3));
    }

    #[test]
    fn test_rejects_composites() {
        assert!(PrimePair::new(2, 3).is_ok());
        assert!(PrimePair::new(4, 3).is_err());
        assert!(PrimePair::new(2, 1).is_err());
    }

    #[test]
    fn test_rejects_equal_bases() {
        assert!(matches!(PrimePair::new(3, 3), Err(Error::InvalidInput(_))));
        assert!(PrimePair::new(3, 2).is_ok());
    }

    #[test]
    fn test_advanced() {
        let pair = PrimePair::default().advanced();
        assert_eq!((pair.first(), pair.second()), (3, 5));
        let pair = pair.advanced();
        assert_eq!((pair.first(), pair.second()), (5, 7));
    }

    #[test]
    fn test_advanced_keeps_adjacent_bases_distinct() {
        // 11 and 13 are adjacent primes; the smaller one catches up to 13
        let pair = PrimePair::new(11, 13).unwrap().advanced();
        assert_eq!((pair.first(), pair.second()), (13, 17));
    }

    #[test]
    fn test_deserialize_validates() {
        let pair: PrimePair = serde_json::from_str(r#"{"first":5,"second":7}"#).unwrap();
        assert_eq!(pair, PrimePair::new(5, 7).unwrap());
        assert!(serde_json::from_str::<PrimePair>(r#"{"first":4,"second":7}"#).is_err());
        assert!(serde_json::from_str::<PrimePair>(r#"{"first":7,"second":7}"#).is_err());
    }

    #[test]
    fn test_room_for() {
        let pair = PrimePair::default();
        assert_eq!(pair.room_for(Cell::new(1, 1)), BigUint::from(6u32));
        assert_eq!(pair.room_for(Cell::new(1, 2)), BigUint::from(12u32));
        assert_eq!(pair.room_for(Cell::new(2, 1)), BigUint::from(18u32));
    }

    #[test]
    fn test_room_for_exceeds_u64() {
        let pair = PrimePair::default();
        let room = pair.room_for(Cell::new(40, 40));
        assert!(room.bits() > 64);
        assert_eq!(room, BigUint::from(2u32).pow(40) * BigUint::from(3u32).pow(40));
    }
}
