//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use num_traits::Zero;

use crate::hotel::{HilbertHotel, PrimePair};
use crate::primes::is_prime;

/// Validate that both bases are prime
pub fn assert_prime_pair_invariants(primes: &PrimePair) {
    debug_assert!(
        is_prime(primes.first()) && is_prime(primes.second()),
        "Prime pair {} holds a composite base",
        primes
    );
    debug_assert!(
        primes.first() != primes.second(),
        "Prime pair {} repeats a base",
        primes
    );
}

/// Validate that the hotel's state is internally consistent
pub fn assert_hotel_invariants(hotel: &HilbertHotel) {
    if !cfg!(debug_assertions) {
        return;
    }

    assert_prime_pair_invariants(&hotel.primes());

    for (room, guest) in hotel.rooms() {
        // Room numbers are positive
        debug_assert!(!room.is_zero(), "Guest {} bound to room 0", guest);

        // A guest's round was handed out by its channel's counter
        debug_assert!(
            guest.round >= 1 && guest.round <= hotel.round(&guest.channel),
            "Room {} holds {} but channel {} is at round {}",
            room,
            guest,
            guest.channel,
            hotel.round(&guest.channel)
        );
    }

    // Queued counts are positive
    debug_assert!(
        hotel.pending().iter().all(|(&channel, &count)| channel >= 1 && count >= 1),
        "Pending queue holds an empty entry: {:?}",
        hotel.pending()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    use crate::models::Tag;

    #[test]
    fn test_fresh_hotel() {
        assert_hotel_invariants(&HilbertHotel::new());
    }

    #[test]
    fn test_hotel_after_batches() {
        let mut hotel = HilbertHotel::new();
        hotel.enqueue(1, 4).unwrap();
        hotel.enqueue(3, 2).unwrap();
        hotel.assign_pending().unwrap();
        hotel
            .add(BigUint::from(5u32), Tag::Manual, Tag::Manual)
            .unwrap();
        hotel.enqueue(2, 3).unwrap();
        hotel.assign_pending().unwrap();
        assert_hotel_invariants(&hotel);
    }

    #[test]
    #[should_panic(expected = "composite base")]
    #[cfg(debug_assertions)]
    fn test_composite_base_detected() {
        assert_prime_pair_invariants(&PrimePair::new_unchecked(4, 3));
    }

    #[test]
    #[should_panic(expected = "repeats a base")]
    #[cfg(debug_assertions)]
    fn test_equal_bases_detected() {
        assert_prime_pair_invariants(&PrimePair::new_unchecked(5, 5));
    }
}
