//! Prime helpers for the room-number bases

/// Check whether `n` is prime by trial division over odd candidates
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut divisor = 3;
    // divisor <= n / divisor is the overflow-free form of divisor^2 <= n
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Smallest prime strictly greater than `n`
///
/// # Panics
///
/// Panics if no such prime fits in a `u64` (`n` at or above the largest
/// 64-bit prime).
pub fn next_prime(n: u64) -> u64 {
    let mut candidate = n;
    loop {
        candidate = candidate
            .checked_add(1)
            .expect("no prime above the given value fits in u64");
        if is_prime(candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_values() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(!is_prime(9));
        assert!(!is_prime(25));
        assert!(is_prime(97));
    }

    #[test]
    fn test_next_prime_known_values() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(1), 2);
        assert_eq!(next_prime(2), 3);
        assert_eq!(next_prime(3), 5);
        assert_eq!(next_prime(13), 17);
        assert_eq!(next_prime(89), 97);
        assert_eq!(next_prime(7919), 7927);
    }

    #[test]
    fn test_next_prime_is_minimal() {
        for n in 0..2_000u64 {
            let p = next_prime(n);
            assert!(p > n);
            assert!(is_prime(p), "{} is not prime", p);
            assert!(
                (n + 1..p).all(|m| !is_prime(m)),
                "a prime lies between {} and {}",
                n,
                p
            );
        }
    }

    proptest! {
        #[test]
        fn next_prime_is_the_smallest_larger_prime(n in 0u64..5_000_000) {
            let p = next_prime(n);
            prop_assert!(p > n);
            prop_assert!(is_prime(p));
            prop_assert!((n + 1..p).all(|m| !is_prime(m)));
        }

        #[test]
        fn is_prime_agrees_with_factor_search(n in 0u64..20_000) {
            let has_factor = (2..n).any(|d| n % d == 0);
            prop_assert_eq!(is_prime(n), n >= 2 && !has_factor);
        }
    }

    #[test]
    fn test_large_prime_near_u32_boundary() {
        // 4294967311 is the first prime above 2^32
        assert_eq!(next_prime(u32::MAX as u64), 4_294_967_311);
    }
}
