//! Push key generation
//!
//! Keys are 20 characters: 8 encode the millisecond timestamp, 12 are random.
//! The alphabet is in ASCII order, so keys sort lexicographically in creation
//! order. Keys generated within the same millisecond increment the random part
//! of the previous key instead of drawing new randomness, which keeps them
//! strictly increasing.

use rand::Rng;

const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Generates chronologically sortable push keys
#[derive(Debug, Default)]
pub struct PushIdGenerator {
    last_time: Option<i64>,
    last_rand: [u8; 12],
}

impl PushIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a key for the current time
    pub fn next_id(&mut self) -> String {
        self.next_id_at(chrono::Utc::now().timestamp_millis())
    }

    /// Generate a key for `now` (epoch milliseconds)
    ///
    /// A clock that moves backwards is treated as the previous timestamp so
    /// ordering is preserved.
    pub fn next_id_at(&mut self, now: i64) -> String {
        let now = self.last_time.map_or(now, |last| now.max(last));
        let duplicate = self.last_time == Some(now);
        self.last_time = Some(now);

        let mut id = String::with_capacity(20);

        let mut timestamp_chars = [0u8; 8];
        let mut remaining = now.max(0);
        for slot in timestamp_chars.iter_mut().rev() {
            *slot = PUSH_CHARS[(remaining % 64) as usize];
            remaining /= 64;
        }
        id.extend(timestamp_chars.iter().map(|&c| c as char));

        if duplicate {
            // Increment, carrying over saturated digits
            for digit in self.last_rand.iter_mut().rev() {
                if *digit == 63 {
                    *digit = 0;
                } else {
                    *digit += 1;
                    break;
                }
            }
        } else {
            let mut rng = rand::thread_rng();
            for digit in &mut self.last_rand {
                *digit = rng.gen_range(0..64);
            }
        }

        id.extend(self.last_rand.iter().map(|&d| PUSH_CHARS[d as usize] as char));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_twenty_chars_from_alphabet() {
        let mut generator = PushIdGenerator::new();
        let id = generator.next_id();
        assert_eq!(id.len(), 20);
        assert!(id.bytes().all(|b| PUSH_CHARS.contains(&b)));
    }

    #[test]
    fn ids_sort_in_creation_order_across_milliseconds() {
        let mut generator = PushIdGenerator::new();
        let first = generator.next_id_at(1_700_000_000_000);
        let second = generator.next_id_at(1_700_000_000_001);
        assert!(first < second);
        assert_ne!(first[..8], second[..8]);
    }

    #[test]
    fn ids_within_same_millisecond_are_strictly_increasing() {
        let mut generator = PushIdGenerator::new();
        let ids: Vec<String> = (0..100)
            .map(|_| generator.next_id_at(1_700_000_000_000))
            .collect();

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn clock_going_backwards_keeps_order() {
        let mut generator = PushIdGenerator::new();
        let later = generator.next_id_at(2_000);
        let earlier = generator.next_id_at(1_000);
        assert!(later < earlier);
    }

    #[test]
    fn timestamp_prefix_encodes_zero() {
        let mut generator = PushIdGenerator::new();
        let id = generator.next_id_at(0);
        assert_eq!(&id[..8], "--------");
    }
}
