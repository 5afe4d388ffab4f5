//! Room code and host token generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Safe character set for room codes (excludes 0/O and 1/I to avoid confusion)
const CODE_CHARS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Room codes are 6 characters, shared verbally or on screen.
pub const CODE_LENGTH: usize = 6;

const TOKEN_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LENGTH: usize = 32;

/// Generate a random room code.
///
/// Codes only need to be readable and collision-avoidant; uniqueness is
/// enforced by the store's constraint on `code`.
pub fn generate_room_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_CHARS[rng.random_range(0..CODE_CHARS.len())] as char)
        .collect()
}

/// Generate a host token.
///
/// The token is the sole host credential and is never re-derivable, so it is
/// drawn from an OS-seeded CSPRNG rather than the thread-local generator.
pub fn generate_host_token() -> String {
    let mut rng = StdRng::from_os_rng();
    (0..TOKEN_LENGTH)
        .map(|_| TOKEN_CHARS[rng.random_range(0..TOKEN_CHARS.len())] as char)
        .collect()
}

/// Constant-time byte comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_code_shape() {
        for _ in 0..100 {
            let code = generate_room_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.bytes().all(|b| CODE_CHARS.contains(&b)));
        }
    }

    #[test]
    fn test_room_code_excludes_ambiguous_chars() {
        assert_eq!(CODE_CHARS.len(), 32);
        for ambiguous in [b'0', b'O', b'1', b'I'] {
            assert!(!CODE_CHARS.contains(&ambiguous));
        }
    }

    #[test]
    fn test_host_token_shape() {
        let token = generate_host_token();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[test]
    fn test_host_tokens_are_distinct() {
        // 36^32 possibilities; a collision here means the generator is broken.
        assert_ne!(generate_host_token(), generate_host_token());
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(!constant_time_eq(b"hello", b"world"));
        assert!(!constant_time_eq(b"hello", b"hell"));
        assert!(!constant_time_eq(b"", b"x"));
        assert!(constant_time_eq(b"", b""));
    }
}
