//! Short public identifiers.
//!
//! Store counters are turned into base-36 strings (`0-9a-z`, most significant
//! digit first, no padding). Within one length, a larger counter always sorts
//! after a smaller one.

use crate::errors::AppError;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RADIX: u64 = 36;

/// Encode a non-negative counter value as a base-36 identifier.
///
/// Counters come from the store as signed integers, so a negative value is
/// rejected with [`AppError::InvalidArgument`] rather than wrapped.
pub fn encode(number: i64) -> Result<String, AppError> {
    let mut n = u64::try_from(number).map_err(|_| {
        AppError::InvalidArgument(format!(
            "identifier counter must be non-negative, got {}",
            number
        ))
    })?;

    if n == 0 {
        return Ok("0".to_string());
    }

    let mut digits = Vec::new();
    while n != 0 {
        digits.push(ALPHABET[(n % RADIX) as usize]);
        n /= RADIX;
    }
    digits.reverse();

    // Every byte comes from ALPHABET.
    Ok(digits.into_iter().map(char::from).collect())
}

/// Decode a base-36 identifier back into its counter value.
///
/// Only canonical output of [`encode`] is accepted: lowercase digits, no
/// leading zeros (except `"0"` itself), no overflow.
pub fn decode(id: &str) -> Result<u64, AppError> {
    if id.is_empty() {
        return Err(AppError::InvalidArgument("identifier is empty".to_string()));
    }
    if id.len() > 1 && id.starts_with('0') {
        return Err(AppError::InvalidArgument(format!(
            "identifier '{}' has a leading zero",
            id
        )));
    }

    id.chars().try_fold(0u64, |acc, c| {
        let digit = match c {
            '0'..='9' => c as u64 - '0' as u64,
            'a'..='z' => c as u64 - 'a' as u64 + 10,
            _ => {
                return Err(AppError::InvalidArgument(format!(
                    "identifier '{}' contains invalid character '{}'",
                    id, c
                )))
            }
        };
        acc.checked_mul(RADIX)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| {
                AppError::InvalidArgument(format!("identifier '{}' is out of range", id))
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_values() {
        assert_eq!(encode(0).unwrap(), "0");
        assert_eq!(encode(1).unwrap(), "1");
        assert_eq!(encode(9).unwrap(), "9");
        assert_eq!(encode(10).unwrap(), "a");
        assert_eq!(encode(35).unwrap(), "z");
        assert_eq!(encode(36).unwrap(), "10");
        assert_eq!(encode(1295).unwrap(), "zz");
        assert_eq!(encode(1296).unwrap(), "100");
        assert_eq!(encode(i64::MAX).unwrap(), "1y2p0ij32e8e7");
    }

    #[test]
    fn test_negative_is_invalid_argument() {
        assert!(matches!(encode(-1), Err(AppError::InvalidArgument(_))));
        assert!(matches!(encode(i64::MIN), Err(AppError::InvalidArgument(_))));
    }

    #[test]
    fn test_injective_and_ordered_within_length() {
        let mut seen = HashSet::new();
        let mut previous = encode(0).unwrap();
        for n in 1..5000 {
            let id = encode(n).unwrap();
            assert!(seen.insert(id.clone()), "duplicate id {} for {}", id, n);
            assert!(id.len() >= previous.len());
            if id.len() == previous.len() {
                assert!(id > previous, "{} should sort after {}", id, previous);
            }
            previous = id;
        }
    }

    #[test]
    fn test_decode_inverts_encode() {
        for n in [0i64, 1, 35, 36, 1295, 1296, 48_503, i64::MAX] {
            assert_eq!(decode(&encode(n).unwrap()).unwrap(), n as u64);
        }
    }

    #[test]
    fn test_decode_rejects_non_canonical() {
        assert!(decode("").is_err());
        assert!(decode("00").is_err());
        assert!(decode("0a").is_err());
        assert!(decode("A").is_err());
        assert!(decode("a-b").is_err());
        assert!(decode("zzzzzzzzzzzzzzzz").is_err());
    }
}
