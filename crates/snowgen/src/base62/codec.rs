use crate::Base62Error;

/// Digits in order of value: `0-9`, then `a-z`, then `A-Z`.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NO_VALUE: u8 = 255;
const BASE: u64 = 62;
/// `u64::MAX` needs 11 digits.
const MAX_DIGITS: usize = 11;

/// Lookup table for base-62 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 62 {
        lut[BASE62_ALPHABET[i as usize] as usize] = i;
        i += 1;
    }
    lut
};

/// Converts integers to and from a compact, case-sensitive base-62 form.
///
/// The codec is stateless. Note two behaviours inherited from the classic
/// encoding:
///
/// - `encode(0)` is the empty string, and `decode("")` is `0`.
/// - [`Base62Codec::decode`] stops at the first byte outside the alphabet and
///   returns what it has accumulated so far. Use
///   [`Base62Codec::decode_strict`] to reject such input instead.
///
/// # Example
///
/// ```
/// use snowgen::Base62Codec;
///
/// assert_eq!(Base62Codec::encode(61), "Z");
/// assert_eq!(Base62Codec::encode(62), "10");
/// assert_eq!(Base62Codec::decode("10"), 62);
/// assert_eq!(Base62Codec::decode("10-zz"), 62);
/// assert!(Base62Codec::decode_strict("10-zz").is_err());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Base62Codec;

impl Base62Codec {
    /// Encodes `value`, most significant digit first, without padding.
    pub fn encode(mut value: u64) -> String {
        let mut buf = [0_u8; MAX_DIGITS];
        let mut start = MAX_DIGITS;
        while value != 0 {
            start -= 1;
            buf[start] = BASE62_ALPHABET[(value % BASE) as usize];
            value /= BASE;
        }
        buf[start..].iter().map(|&b| b as char).collect()
    }

    /// Decodes `encoded`, most significant digit first.
    ///
    /// Decoding stops silently at the first byte outside the alphabet and
    /// returns the value of the prefix before it. Values longer than 64 bits
    /// wrap around.
    pub fn decode(encoded: &str) -> u64 {
        let mut acc = 0_u64;
        for b in encoded.bytes() {
            let val = LOOKUP[b as usize];
            if val == NO_VALUE {
                break;
            }
            acc = acc.wrapping_mul(BASE).wrapping_add(u64::from(val));
        }
        acc
    }

    /// Decodes `encoded`, rejecting anything [`Self::encode`] cannot
    /// produce apart from leading zeros.
    ///
    /// # Errors
    ///
    /// - [`Base62Error::DecodeEmpty`] for an empty string
    /// - [`Base62Error::DecodeInvalidAscii`] for a byte outside the alphabet
    /// - [`Base62Error::DecodeOverflow`] if the value exceeds `u64::MAX`
    pub fn decode_strict(encoded: &str) -> Result<u64, Base62Error> {
        if encoded.is_empty() {
            return Err(Base62Error::DecodeEmpty);
        }
        let mut acc = 0_u64;
        for (index, byte) in encoded.bytes().enumerate() {
            let val = LOOKUP[byte as usize];
            if val == NO_VALUE {
                return Err(Base62Error::DecodeInvalidAscii { byte, index });
            }
            acc = acc
                .checked_mul(BASE)
                .and_then(|acc| acc.checked_add(u64::from(val)))
                .ok_or(Base62Error::DecodeOverflow)?;
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_alphabet_order() {
        assert_eq!(Base62Codec::encode(1), "1");
        assert_eq!(Base62Codec::encode(10), "a");
        assert_eq!(Base62Codec::encode(35), "z");
        assert_eq!(Base62Codec::encode(36), "A");
        assert_eq!(Base62Codec::encode(61), "Z");
        assert_eq!(Base62Codec::encode(62), "10");
        assert_eq!(Base62Codec::encode(62 * 62 - 1), "ZZ");
    }

    #[test]
    fn encode_decode_preserves_positive_values() {
        for &v in &[
            1,
            42,
            61,
            62,
            3843,
            17_956_864,
            i64::MAX as u64,
            u64::MAX,
            0x1234_5678_90AB_CDEF,
        ] {
            let s = Base62Codec::encode(v);
            assert_eq!(Base62Codec::decode(&s), v, "roundtrip for {v}: b62={s}");
            assert_eq!(Base62Codec::decode_strict(&s), Ok(v));
        }
    }

    #[test]
    fn encode_max_fits_eleven_digits() {
        assert_eq!(Base62Codec::encode(u64::MAX), "lYGhA16ahyf");
        assert_eq!(Base62Codec::encode(u64::MAX).len(), MAX_DIGITS);
    }

    #[test]
    fn zero_encodes_to_empty_string() {
        // Zero has no digits; the empty string decodes back to zero, so the
        // roundtrip holds even though "" is not a visible ID.
        assert_eq!(Base62Codec::encode(0), "");
        assert_eq!(Base62Codec::decode(""), 0);
        assert_eq!(Base62Codec::decode_strict(""), Err(Base62Error::DecodeEmpty));
        assert_eq!(Base62Codec::decode_strict("0"), Ok(0));
    }

    #[test]
    fn decode_is_case_sensitive() {
        assert_eq!(Base62Codec::decode("a"), 10);
        assert_eq!(Base62Codec::decode("A"), 36);
    }

    #[test]
    fn decode_truncates_at_first_invalid_character() {
        // Lenient decoding keeps the prefix and ignores the rest.
        assert_eq!(Base62Codec::decode("10!ZZ"), 62);
        assert_eq!(Base62Codec::decode("1 0"), 1);
        assert_eq!(Base62Codec::decode("-1"), 0);
        assert_eq!(Base62Codec::decode("é"), 0);
    }

    #[test]
    fn decode_strict_reports_invalid_character() {
        assert_eq!(
            Base62Codec::decode_strict("10!ZZ"),
            Err(Base62Error::DecodeInvalidAscii {
                byte: b'!',
                index: 2,
            })
        );
    }

    #[test]
    fn decode_strict_reports_overflow() {
        assert_eq!(
            Base62Codec::decode_strict("lYGhA16ahyg"),
            Err(Base62Error::DecodeOverflow)
        );
        assert_eq!(
            Base62Codec::decode_strict("100000000000"),
            Err(Base62Error::DecodeOverflow)
        );
    }

    #[test]
    fn leading_zeros_do_not_change_the_value() {
        assert_eq!(Base62Codec::decode("00010"), 62);
        assert_eq!(Base62Codec::decode_strict("00010"), Ok(62));
    }
}
