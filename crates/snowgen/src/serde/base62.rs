pub mod as_base62 {
    use crate::Base62Codec;
    use serde::{Deserialize, Deserializer, Serializer, de, ser};

    /// Serialize an ID as its base-62 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is negative or the underlying serializer
    /// fails.
    pub fn serialize<S>(id: &i64, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let raw = u64::try_from(*id).map_err(|_| ser::Error::custom("negative id"))?;
        s.serialize_str(&Base62Codec::encode(raw))
    }

    /// Deserialize an ID from its base-62 string.
    ///
    /// Unlike [`Base62Codec::decode`], invalid characters are rejected rather
    /// than truncated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not valid base 62
    /// - The value does not fit in 63 bits
    pub fn deserialize<'de, D>(d: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        let raw = Base62Codec::decode_strict(&s).map_err(de::Error::custom)?;
        i64::try_from(raw).map_err(|_| de::Error::custom("id exceeds 63 bits"))
    }
}
