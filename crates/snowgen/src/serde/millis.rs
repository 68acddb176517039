pub mod as_millis {
    use core::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer, ser};

    /// Serialize a duration as whole milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration does not fit in a `u64` of
    /// milliseconds or the underlying serializer fails.
    pub fn serialize<S>(duration: &Duration, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis())
            .map_err(|_| ser::Error::custom("duration exceeds u64 milliseconds"))?;
        s.serialize_u64(millis)
    }

    /// Deserialize a duration from whole milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, D>(d: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "super::as_millis")]
        epoch: Duration,
    }

    #[test]
    fn duration_is_written_as_millis() {
        let row = Row {
            epoch: Duration::from_millis(1_288_834_974_657),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"epoch":1288834974657}"#);
        assert_eq!(serde_json::from_str::<Row>(&json).unwrap(), row);
    }

    #[test]
    fn fractional_millis_are_truncated() {
        let row = Row {
            epoch: Duration::from_micros(1_500),
        };
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"epoch":1}"#);
    }
}
