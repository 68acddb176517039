use crate::{BitLayout, DEFAULT_EPOCH, Result};
use core::time::Duration;

/// What to do when the timestamp offset outgrows its field.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OverflowPolicy {
    /// Pack anyway. The offset spills into the sign bit and the resulting
    /// negative value is negated, so IDs stay non-negative but lose their
    /// ordering by time. This matches the classic behaviour of generators
    /// with narrow timestamp fields.
    #[default]
    Negate,
    /// Refuse with [`Error::TimestampOverflow`].
    ///
    /// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
    Reject,
}

/// Immutable settings of an [`IdGenerator`].
///
/// # Example
///
/// ```
/// use snowgen::{GeneratorConfig, OverflowPolicy, TWITTER_EPOCH};
///
/// let config = GeneratorConfig::default()
///     .with_epoch(TWITTER_EPOCH)
///     .with_bits(5, 5, 12)
///     .with_overflow_policy(OverflowPolicy::Reject);
///
/// let layout = config.layout().unwrap();
/// assert_eq!(layout.timestamp_shift(), 22);
/// ```
///
/// [`IdGenerator`]: crate::IdGenerator
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeneratorConfig {
    /// Reference instant, as a duration since the Unix epoch. Serialized as
    /// whole milliseconds.
    #[cfg_attr(feature = "serde", serde(with = "crate::serde::as_millis"))]
    pub epoch: Duration,
    pub worker_id_bits: u8,
    pub datacenter_id_bits: u8,
    pub sequence_bits: u8,
    pub overflow_policy: OverflowPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let layout = BitLayout::default();
        Self {
            epoch: DEFAULT_EPOCH,
            worker_id_bits: layout.worker_id_bits(),
            datacenter_id_bits: layout.datacenter_id_bits(),
            sequence_bits: layout.sequence_bits(),
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub const fn with_epoch(mut self, epoch: Duration) -> Self {
        self.epoch = epoch;
        self
    }

    /// Sets the worker, datacenter and sequence widths. They are validated
    /// when the generator is built.
    #[must_use]
    pub const fn with_bits(
        mut self,
        worker_id_bits: u8,
        datacenter_id_bits: u8,
        sequence_bits: u8,
    ) -> Self {
        self.worker_id_bits = worker_id_bits;
        self.datacenter_id_bits = datacenter_id_bits;
        self.sequence_bits = sequence_bits;
        self
    }

    #[must_use]
    pub const fn with_overflow_policy(mut self, overflow_policy: OverflowPolicy) -> Self {
        self.overflow_policy = overflow_policy;
        self
    }

    /// The epoch in milliseconds since the Unix epoch.
    pub const fn epoch_millis(&self) -> u64 {
        self.epoch.as_millis() as u64
    }

    /// Validates the widths and returns the derived layout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBitWidths`] if the widths are unusable.
    ///
    /// [`Error::InvalidBitWidths`]: crate::Error::InvalidBitWidths
    pub const fn layout(&self) -> Result<BitLayout> {
        BitLayout::new(
            self.worker_id_bits,
            self.datacenter_id_bits,
            self.sequence_bits,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn default_config_uses_default_epoch_and_widths() {
        let config = GeneratorConfig::default();
        assert_eq!(config.epoch_millis(), 1_603_702_714_272);
        assert_eq!(config.layout().unwrap(), BitLayout::default());
        assert_eq!(config.overflow_policy, OverflowPolicy::Negate);
    }

    #[test]
    fn invalid_widths_surface_from_layout() {
        let config = GeneratorConfig::default().with_bits(30, 30, 10);
        assert_eq!(
            config.layout().unwrap_err(),
            Error::InvalidBitWidths {
                worker_id_bits: 30,
                datacenter_id_bits: 30,
                sequence_bits: 10,
            }
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_deserializes_with_defaults_for_missing_fields() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"sequence_bits":12,"overflow_policy":"reject"}"#).unwrap();
        assert_eq!(config.sequence_bits, 12);
        assert_eq!(config.worker_id_bits, 4);
        assert_eq!(config.overflow_policy, OverflowPolicy::Reject);
        assert_eq!(config.epoch, DEFAULT_EPOCH);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_epoch_is_serialized_as_millis() {
        use crate::TWITTER_EPOCH;

        let config: GeneratorConfig = serde_json::from_str(r#"{"epoch":1288834974657}"#).unwrap();
        assert_eq!(config.epoch, TWITTER_EPOCH);

        let json = serde_json::to_value(GeneratorConfig::default()).unwrap();
        assert_eq!(json["epoch"], serde_json::json!(1_603_702_714_272_u64));
    }
}
