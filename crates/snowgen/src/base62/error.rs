/// Errors from [`Base62Codec::decode_strict`].
///
/// [`Base62Codec::decode_strict`]: crate::Base62Codec::decode_strict
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Base62Error {
    #[error("empty input")]
    DecodeEmpty,
    #[error("invalid ascii byte {byte:#04x} at index {index}")]
    DecodeInvalidAscii { byte: u8, index: usize },
    #[error("decoded value does not fit in 64 bits")]
    DecodeOverflow,
}
