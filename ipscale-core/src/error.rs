//! Error types for ipscale-core.

use thiserror::Error;

/// Result type alias for ipscale-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while flattening an address into digits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Nothing to flatten.
    #[error("Empty address")]
    Empty,

    /// A dot-separated component is not a plain decimal number.
    #[error("Invalid address component '{component}' at position {position}")]
    InvalidComponent {
        /// The offending component text.
        component: String,
        /// Zero-based index of the component.
        position: usize,
    },

    /// Address family that has no decimal-digit mapping (e.g. IPv6).
    #[error("Unsupported address '{address}': only dotted-decimal addresses are supported")]
    Unsupported {
        /// The rejected address.
        address: String,
    },
}

/// Errors raised by sequence options.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// An explicit length of zero was requested.
    #[error("Sequence length must be at least 1")]
    EmptySequence,

    /// The octave range leaves the MIDI note range.
    #[error("Octave {octave} is out of range (maximum {max})")]
    OctaveOutOfRange {
        /// Highest octave the options would produce.
        octave: u16,
        /// Highest supported octave.
        max: u8,
    },
}

/// Any error produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AddressError::InvalidComponent {
            component: "abc".to_string(),
            position: 2,
        };
        assert!(err.to_string().contains("abc"));
        assert!(err.to_string().contains('2'));

        let err = SequenceError::OctaveOutOfRange { octave: 12, max: 8 };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains('8'));
    }

    #[test]
    fn test_core_error_is_transparent() {
        let err: CoreError = AddressError::Empty.into();
        assert_eq!(err.to_string(), "Empty address");
    }
}
