//! ipscale core - derive a musical scale from the digits of an IP address.
//!
//! This crate holds the domain logic behind the `ipscale` CLI. Everything here
//! is synchronous and free of I/O; looking up the public address is left to
//! the caller.
//!
//! # Features
//!
//! - **Scale derivation**: map digits to a deduplicated, table-ordered scale
//! - **Address flattening**: turn a dotted-decimal address into its digits
//! - **Sequence generation**: random note/octave tokens drawn from a scale
//!
//! # Usage
//!
//! ```
//! use ipscale_core::{address_digits, derive_scale};
//!
//! let digits = address_digits("192.168.0.1").unwrap();
//! let scale = derive_scale(&digits);
//! assert_eq!(scale.notes(), &["C", "Db", "D", "Gb", "Ab", "A"]);
//! ```

pub mod address;
pub mod error;
pub mod scale;
pub mod sequence;

pub use address::{address_digits, scale_for_address};
pub use error::{AddressError, CoreError, Result, SequenceError};
pub use scale::{derive_scale, DerivedScale, SCALE_DEGREES, TONIC};
pub use sequence::{generate_sequence, sequence_for_address, Sequence, SequenceOptions, Tone};
