//! Address flattening - dotted-decimal strings to digit sequences.
//!
//! Each component is read as a number and then split back into its decimal
//! digits, so `"010"` contributes `1, 0` and not `0, 1, 0`.

use crate::error::AddressError;
use crate::scale::{derive_scale, DerivedScale};

/// Flatten a dotted-decimal address into its digits, in order.
///
/// # Errors
///
/// - [`AddressError::Empty`] for blank input
/// - [`AddressError::Unsupported`] for addresses containing `:` (IPv6)
/// - [`AddressError::InvalidComponent`] for components that are empty, contain
///   anything but ASCII digits, or overflow `u32`
pub fn address_digits(address: &str) -> Result<Vec<i32>, AddressError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(AddressError::Empty);
    }
    if address.contains(':') {
        return Err(AddressError::Unsupported {
            address: address.to_string(),
        });
    }

    let mut digits = Vec::new();
    for (position, component) in address.split('.').enumerate() {
        let value = parse_component(component).ok_or_else(|| AddressError::InvalidComponent {
            component: component.to_string(),
            position,
        })?;
        digits.extend(decimal_digits(value));
    }
    Ok(digits)
}

/// Derive the scale for a dotted-decimal address.
pub fn scale_for_address(address: &str) -> Result<DerivedScale, AddressError> {
    let digits = address_digits(address)?;
    Ok(derive_scale(&digits))
}

fn parse_component(component: &str) -> Option<u32> {
    // u32::from_str accepts a leading '+', which is not an address digit
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse().ok()
}

fn decimal_digits(value: u32) -> impl Iterator<Item = i32> {
    value
        .to_string()
        .into_bytes()
        .into_iter()
        .map(|b| i32::from(b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_digits() {
        assert_eq!(
            address_digits("192.168.0.1").unwrap(),
            vec![1, 9, 2, 1, 6, 8, 0, 1]
        );
    }

    #[test]
    fn test_leading_zeros_dropped() {
        assert_eq!(address_digits("10.010.1.1").unwrap(), vec![1, 0, 1, 0, 1, 1]);
        assert_eq!(address_digits("000.7").unwrap(), vec![0, 7]);
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(address_digits(" 8.8.4.4\n").unwrap(), vec![8, 8, 4, 4]);
    }

    #[test]
    fn test_any_component_count() {
        assert_eq!(address_digits("12345").unwrap(), vec![1, 2, 3, 4, 5]);
        assert_eq!(address_digits("1.2.3.4.5").unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_address() {
        assert_eq!(address_digits("   "), Err(AddressError::Empty));
    }

    #[test]
    fn test_invalid_components() {
        for (input, bad, position) in [
            ("1..2", "", 1),
            ("1.2.x.4", "x", 2),
            ("+1.2", "+1", 0),
            ("1.-2", "-2", 1),
            ("1.99999999999", "99999999999", 1),
            ("1.2.", "", 2),
        ] {
            assert_eq!(
                address_digits(input),
                Err(AddressError::InvalidComponent {
                    component: bad.to_string(),
                    position,
                }),
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_ipv6_rejected() {
        assert!(matches!(
            address_digits("2001:db8::1"),
            Err(AddressError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_scale_for_address() {
        let scale = scale_for_address("203.0.113.7").unwrap();
        assert_eq!(scale.notes(), &["C", "Db", "D", "Eb", "G"]);
        assert!(scale.indices().iter().all(|&i| i < 10));
    }
}
