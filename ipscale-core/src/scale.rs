//! Scale derivation from digit sequences.

use serde::Serialize;
use std::fmt;

/// Chromatic scale degrees starting at the tonic, indexed 0-11.
pub const SCALE_DEGREES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Index of the tonic in [`SCALE_DEGREES`].
pub const TONIC: usize = 0;

/// Deduplicated scale ordered by position in [`SCALE_DEGREES`].
///
/// Never empty: when no valid degree was observed it holds only the tonic
/// and [`DerivedScale::is_fallback`] returns `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedScale {
    notes: Vec<&'static str>,
    indices: Vec<usize>,
    fallback: bool,
}

impl DerivedScale {
    /// Note names in ascending table order.
    pub fn notes(&self) -> &[&'static str] {
        &self.notes
    }

    /// Table indices of the notes, parallel to [`DerivedScale::notes`].
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Whether the scale is the tonic-only default for empty or all-invalid input.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Whether the scale contains the degree at `index`.
    pub fn contains_index(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }
}

impl fmt::Display for DerivedScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notes.join(" "))
    }
}

/// Derive a scale from a sequence of degree indices.
///
/// Values outside `0..SCALE_DEGREES.len()` are ignored. Duplicates collapse and
/// the result follows table order, not input order. Empty or all-invalid input
/// yields the tonic alone.
///
/// Decimal digits only reach indices 0-9, so `Bb` and `B` never appear for
/// address-derived input.
pub fn derive_scale(digits: &[i32]) -> DerivedScale {
    let mut seen = [false; SCALE_DEGREES.len()];
    for &digit in digits {
        if let Ok(index) = usize::try_from(digit) {
            if let Some(slot) = seen.get_mut(index) {
                *slot = true;
            }
        }
    }

    let indices: Vec<usize> = seen
        .iter()
        .enumerate()
        .filter_map(|(index, &present)| present.then_some(index))
        .collect();

    if indices.is_empty() {
        return DerivedScale {
            notes: vec![SCALE_DEGREES[TONIC]],
            indices: vec![TONIC],
            fallback: true,
        };
    }

    DerivedScale {
        notes: indices.iter().map(|&i| SCALE_DEGREES[i]).collect(),
        indices,
        fallback: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_digits(indices: &[usize]) -> Vec<i32> {
        indices.iter().map(|&i| i as i32).collect()
    }

    #[test]
    fn test_empty_input_falls_back_to_tonic() {
        let scale = derive_scale(&[]);
        assert_eq!(scale.notes(), &["C"]);
        assert_eq!(scale.indices(), &[0]);
        assert!(scale.is_fallback());
    }

    #[test]
    fn test_duplicates_collapse() {
        let scale = derive_scale(&[0, 0, 0]);
        assert_eq!(scale.notes(), &["C"]);
        // An observed tonic is not the fallback
        assert!(!scale.is_fallback());
    }

    #[test]
    fn test_sorted_by_table_index() {
        let scale = derive_scale(&[2, 0, 4]);
        assert_eq!(scale.notes(), &["C", "D", "E"]);
        assert_eq!(scale.indices(), &[0, 2, 4]);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let scale = derive_scale(&[15, 20]);
        assert_eq!(scale.notes(), &["C"]);
        assert!(scale.is_fallback());

        let scale = derive_scale(&[-1, 3, 12, i32::MAX, i32::MIN]);
        assert_eq!(scale.notes(), &["Eb"]);
    }

    #[test]
    fn test_upper_degrees_reachable_from_raw_indices() {
        let scale = derive_scale(&[11, 10]);
        assert_eq!(scale.notes(), &["Bb", "B"]);
    }

    #[test]
    fn test_no_duplicates_and_ascending() {
        let input: Vec<i32> = (0..12).rev().chain(0..12).chain([5, 5, 7]).collect();
        let scale = derive_scale(&input);
        assert_eq!(scale.notes(), &SCALE_DEGREES);
        assert!(scale.indices().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rederive_is_idempotent() {
        for input in [
            vec![],
            vec![9, 1, 9, 2],
            vec![7, 7, 3, 0, 11],
            vec![42, -3],
            vec![1, 9, 2, 1, 6, 8, 0, 1],
        ] {
            let once = derive_scale(&input);
            let twice = derive_scale(&as_digits(once.indices()));
            assert_eq!(once.notes(), twice.notes(), "input: {:?}", input);
        }
    }

    #[test]
    fn test_contains_index() {
        let scale = derive_scale(&[4, 2]);
        assert!(scale.contains_index(2));
        assert!(scale.contains_index(4));
        assert!(!scale.contains_index(3));
    }

    #[test]
    fn test_display_joins_notes() {
        assert_eq!(derive_scale(&[7, 0, 4]).to_string(), "C E G");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(derive_scale(&[1])).unwrap();
        assert_eq!(json["notes"], serde_json::json!(["Db"]));
        assert_eq!(json["fallback"], serde_json::json!(false));
    }
}
