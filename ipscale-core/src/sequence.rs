//! Randomized note sequences drawn from a derived scale.
//!
//! A sequence is a list of [`Tone`]s: a note picked from the scale (with
//! replacement) paired with a random octave. Tones render as `<name><octave>`
//! tokens (`Eb5`), which is all a downstream player needs.

use rand::Rng;
use serde::Serialize;
use std::fmt;

use crate::address::scale_for_address;
use crate::error::{Result, SequenceError};
use crate::scale::{DerivedScale, SCALE_DEGREES};

/// Highest octave whose every degree still fits in a MIDI note number.
pub const MAX_OCTAVE: u8 = 8;

/// Default lowest octave.
pub const DEFAULT_BASE_OCTAVE: u8 = 4;

/// Default number of octaves to pick from.
pub const DEFAULT_OCTAVE_SPAN: u8 = 3;

/// A note name at a specific octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tone {
    note: &'static str,
    index: usize,
    octave: u8,
}

impl Tone {
    /// Build a tone from a degree index, or `None` if the index is outside the table.
    pub fn new(index: usize, octave: u8) -> Option<Self> {
        SCALE_DEGREES.get(index).map(|&note| Self {
            note,
            index,
            octave,
        })
    }

    pub fn note(&self) -> &'static str {
        self.note
    }

    /// Degree index in [`SCALE_DEGREES`].
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn octave(&self) -> u8 {
        self.octave
    }

    /// MIDI note number, with C4 = 60.
    pub fn midi_note(&self) -> u16 {
        (u16::from(self.octave) + 1) * 12 + self.index as u16
    }

    /// Equal-tempered frequency in Hz, with A4 = 440 Hz.
    pub fn frequency(&self) -> f32 {
        440.0 * 2.0_f32.powf((f32::from(self.midi_note()) - 69.0) / 12.0)
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.note, self.octave)
    }
}

/// Options controlling sequence length and octave range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceOptions {
    /// Number of steps; `None` uses one step per scale note.
    pub length: Option<usize>,
    /// Lowest octave.
    pub base_octave: u8,
    /// Number of consecutive octaves to pick from. Zero is treated as one.
    pub octave_span: u8,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            length: None,
            base_octave: DEFAULT_BASE_OCTAVE,
            octave_span: DEFAULT_OCTAVE_SPAN,
        }
    }
}

impl SequenceOptions {
    /// Builder: set an explicit length
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    /// Builder: set the octave range
    pub fn with_octaves(mut self, base_octave: u8, octave_span: u8) -> Self {
        self.base_octave = base_octave;
        self.octave_span = octave_span;
        self
    }

    /// Highest octave these options can produce.
    pub fn highest_octave(&self) -> u16 {
        u16::from(self.base_octave) + u16::from(self.octave_span.max(1)) - 1
    }

    pub fn validate(&self) -> std::result::Result<(), SequenceError> {
        if self.length == Some(0) {
            return Err(SequenceError::EmptySequence);
        }
        let highest = self.highest_octave();
        if highest > u16::from(MAX_OCTAVE) {
            return Err(SequenceError::OctaveOutOfRange {
                octave: highest,
                max: MAX_OCTAVE,
            });
        }
        Ok(())
    }
}

/// An ordered list of tones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Sequence {
    tones: Vec<Tone>,
}

impl Sequence {
    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    /// Rendered `<name><octave>` tokens.
    pub fn tokens(&self) -> Vec<String> {
        self.tones.iter().map(Tone::to_string).collect()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens().join(" "))
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Tone;
    type IntoIter = std::slice::Iter<'a, Tone>;

    fn into_iter(self) -> Self::IntoIter {
        self.tones.iter()
    }
}

/// Generate a random sequence from `scale`.
///
/// Every step draws a note uniformly from the scale and an octave uniformly
/// from `base_octave..base_octave + octave_span`. Pass a seeded generator for
/// reproducible output.
pub fn generate_sequence<R: Rng + ?Sized>(
    scale: &DerivedScale,
    options: &SequenceOptions,
    rng: &mut R,
) -> std::result::Result<Sequence, SequenceError> {
    options.validate()?;

    let length = options.length.unwrap_or(scale.len());
    let span = options.octave_span.max(1);
    let indices = scale.indices();

    let tones = (0..length)
        .filter_map(|_| {
            let index = indices[rng.gen_range(0..indices.len())];
            let octave = options.base_octave + rng.gen_range(0..span);
            Tone::new(index, octave)
        })
        .collect();

    Ok(Sequence { tones })
}

/// Derive the scale for `address` and generate a sequence from it.
///
/// Options are validated before the address is parsed.
pub fn sequence_for_address<R: Rng + ?Sized>(
    address: &str,
    options: &SequenceOptions,
    rng: &mut R,
) -> Result<(DerivedScale, Sequence)> {
    options.validate()?;
    let scale = scale_for_address(address)?;
    let sequence = generate_sequence(&scale, options, rng)?;
    Ok((scale, sequence))
}
