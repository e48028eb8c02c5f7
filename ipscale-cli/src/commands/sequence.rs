//! Sequence command - random note sequence from an address-derived scale
//!
//! Produces `<note><octave>` tokens for an external player. Nothing is
//! scheduled or synthesized here.

use anyhow::{Context, Result};
use colored::Colorize;
use ipscale_core::{sequence_for_address, SequenceOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use super::{resolve_address, AddressSource, LookupSettings};
use crate::output::{Alignment, Column, CsvOutput, Output, OutputConfig, Outputter, TableOutput};

/// Command-line overrides for sequence generation.
#[derive(Debug, Clone, Default)]
pub struct SequenceArgs {
    pub address: Option<String>,
    pub length: Option<usize>,
    pub seed: Option<u64>,
    pub base_octave: Option<u8>,
    pub octave_span: Option<u8>,
}

impl SequenceArgs {
    /// Apply command-line overrides on top of configured options.
    pub fn options(&self, configured: SequenceOptions) -> SequenceOptions {
        SequenceOptions {
            length: self.length.or(configured.length),
            base_octave: self.base_octave.unwrap_or(configured.base_octave),
            octave_span: self.octave_span.unwrap_or(configured.octave_span),
        }
    }
}

/// One step of a generated sequence.
#[derive(Debug, Clone, Serialize)]
pub struct StepRow {
    /// 1-based position
    pub step: usize,
    pub token: String,
    pub note: &'static str,
    pub octave: u8,
    pub midi: u16,
    pub frequency_hz: f64,
}

/// Result of generating a sequence for one address.
#[derive(Debug, Clone, Serialize)]
pub struct SequenceReport {
    pub address: String,
    pub source: AddressSource,
    pub scale: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub steps: Vec<StepRow>,
}

impl SequenceReport {
    /// Generate a sequence for `address`, seeded when `seed` is given.
    pub fn generate(
        address: String,
        source: AddressSource,
        options: &SequenceOptions,
        seed: Option<u64>,
    ) -> Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (scale, sequence) = sequence_for_address(&address, options, &mut rng)
            .with_context(|| format!("Cannot generate a sequence for '{}'", address))?;
        tracing::debug!(scale = %scale, %sequence, "Generated sequence");

        let steps = sequence
            .tones()
            .iter()
            .enumerate()
            .map(|(i, tone)| StepRow {
                step: i + 1,
                token: tone.to_string(),
                note: tone.note(),
                octave: tone.octave(),
                midi: tone.midi_note(),
                frequency_hz: (f64::from(tone.frequency()) * 100.0).round() / 100.0,
            })
            .collect();

        Ok(Self {
            address,
            source,
            scale: scale.notes().to_vec(),
            seed,
            steps,
        })
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Step", "step").with_alignment(Alignment::Right),
            Column::new("Token", "token"),
            Column::new("MIDI", "midi").with_alignment(Alignment::Right),
            Column::new("Hz", "frequency_hz").with_alignment(Alignment::Right),
        ]
    }
}

impl Outputter for SequenceReport {
    fn to_table(&self, config: &OutputConfig) -> String {
        let tokens: Vec<&str> = self.steps.iter().map(|s| s.token.as_str()).collect();

        let mut pairs = vec![
            ("Address", self.address.clone()),
            ("Scale", self.scale.join(" ")),
            ("Sequence", tokens.join(" ")),
        ];
        if let Some(seed) = self.seed {
            pairs.push(("Seed", seed.to_string()));
        }

        let mut output = format!(
            "{} {}\n",
            "Sequence for".cyan().bold(),
            self.address.yellow()
        );
        output.push_str(&TableOutput::format_key_value(&pairs, config));
        output.push('\n');
        output.push_str(&TableOutput::format_with_columns(
            &self.steps,
            &Self::columns(),
            config,
        ));
        output
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let columns = vec![
            Column::new("step", "step"),
            Column::new("token", "token"),
            Column::new("note", "note"),
            Column::new("octave", "octave"),
            Column::new("midi", "midi"),
            Column::new("frequency_hz", "frequency_hz"),
        ];
        CsvOutput::format_with_columns(&self.steps, &columns)
    }
}

/// Run the sequence command.
pub async fn run(
    args: SequenceArgs,
    configured: SequenceOptions,
    lookup: &LookupSettings,
    output: &OutputConfig,
) -> Result<()> {
    let options = args.options(configured);
    // Fail on bad options before spending a network round trip
    options.validate()?;

    let (address, source) = resolve_address(args.address, lookup).await?;
    let report = SequenceReport::generate(address, source, &options, args.seed)?;
    Output::new(report, output).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn report(seed: u64, length: usize) -> SequenceReport {
        let options = SequenceOptions::default().with_length(length);
        SequenceReport::generate(
            "192.168.0.1".to_string(),
            AddressSource::Argument,
            &options,
            Some(seed),
        )
        .unwrap()
    }

    #[test]
    fn test_args_override_config() {
        let configured = SequenceOptions {
            length: Some(8),
            base_octave: 2,
            octave_span: 2,
        };
        let args = SequenceArgs {
            length: Some(3),
            base_octave: Some(5),
            ..Default::default()
        };
        assert_eq!(
            args.options(configured),
            SequenceOptions {
                length: Some(3),
                base_octave: 5,
                octave_span: 2,
            }
        );
    }

    #[test]
    fn test_seeded_reports_match() {
        let a = report(99, 12);
        let b = report(99, 12);
        let tokens = |r: &SequenceReport| r.steps.iter().map(|s| s.token.clone()).collect::<Vec<_>>();
        assert_eq!(tokens(&a), tokens(&b));
        assert_eq!(a.steps.len(), 12);
    }

    #[test]
    fn test_steps_are_numbered_and_in_scale() {
        let report = report(3, 20);
        for (i, step) in report.steps.iter().enumerate() {
            assert_eq!(step.step, i + 1);
            assert!(report.scale.contains(&step.note));
            assert_eq!(step.token, format!("{}{}", step.note, step.octave));
            assert!(step.frequency_hz > 0.0);
        }
    }

    #[test]
    fn test_csv_output() {
        let config = OutputConfig::new(OutputFormat::Csv);
        let csv = report(5, 4).render(&config);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "step,token,note,octave,midi,frequency_hz");
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("1,"));
    }

    #[test]
    fn test_json_includes_seed() {
        let config = OutputConfig::new(OutputFormat::Json);
        let json: serde_json::Value = serde_json::from_str(&report(11, 2).render(&config)).unwrap();
        assert_eq!(json["seed"], 11);
        assert_eq!(json["steps"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = SequenceOptions::default().with_octaves(8, 4);
        let result = SequenceReport::generate(
            "1.1.1.1".to_string(),
            AddressSource::Argument,
            &options,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_address_names_input() {
        let err = SequenceReport::generate(
            "10.0.zero.1".to_string(),
            AddressSource::Argument,
            &SequenceOptions::default(),
            Some(1),
        )
        .unwrap_err();
        assert!(err.to_string().contains("10.0.zero.1"));
    }
}
