//! Scale command - derive a musical scale from an IP address
//!
//! Flattens the address into its decimal digits and maps each digit to a
//! chromatic scale degree. Without an address argument the public IP is
//! looked up first.

use anyhow::{Context, Result};
use colored::Colorize;
use ipscale_core::{address_digits, derive_scale, DerivedScale};
use serde::Serialize;

use super::{resolve_address, AddressSource, LookupSettings};
use crate::output::{Column, CsvOutput, Output, OutputConfig, Outputter, TableOutput};

/// Result of deriving a scale for one address.
#[derive(Debug, Clone, Serialize)]
pub struct ScaleReport {
    pub address: String,
    pub source: AddressSource,
    pub digits: Vec<i32>,
    pub notes: Vec<&'static str>,
    pub indices: Vec<usize>,
    /// True when no digit mapped to a degree and the tonic was used.
    /// Address digits always map, so this only reports the core's flag.
    pub fallback: bool,
}

#[derive(Serialize)]
struct NoteRow {
    index: usize,
    note: &'static str,
}

/// Flatten `address` into digits and derive its scale.
fn derive_for_address(address: &str) -> Result<(Vec<i32>, DerivedScale)> {
    let digits = address_digits(address)
        .with_context(|| format!("Cannot derive a scale from '{}'", address))?;
    let scale = derive_scale(&digits);
    tracing::debug!(?digits, scale = %scale, "Derived scale");
    Ok((digits, scale))
}

impl ScaleReport {
    pub fn build(address: String, source: AddressSource) -> Result<Self> {
        let (digits, scale) = derive_for_address(&address)?;
        Ok(Self {
            address,
            source,
            digits,
            notes: scale.notes().to_vec(),
            indices: scale.indices().to_vec(),
            fallback: scale.is_fallback(),
        })
    }

    fn digit_string(&self) -> String {
        self.digits
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Outputter for ScaleReport {
    fn to_table(&self, config: &OutputConfig) -> String {
        let pairs = vec![
            ("Address", self.address.clone()),
            ("Source", self.source.to_string()),
            ("Digits", self.digit_string()),
            ("Scale", self.notes.join(" ")),
            ("Notes", self.notes.len().to_string()),
        ];

        let mut output = format!(
            "{} {}\n",
            "Scale for".cyan().bold(),
            self.address.yellow()
        );
        output.push_str(&TableOutput::format_key_value(&pairs, config));
        output
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let rows: Vec<NoteRow> = self
            .indices
            .iter()
            .zip(&self.notes)
            .map(|(&index, &note)| NoteRow { index, note })
            .collect();
        let columns = vec![Column::new("index", "index"), Column::new("note", "note")];
        CsvOutput::format_with_columns(&rows, &columns)
    }
}

/// Run the scale command.
pub async fn run(
    address: Option<String>,
    lookup: &LookupSettings,
    output: &OutputConfig,
) -> Result<()> {
    let (address, source) = resolve_address(address, lookup).await?;
    let report = ScaleReport::build(address, source)?;
    Output::new(report, output).render()
}
