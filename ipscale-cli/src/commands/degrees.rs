//! Degrees command - show the chromatic scale degree table
//!
//! Addresses only produce the digits 0-9, so the last two degrees (`Bb`, `B`)
//! never appear in a derived scale. The table marks them as unreachable.

use anyhow::Result;
use colored::Colorize;
use ipscale_core::{SCALE_DEGREES, TONIC};
use serde::Serialize;

use crate::output::{Alignment, Column, CsvOutput, Output, OutputConfig, Outputter, TableOutput};

/// Highest degree index a single decimal digit can select.
const MAX_DIGIT: usize = 9;

#[derive(Debug, Clone, Serialize)]
pub struct DegreeRow {
    pub index: usize,
    pub note: &'static str,
    pub tonic: bool,
    /// Whether address digits can select this degree
    pub reachable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DegreesReport {
    pub degrees: Vec<DegreeRow>,
}

impl DegreesReport {
    pub fn new() -> Self {
        let degrees = SCALE_DEGREES
            .iter()
            .enumerate()
            .map(|(index, &note)| DegreeRow {
                index,
                note,
                tonic: index == TONIC,
                reachable: index <= MAX_DIGIT,
            })
            .collect();
        Self { degrees }
    }

    fn unreachable_notes(&self) -> Vec<&'static str> {
        self.degrees
            .iter()
            .filter(|d| !d.reachable)
            .map(|d| d.note)
            .collect()
    }
}

impl Default for DegreesReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Outputter for DegreesReport {
    fn to_table(&self, config: &OutputConfig) -> String {
        let columns = vec![
            Column::new("Index", "index").with_alignment(Alignment::Right),
            Column::new("Note", "note"),
            Column::new("Tonic", "tonic"),
            Column::new("Reachable", "reachable"),
        ];
        let mut output = TableOutput::format_with_columns(&self.degrees, &columns, config);

        let unreachable = self.unreachable_notes();
        if !unreachable.is_empty() {
            output.push_str(&format!(
                "\n{}",
                format!(
                    "{} cannot be produced by decimal address digits.",
                    unreachable.join(" and ")
                )
                .dimmed()
            ));
        }
        output
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let columns = vec![
            Column::new("index", "index"),
            Column::new("note", "note"),
            Column::new("tonic", "tonic"),
            Column::new("reachable", "reachable"),
        ];
        CsvOutput::format_with_columns(&self.degrees, &columns)
    }
}

/// Run the degrees command.
pub fn run(output: &OutputConfig) -> Result<()> {
    Output::new(DegreesReport::new(), output).render()
}
