//! Lookup command - print the public IP address

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use super::{fetch_public_ip, LookupSettings};
use crate::output::{Column, CsvOutput, Output, OutputConfig, Outputter};

/// Public IP as reported by the lookup endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LookupReport {
    pub ip: String,
    pub endpoint: String,
}

impl Outputter for LookupReport {
    fn to_table(&self, _config: &OutputConfig) -> String {
        format!(
            "{} {}\n{}",
            "Public IP:".cyan().bold(),
            self.ip,
            format!("(via {})", self.endpoint).dimmed()
        )
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let columns = vec![Column::new("ip", "ip"), Column::new("endpoint", "endpoint")];
        CsvOutput::format_with_columns(std::slice::from_ref(self), &columns)
    }
}

/// Run the lookup command.
pub async fn run(lookup: &LookupSettings, output: &OutputConfig) -> Result<()> {
    let ip = fetch_public_ip(lookup).await?;
    let report = LookupReport {
        ip,
        endpoint: lookup.endpoint.clone(),
    };
    Output::new(report, output).render()
}
