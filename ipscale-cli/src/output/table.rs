//! Table output formatting using the `tabled` crate

use super::{Alignment, Column, OutputConfig};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment as TabledAlignment, Modify, Width},
    Table,
};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Format rows as a table with the given columns
    ///
    /// Each row is serialized and cells are read by `Column::key`.
    pub fn format_with_columns<T: Serialize>(
        data: &[T],
        columns: &[Column],
        config: &OutputConfig,
    ) -> String {
        if data.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(columns.iter().map(|c| c.name.as_str()));

        for item in data {
            let json = serde_json::to_value(item).unwrap_or_default();
            let row: Vec<String> = columns
                .iter()
                .map(|col| {
                    json.get(&col.key)
                        .map(Self::value_to_string)
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            builder.push_record(row);
        }

        let mut table = builder.build();
        for (i, col) in columns.iter().enumerate() {
            let alignment = match col.align {
                Alignment::Left => TabledAlignment::left(),
                Alignment::Right => TabledAlignment::right(),
            };
            table.with(Modify::new(Columns::single(i)).with(alignment));
        }

        Self::finish(table, config)
    }

    /// Format a simple key-value table
    pub fn format_key_value(pairs: &[(&str, String)], config: &OutputConfig) -> String {
        let mut builder = Builder::default();
        for (key, value) in pairs {
            builder.push_record([*key, value.as_str()]);
        }

        let mut table = builder.build();
        table.with(Modify::new(Columns::first()).with(TabledAlignment::right()));

        Self::finish(table, config)
    }

    fn finish(mut table: Table, config: &OutputConfig) -> String {
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }

        if config.should_truncate() {
            table.with(Width::wrap(config.effective_width()));
        }

        table.to_string()
    }

    /// Convert a JSON value to a display string
    fn value_to_string(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::Null => "-".to_string(),
            serde_json::Value::Bool(true) => "yes".to_string(),
            serde_json::Value::Bool(false) => "no".to_string(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Array(arr) => arr
                .iter()
                .map(Self::value_to_string)
                .collect::<Vec<_>>()
                .join(" "),
            serde_json::Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::OutputFormat;
    use super::*;

    #[derive(Serialize)]
    struct Row {
        note: String,
        midi: u16,
        reachable: bool,
    }

    fn config() -> OutputConfig {
        OutputConfig::new(OutputFormat::Table).without_truncation()
    }

    #[test]
    fn test_format_with_columns() {
        let data = vec![
            Row {
                note: "Db".to_string(),
                midi: 61,
                reachable: true,
            },
            Row {
                note: "B".to_string(),
                midi: 71,
                reachable: false,
            },
        ];
        let columns = vec![
            Column::new("Note", "note"),
            Column::new("MIDI", "midi").with_alignment(Alignment::Right),
            Column::new("Reachable", "reachable"),
            Column::new("Missing", "missing"),
        ];

        let output = TableOutput::format_with_columns(&data, &columns, &config());

        assert!(output.contains("Note"));
        assert!(output.contains("Db"));
        assert!(output.contains("71"));
        assert!(output.contains("yes"));
        assert!(output.contains("no"));
        assert!(output.contains('-'));
    }

    #[test]
    fn test_empty_data() {
        let data: Vec<Row> = vec![];
        let columns = vec![Column::new("Note", "note")];
        let output = TableOutput::format_with_columns(&data, &columns, &config());
        assert_eq!(output, "(no results)");
    }

    #[test]
    fn test_key_value_table() {
        let pairs = vec![
            ("Address", "192.168.0.1".to_string()),
            ("Scale", "C Db D".to_string()),
        ];
        let output = TableOutput::format_key_value(&pairs, &config());

        assert!(output.contains("Address"));
        assert!(output.contains("192.168.0.1"));
        assert!(output.contains("C Db D"));
    }

    #[test]
    fn test_array_cells_are_space_joined() {
        let value = serde_json::json!(["C", "E", "G"]);
        assert_eq!(TableOutput::value_to_string(&value), "C E G");
    }
}
