//! Shell completions command - Generate shell completion scripts
//!
//! Generates completion scripts for bash, zsh, fish, powershell and elvish.

use std::io;

use clap::Command;
use clap_complete::{generate, shells};
use colored::Colorize;
use serde::Serialize;

use crate::output::{Column, CsvOutput, Output, OutputConfig, Outputter};

const BIN_NAME: &str = "ipscale";

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shell::Bash => write!(f, "bash"),
            Shell::Zsh => write!(f, "zsh"),
            Shell::Fish => write!(f, "fish"),
            Shell::PowerShell => write!(f, "powershell"),
            Shell::Elvish => write!(f, "elvish"),
        }
    }
}

/// Instructions for installing completions
#[derive(Debug, Serialize)]
pub struct CompletionInstructions {
    pub shell: String,
    pub instructions: Vec<String>,
}

#[derive(Serialize)]
struct InstructionRow<'a> {
    shell: &'a str,
    line: &'a str,
}

impl Outputter for CompletionInstructions {
    fn to_table(&self, _config: &OutputConfig) -> String {
        let mut output = format!(
            "{} completions for {}\n\n{}\n",
            BIN_NAME.cyan().bold(),
            self.shell.yellow(),
            "Installation:".cyan().bold()
        );
        for instruction in &self.instructions {
            output.push_str(&format!("  {}\n", instruction));
        }
        output
    }

    fn to_csv(&self, _config: &OutputConfig) -> String {
        let rows: Vec<InstructionRow> = self
            .instructions
            .iter()
            .filter(|line| !line.is_empty())
            .map(|line| InstructionRow {
                shell: self.shell.as_str(),
                line: line.as_str(),
            })
            .collect();
        let columns = vec![Column::new("shell", "shell"), Column::new("line", "line")];
        CsvOutput::format_with_columns(&rows, &columns)
    }
}

/// Get installation instructions for a shell
fn get_instructions(shell: Shell) -> Vec<String> {
    match shell {
        Shell::Bash => vec![
            "# Add to ~/.bashrc:".to_string(),
            format!("eval \"$({} completions bash)\"", BIN_NAME),
            "".to_string(),
            "# Or save to a file:".to_string(),
            format!(
                "{0} completions bash > ~/.local/share/bash-completion/completions/{0}",
                BIN_NAME
            ),
        ],
        Shell::Zsh => vec![
            "# Add to ~/.zshrc:".to_string(),
            format!("eval \"$({} completions zsh)\"", BIN_NAME),
            "".to_string(),
            "# Or save to a file in fpath:".to_string(),
            format!("{0} completions zsh > ~/.zfunc/_{0}", BIN_NAME),
            "# Then add to ~/.zshrc before compinit:".to_string(),
            "fpath=(~/.zfunc $fpath)".to_string(),
        ],
        Shell::Fish => vec![
            "# Save to fish completions directory:".to_string(),
            format!(
                "{0} completions fish > ~/.config/fish/completions/{0}.fish",
                BIN_NAME
            ),
        ],
        Shell::PowerShell => vec![
            "# Add to $PROFILE:".to_string(),
            format!(
                "Invoke-Expression (& {} completions powershell | Out-String)",
                BIN_NAME
            ),
        ],
        Shell::Elvish => vec![
            "# Add to ~/.elvish/rc.elv:".to_string(),
            format!("eval ({} completions elvish | slurp)", BIN_NAME),
        ],
    }
}

/// Generate completions for `cmd` and write them to stdout
pub fn generate_completions(shell: Shell, cmd: &mut Command) {
    match shell {
        Shell::Bash => generate(shells::Bash, cmd, BIN_NAME, &mut io::stdout()),
        Shell::Zsh => generate(shells::Zsh, cmd, BIN_NAME, &mut io::stdout()),
        Shell::Fish => generate(shells::Fish, cmd, BIN_NAME, &mut io::stdout()),
        Shell::PowerShell => generate(shells::PowerShell, cmd, BIN_NAME, &mut io::stdout()),
        Shell::Elvish => generate(shells::Elvish, cmd, BIN_NAME, &mut io::stdout()),
    }
}

/// Print installation instructions for `shell`
pub fn run_instructions(shell: Shell, output: &OutputConfig) -> anyhow::Result<()> {
    let instructions = CompletionInstructions {
        shell: shell.to_string(),
        instructions: get_instructions(shell),
    };
    Output::new(instructions, output).render()
}
