use std::time::Duration;

use colored::Colorize;
use comfy_table::{presets::ASCII_BORDERS_ONLY, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};

use crate::output::{CommandOutput, OutputHandler, RequestSummary};

const SPINNER_TICKS: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_TICK_MS: u64 = 80;

pub struct OperatorOutput {
    quiet: bool,
    no_color: bool,
    spinner: Option<ProgressBar>,
}

impl OperatorOutput {
    pub fn new(quiet: bool, no_color: bool) -> Self {
        Self {
            quiet,
            no_color,
            spinner: None,
        }
    }

    fn success_text(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.green().to_string()
        }
    }

    fn error_text(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.red().to_string()
        }
    }

    fn start_spinner(&mut self, operation: &str) {
        if self.quiet {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style.tick_strings(&SPINNER_TICKS));
        }
        spinner.set_message(format!("{operation}..."));
        spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    pub fn render_request_table(summary: &RequestSummary) -> String {
        let mut table = Table::new();
        table
            .load_preset(ASCII_BORDERS_ONLY)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Field", "Value"]);
        table.add_row(vec!["Kind", summary.kind.as_str()]);
        table.add_row(vec!["Chain", &summary.chain_id.to_string()]);
        table.add_row(vec!["Target", summary.target.as_str()]);
        table.add_row(vec!["Recipient", summary.recipient.as_str()]);
        table.add_row(vec!["Wei", summary.base_units.as_str()]);
        table.add_row(vec!["URI", summary.uri.as_str()]);
        table.to_string()
    }

    fn suggestion_for_error(error: &str) -> &'static str {
        let lowered = error.to_ascii_lowercase();
        if lowered.contains("'erc20'") || lowered.contains("'to'") {
            "Suggestion: use a 0x-prefixed, 40 hex digit address with a valid EIP-55 checksum."
        } else if lowered.contains("'amount'") {
            "Suggestion: give the amount in ether as a plain decimal, e.g. 0.25."
        } else if lowered.contains("'chainid'") {
            "Suggestion: pass a whole, non-negative chain id such as 1 or 11155111."
        } else {
            "Suggestion: review the request values and retry."
        }
    }

    pub fn format_error(error: &str) -> String {
        format!("{error}\n  {}", Self::suggestion_for_error(error))
    }
}

impl OutputHandler for OperatorOutput {
    fn start_operation(&mut self, operation: &str) {
        self.start_spinner(operation);
    }

    fn progress(&mut self, message: &str) {
        if self.quiet {
            return;
        }

        if let Some(spinner) = &self.spinner {
            spinner.set_message(message.to_string());
        } else {
            println!("{message}");
        }
    }

    fn display_request(&mut self, summary: &RequestSummary) {
        if self.quiet {
            return;
        }

        if let Some(spinner) = &self.spinner {
            spinner.suspend(|| println!("{}", Self::render_request_table(summary)));
        } else {
            println!("{}", Self::render_request_table(summary));
        }
    }

    fn complete(&mut self, output: &CommandOutput) {
        self.stop_spinner();

        if !output.ok {
            eprintln!("{}", self.error_text(&Self::format_error(&output.message)));
            return;
        }

        println!("{}", self.success_text(&output.message));
        if let Some(artifact) = output.artifact() {
            println!("{artifact}");
        }
    }
}
