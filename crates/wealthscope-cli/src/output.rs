//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use wealthscope_dataset::LoadedDataset;
use wealthscope_domain::{Bracket, Breakdown, DisplayMode, Remainder, ThresholdSet, UpperBound};

const OVERCOUNT_WARNING: &str = "Several brackets start inside the open-ended top bin and each received all of it, \
so covered mass exceeds the totals. Use --policy lowest-bracket-only to credit it once.";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a breakdown.
    pub fn format_breakdown(&self, breakdown: &Breakdown, mode: DisplayMode) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_breakdown_json(breakdown, mode),
            OutputFormat::Table => Ok(self.format_breakdown_table(breakdown, mode)),
        }
    }

    /// Format a breakdown as JSON.
    fn format_breakdown_json(&self, breakdown: &Breakdown, mode: DisplayMode) -> Result<String> {
        let brackets: Vec<serde_json::Value> = breakdown
            .brackets
            .iter()
            .map(|b| {
                json!({
                    "min_wealth": b.min_wealth,
                    "max_wealth": b.max_wealth.as_option(),
                    "population_count": b.population_count,
                    "population_share": b.population_share,
                    "wealth_total": b.wealth_total,
                    "wealth_share": b.wealth_share,
                    "average_wealth": b.average_wealth(),
                })
            })
            .collect();

        let r = &breakdown.remainder;
        let value = json!({
            "mode": mode.as_str(),
            "double_counted": r.is_overcounted(),
            "brackets": brackets,
            "remainder": {
                "covered_population": r.covered_population,
                "covered_population_share": r.covered_population_share,
                "not_covered_population": r.not_covered_population,
                "not_covered_population_share": r.not_covered_population_share,
                "covered_wealth": r.covered_wealth,
                "covered_wealth_share": r.covered_wealth_share,
                "not_covered_wealth": r.not_covered_wealth,
                "not_covered_wealth_share": r.not_covered_wealth_share,
            }
        });

        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Format a breakdown as a table.
    fn format_breakdown_table(&self, breakdown: &Breakdown, mode: DisplayMode) -> String {
        let mut lines = Vec::new();
        if breakdown.is_empty() {
            lines.push(self.colorize("No brackets defined.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Bracket", "Population", "Wealth", "Avg wealth"]);
            for bracket in &breakdown.brackets {
                builder.push_record(bracket_row(bracket, mode));
            }
            lines.push(styled(builder));
        }

        lines.push(self.format_remainder_table(&breakdown.remainder, mode));
        if breakdown.remainder.is_overcounted() {
            lines.push(self.warning(OVERCOUNT_WARNING));
        }
        lines.join("\n")
    }

    /// Format the remainder as a table.
    fn format_remainder_table(&self, remainder: &Remainder, mode: DisplayMode) -> String {
        let mut builder = Builder::default();
        builder.push_record(["", "Population", "Wealth"]);
        builder.push_record([
            "Covered".to_string(),
            format_figure(mode, remainder.covered_population, remainder.covered_population_share, false),
            format_figure(mode, remainder.covered_wealth, remainder.covered_wealth_share, true),
        ]);
        builder.push_record([
            "Not covered".to_string(),
            format_figure(mode, remainder.not_covered_population, remainder.not_covered_population_share, false),
            format_figure(mode, remainder.not_covered_wealth, remainder.not_covered_wealth_share, true),
        ]);
        styled(builder)
    }

    /// Format the dataset summary.
    pub fn format_dataset(&self, loaded: &LoadedDataset) -> Result<String> {
        let dataset = &loaded.dataset;
        let metadata = &loaded.metadata;
        let reconciliation = dataset.reconciliation();

        match self.format {
            OutputFormat::Json => {
                let value = json!({
                    "source": metadata.source,
                    "data_year": metadata.data_year,
                    "report_year": metadata.report_year,
                    "bins": dataset.bins().len(),
                    "min_wealth": dataset.min_wealth(),
                    "max_wealth": dataset.max_wealth().as_option(),
                    "total_population": dataset.totals().total_population,
                    "total_wealth": dataset.totals().total_wealth,
                    "population_drift": reconciliation.population_drift,
                    "wealth_drift": reconciliation.wealth_drift,
                    "known_thresholds": metadata.known_thresholds,
                    "notes": metadata.notes,
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Source".to_string(), metadata.source.clone().unwrap_or_else(|| "-".to_string())]);
                if let Some(year) = metadata.data_year {
                    builder.push_record(["Data year".to_string(), year.to_string()]);
                }
                builder.push_record(["Bins".to_string(), dataset.bins().len().to_string()]);
                builder.push_record([
                    "Range".to_string(),
                    format_range(dataset.min_wealth(), dataset.max_wealth()),
                ]);
                builder.push_record([
                    "Total population".to_string(),
                    format_amount(dataset.totals().total_population),
                ]);
                builder.push_record([
                    "Total wealth".to_string(),
                    format!("${}", format_amount(dataset.totals().total_wealth)),
                ]);
                builder.push_record([
                    "Reconciliation drift".to_string(),
                    format!("{:.3e}", reconciliation.max_drift()),
                ]);
                for (name, value) in &metadata.known_thresholds {
                    builder.push_record([format!("Threshold {}", name), format!("${}", format_amount(*value))]);
                }

                let mut output = styled(builder);
                for note in &metadata.notes {
                    output.push('\n');
                    output.push_str(&self.info(note));
                }
                Ok(output)
            }
        }
    }

    /// Format the current threshold set.
    pub fn format_thresholds(&self, thresholds: &ThresholdSet) -> String {
        if thresholds.is_empty() {
            return self.colorize("Thresholds: (none)", "yellow");
        }
        let values: Vec<String> = thresholds
            .values()
            .iter()
            .map(|&v| format!("${}", format_amount(v)))
            .collect();
        format!("Thresholds: {}", values.join(", "))
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn bracket_row(bracket: &Bracket, mode: DisplayMode) -> [String; 4] {
    [
        format_range(bracket.min_wealth, bracket.max_wealth),
        format_figure(mode, bracket.population_count, bracket.population_share, false),
        format_figure(mode, bracket.wealth_total, bracket.wealth_share, true),
        format!("${}", format_amount(bracket.average_wealth())),
    ]
}

/// Render either the share or the absolute figure, per display mode.
fn format_figure(mode: DisplayMode, absolute: f64, share: f64, currency: bool) -> String {
    let value = mode.pick(absolute, share);
    match mode {
        DisplayMode::Percentage if value.is_finite() => format!("{:.2}%", value),
        DisplayMode::Percentage => "n/a".to_string(),
        DisplayMode::Absolute if currency => format!("${}", format_amount(value)),
        DisplayMode::Absolute => format_amount(value),
    }
}

/// Render a wealth interval, e.g. `$10,000 - $100,000` or `$1,000,000+`.
pub fn format_range(min: f64, max: UpperBound) -> String {
    match max {
        UpperBound::Bounded(max) => format!("${} - ${}", format_amount(min), format_amount(max)),
        UpperBound::Unbounded => format!("${}+", format_amount(min)),
    }
}

/// Round to a whole number and group digits in thousands.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
