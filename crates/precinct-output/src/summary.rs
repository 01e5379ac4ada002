//! Text summaries of aggregates and of the fitted model.

use precinct_analysis::AggregateReport;
use precinct_model::{Coefficient, FittedModel};
use serde::{Deserialize, Serialize};
use std::fmt;

fn fmt_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "n/a".to_string(), |r| format!("{:.2}%", r * 100.0))
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.precision$}"))
}

/// Coefficient table and fit statistics of a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Coefficients in design order.
    pub coefficients: Vec<Coefficient>,
    /// Coefficient of determination.
    pub r_squared: Option<f64>,
    /// Adjusted R².
    pub adj_r_squared: Option<f64>,
    /// Residual standard error.
    pub residual_std_error: f64,
    /// Observations used.
    pub n_observations: usize,
    /// Residual degrees of freedom.
    pub df_residual: usize,
}

impl From<&FittedModel> for ModelSummary {
    fn from(model: &FittedModel) -> Self {
        Self {
            coefficients: model.coefficients().to_vec(),
            r_squared: model.r_squared(),
            adj_r_squared: model.adj_r_squared(),
            residual_std_error: model.residual_std_error(),
            n_observations: model.n_observations(),
            df_residual: model.df_residual(),
        }
    }
}

impl ModelSummary {
    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str("\nModel: count ~ year + month + borough indicators (OLS)\n");
        output.push_str(&"=".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<14} {:>14} {:>14} {:>14}\n",
            "Predictor", "Estimate", "Std. Error", "t value"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        for c in &self.coefficients {
            output.push_str(&format!(
                "{:<14} {:>14.4} {:>14.4} {:>14}\n",
                c.predictor.name(),
                c.estimate,
                c.std_error,
                fmt_opt(c.t_statistic, 3)
            ));
        }

        output.push_str(&"-".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "  Residual std. error:  {:.4} on {} degrees of freedom\n",
            self.residual_std_error, self.df_residual
        ));
        output.push_str(&format!(
            "  R-squared:            {}\n",
            fmt_opt(self.r_squared, 4)
        ));
        output.push_str(&format!(
            "  Adjusted R-squared:   {}\n",
            fmt_opt(self.adj_r_squared, 4)
        ));
        output.push_str(&format!("  Observations:         {}\n", self.n_observations));
        output.push_str(&"=".repeat(64));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str("# Model Summary\n\n");
        output.push_str("| Predictor | Estimate | Std. Error | t value |\n");
        output.push_str("|-----------|----------|------------|---------|\n");
        for c in &self.coefficients {
            output.push_str(&format!(
                "| {} | {:.4} | {:.4} | {} |\n",
                c.predictor.name(),
                c.estimate,
                c.std_error,
                fmt_opt(c.t_statistic, 3)
            ));
        }
        output.push('\n');
        output.push_str(&format!(
            "- **Residual std. error:** {:.4} ({} df)\n",
            self.residual_std_error, self.df_residual
        ));
        output.push_str(&format!("- **R²:** {}\n", fmt_opt(self.r_squared, 4)));
        output.push_str(&format!(
            "- **Adjusted R²:** {}\n",
            fmt_opt(self.adj_r_squared, 4)
        ));
        output.push_str(&format!("- **Observations:** {}\n", self.n_observations));

        output
    }
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "OLS fit on {} observations", self.n_observations)?;
        for c in &self.coefficients {
            writeln!(f, "  {}: {:.4} (se {:.4})", c.predictor, c.estimate, c.std_error)?;
        }
        write!(f, "  R²: {}", fmt_opt(self.r_squared, 4))
    }
}

/// Plain-text rendering of the four aggregate tables.
#[derive(Debug, Clone, Copy)]
pub struct AggregateSummary<'a> {
    report: &'a AggregateReport,
}

impl<'a> AggregateSummary<'a> {
    /// Wrap a report for rendering.
    pub const fn new(report: &'a AggregateReport) -> Self {
        Self { report }
    }

    /// Format as ASCII tables for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();
        let rule = "-".repeat(48);

        output.push_str("\nShootings per borough and year:\n");
        output.push_str(&format!("{:<16} {:>8} {:>10}\n", "Borough", "Year", "Incidents"));
        output.push_str(&rule);
        output.push('\n');
        for row in &self.report.yearly {
            output.push_str(&format!("{:<16} {:>8} {:>10}\n", row.borough, row.year, row.count));
        }

        output.push_str("\nFatality rate per borough:\n");
        output.push_str(&format!(
            "{:<16} {:>8} {:>10} {:>10}\n",
            "Borough", "Deaths", "Shootings", "Rate"
        ));
        output.push_str(&rule);
        output.push('\n');
        for row in &self.report.death_rates {
            output.push_str(&format!(
                "{:<16} {:>8} {:>10} {:>10}\n",
                row.borough,
                row.deaths,
                row.shootings,
                fmt_rate(row.rate)
            ));
        }

        output.push_str("\nShootings per hour of day:\n");
        output.push_str(&format!("{:<16} {:>10}\n", "Hour", "Incidents"));
        output.push_str(&rule);
        output.push('\n');
        for row in &self.report.hourly {
            output.push_str(&format!("{:<16} {:>10}\n", format!("{:02}:00", row.hour), row.count));
        }

        output.push_str("\nShootings per season:\n");
        output.push_str(&format!(
            "{:<16} {:>8} {:>10} {:>10}\n",
            "Season", "Total", "Fatal", "Rate"
        ));
        output.push_str(&rule);
        output.push('\n');
        for row in &self.report.seasonal {
            output.push_str(&format!(
                "{:<16} {:>8} {:>10} {:>10}\n",
                row.season.name(),
                row.total,
                row.fatal,
                fmt_rate(row.rate)
            ));
        }

        output
    }
}

impl fmt::Display for AggregateSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ascii_table())
    }
}
