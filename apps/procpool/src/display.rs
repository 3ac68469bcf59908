//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use console::{Style, Term};
use procpool_types::{ColorChoice, ExitRecord, OutputFormat, PoolReport};
use std::io;

/// Output renderer for the final pool report
#[derive(Clone)]
pub struct OutputRenderer {
    format: OutputFormat,
    color_choice: ColorChoice,
    term: Term,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat, color_choice: ColorChoice) -> Self {
        Self {
            format,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render the report in the configured format
    pub fn render_report(&self, report: &PoolReport) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => self.render_json(report),
            OutputFormat::Plain => self.render_plain(report),
            OutputFormat::Tty => self.render_table(report),
        }
    }

    fn render_json(&self, report: &PoolReport) -> io::Result<()> {
        let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
        self.term.write_line(&json)
    }

    /// Tab-separated records, one per line, for piping into other tools
    fn render_plain(&self, report: &PoolReport) -> io::Result<()> {
        for record in &report.results {
            self.term.write_line(&format!(
                "{}\t{}\t{}\t{}",
                record.id, record.exit_code, record.duration_ms, record.command
            ))?;
        }
        self.term.write_line(&self.summary_line(report))
    }

    fn render_table(&self, report: &PoolReport) -> io::Result<()> {
        if !report.results.is_empty() {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(vec![
                Cell::new("Slot").add_attribute(Attribute::Bold),
                Cell::new("Command").add_attribute(Attribute::Bold),
                Cell::new("Exit").add_attribute(Attribute::Bold),
                Cell::new("Duration").add_attribute(Attribute::Bold),
            ]);

            for record in &report.results {
                table.add_row(vec![
                    Cell::new(record.id),
                    Cell::new(&record.command),
                    self.format_exit_code(record),
                    Cell::new(format_duration(record.duration_ms)),
                ]);
            }

            self.term.write_line(&table.to_string())?;
        }

        let summary = self.summary_line(report);
        let summary = if self.supports_color() {
            let style = if report.all_succeeded() {
                Style::new().bold()
            } else {
                Style::new().red().bold()
            };
            style.apply_to(summary).to_string()
        } else {
            summary
        };
        self.term.write_line(&summary)
    }

    fn summary_line(&self, report: &PoolReport) -> String {
        let stats = &report.stats;
        let elapsed = format_duration(report.duration_ms);

        if report.dry_run {
            return format!(
                "Dry run: {} command(s) would have run with capacity {}",
                stats.dry_run, report.capacity
            );
        }
        if stats.completed == 0 {
            return "No commands were run.".to_string();
        }

        format!(
            "{} succeeded, {} failed, {} total in {elapsed} (capacity {})",
            stats.succeeded(),
            stats.failed,
            stats.completed,
            report.capacity
        )
    }

    fn format_exit_code(&self, record: &ExitRecord) -> Cell {
        let cell = Cell::new(record.exit_code);
        if !self.supports_color() {
            return cell;
        }
        if record.success() {
            cell.fg(Color::Green)
        } else {
            cell.fg(Color::Red).add_attribute(Attribute::Bold)
        }
    }

    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }
}

/// Human-readable duration
pub fn format_duration(ms: u64) -> String {
    if ms < 1_000 {
        format!("{ms}ms")
    } else if ms < 60_000 {
        let tenths = ms / 100;
        format!("{}.{}s", tenths / 10, tenths % 10)
    } else {
        let secs = ms / 1_000;
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procpool_types::{PoolStats, SlotId};

    fn report(failed: u64) -> PoolReport {
        PoolReport {
            capacity: 2,
            dry_run: false,
            results: vec![ExitRecord {
                id: SlotId(0),
                command: "true".to_string(),
                exit_code: 0,
                duration_ms: 12,
            }],
            stats: PoolStats {
                submitted: 3,
                completed: 3,
                failed,
                dry_run: 0,
            },
            duration_ms: 2_345,
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0ms");
        assert_eq!(format_duration(999), "999ms");
        assert_eq!(format_duration(1_050), "1.0s");
        assert_eq!(format_duration(59_999), "59.9s");
        assert_eq!(format_duration(125_000), "2m 05s");
    }

    #[test]
    fn test_summary_lines() {
        let renderer = OutputRenderer::new(OutputFormat::Plain, ColorChoice::Never);
        assert_eq!(
            renderer.summary_line(&report(1)),
            "2 succeeded, 1 failed, 3 total in 2.3s (capacity 2)"
        );

        let mut dry = report(0);
        dry.dry_run = true;
        dry.stats = PoolStats {
            dry_run: 4,
            ..PoolStats::default()
        };
        assert_eq!(
            renderer.summary_line(&dry),
            "Dry run: 4 command(s) would have run with capacity 2"
        );

        let mut empty = report(0);
        empty.stats = PoolStats::default();
        assert_eq!(renderer.summary_line(&empty), "No commands were run.");
    }
}
