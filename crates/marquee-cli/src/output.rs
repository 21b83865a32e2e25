use clap::ValueEnum;
use comfy_table::{presets, modifiers, Attribute, Cell, Color, Table};
use marquee_models::{DisplayRecord, Genre};
use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", "✓".green().to_string(), msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => self.print_json(&json!({
                "type": "info",
                "message": msg.as_ref()
            })),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", "⚠".yellow().to_string(), msg.as_ref());
    }

    fn message(&self, kind: &str, symbol: String, msg: &str) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{} {}", symbol, msg),
            OutputFormat::Json | OutputFormat::JsonPretty => self.print_json(&json!({
                "type": kind,
                "message": msg
            })),
        }
    }

    /// Emit any serializable value as a JSON document (non-human formats)
    pub fn data<T: Serialize>(&self, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => self.print_json(&value),
            // Errors are shown even in quiet mode
            Err(e) => eprintln!("{} Failed to serialize output: {}", "✗".red(), e),
        }
    }

    pub fn records(&self, heading: &str, records: &[DisplayRecord]) {
        if self.format != OutputFormat::Human {
            self.data(&records);
            return;
        }
        if self.quiet {
            return;
        }

        let mut table = styled_table();
        table.set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new(heading).fg(Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Image").add_attribute(Attribute::Bold),
        ]);
        for record in records {
            table.add_row(vec![
                Cell::new(record.id),
                Cell::new(&record.title),
                Cell::new(&record.image),
            ]);
        }
        println!("{}", table);
        println!("{} {}", records.len().bright_white().bold(), "items".dimmed());
    }

    pub fn genres(&self, genres: &[Genre]) {
        if self.format != OutputFormat::Human {
            self.data(&genres);
            return;
        }
        if self.quiet {
            return;
        }

        let mut table = styled_table();
        table.set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Genre").fg(Color::Cyan).add_attribute(Attribute::Bold),
        ]);
        for genre in genres {
            table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
        }
        println!("{}", table);
    }

    /// Two-column key/value table for detail views
    pub fn fields(&self, heading: &str, rows: &[(&str, String)]) {
        if self.quiet {
            return;
        }
        let mut table = styled_table();
        table.set_header(vec![
            Cell::new(heading).fg(Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new(""),
        ]);
        for (label, value) in rows {
            table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
        }
        println!("{}", table);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data).unwrap_or_default()),
            OutputFormat::Human => println!("{}", data),
        }
    }
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}
