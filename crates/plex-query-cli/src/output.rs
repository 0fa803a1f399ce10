use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use serde_json::{json, Value};
use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

/// One block of the report: a heading plus one line (human) and one value (JSON) per entry
#[derive(Debug, Clone)]
pub struct ReportSection {
    pub heading: String,
    pub lines: Vec<String>,
    pub items: Vec<Value>,
}

impl ReportSection {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            lines: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>, item: Value) {
        self.lines.push(line.into());
        self.items.push(item);
    }

    /// The `- entry` lines printed under the heading
    pub fn render_items(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str("- ");
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Value {
        json!({
            "section": self.heading,
            "items": self.items,
        })
    }
}

pub struct Output {
    format: OutputFormat,
    printed_section: Cell<bool>,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            printed_section: Cell::new(false),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn section(&self, section: &ReportSection) {
        match self.format {
            OutputFormat::Human => {
                // Blank line between blocks
                if self.printed_section.replace(true) {
                    println!();
                }
                println!(
                    "{}:",
                    section
                        .heading
                        .if_supports_color(Stream::Stdout, |h| h.bold())
                );
                print!("{}", section.render_items());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&section.to_json());
            }
        }
    }

    fn print_json(&self, data: &Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_items() {
        let mut section = ReportSection::new("Unwatched Movies");
        section.push("Heat", json!("Heat"));
        section.push("Ronin", json!("Ronin"));
        assert_eq!(section.render_items(), "- Heat\n- Ronin\n");
    }

    #[test]
    fn test_render_items_empty_section() {
        let section = ReportSection::new("Connected Clients");
        assert_eq!(section.render_items(), "");
    }

    #[test]
    fn test_to_json() {
        let mut section = ReportSection::new("Connected Clients");
        section.push("Bedroom", json!({"title": "Bedroom"}));
        let value = section.to_json();
        assert_eq!(value["section"], "Connected Clients");
        assert_eq!(value["items"][0]["title"], "Bedroom");
        assert_eq!(value["items"].as_array().unwrap().len(), 1);
    }
}
