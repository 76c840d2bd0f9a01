//! Output formatting

use serde_json::{Map, Value};

/// Output builder: text lines for people, a JSON object for `--json`
pub struct Output {
    json_mode: bool,
    fields: Map<String, Value>,
    lines: Vec<String>,
}

impl Output {
    /// Create a new output builder
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            fields: Map::new(),
            lines: Vec::new(),
        }
    }

    /// Add a string field to the JSON output
    pub fn field(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Add a JSON value field to the JSON output
    pub fn field_value(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Append one line of human-readable text
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Append several lines of human-readable text
    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Render to the text that [`print`](Self::print) writes
    pub fn render(&self) -> String {
        if self.json_mode {
            serde_json::to_string_pretty(&self.fields).unwrap_or_default()
        } else {
            self.lines.join("\n")
        }
    }

    /// Print the output
    pub fn print(self) {
        if self.json_mode || !self.lines.is_empty() {
            println!("{}", self.render());
        }
    }
}
