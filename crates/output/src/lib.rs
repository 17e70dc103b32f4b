use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
    Csv,
    Quiet,
}

pub struct OutputRenderer {
    format: OutputFormat,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render a command result. Row-shaped values (arrays of objects) become
    /// tables or CSV; anything else falls back to pretty JSON.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<()> {
        let json_value = serde_json::to_value(value)?;

        match self.format {
            OutputFormat::Table => {
                if !self.render_table(&json_value)? {
                    println!("{}", serde_json::to_string_pretty(&json_value)?);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&json_value)?);
            }
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(&json_value)?);
            }
            OutputFormat::Csv => {
                if !self.render_csv(&json_value)? {
                    println!("{}", serde_json::to_string_pretty(&json_value)?);
                }
            }
            OutputFormat::Quiet => {
                if !self.render_quiet(&json_value) {
                    println!("{}", serde_json::to_string_pretty(&json_value)?);
                }
            }
        }

        Ok(())
    }

    fn render_table(&self, value: &Value) -> Result<bool> {
        let (headers, rows) = match Self::coerce_rows(value) {
            Some(data) => data,
            None => return Ok(false),
        };

        let mut builder = Builder::default();
        builder.push_record(headers);
        for row in rows {
            builder.push_record(row);
        }

        let table = builder.build().with(Style::rounded()).to_string();
        println!("{}", table);
        Ok(true)
    }

    fn render_csv(&self, value: &Value) -> Result<bool> {
        let (headers, rows) = match Self::coerce_rows(value) {
            Some(data) => data,
            None => return Ok(false),
        };

        println!(
            "{}",
            headers
                .iter()
                .map(|h| Self::csv_cell(h))
                .collect::<Vec<_>>()
                .join(",")
        );
        for row in rows {
            println!(
                "{}",
                row.iter()
                    .map(|c| Self::csv_cell(c))
                    .collect::<Vec<_>>()
                    .join(",")
            );
        }

        Ok(true)
    }

    /// Quiet mode prints only identifiers, one per line. Qase ids are
    /// integers, project codes are strings; both count as identifiers here.
    fn render_quiet(&self, value: &Value) -> bool {
        match value {
            Value::Array(rows) => {
                let mut printed = false;
                for row in rows {
                    printed |= self.render_quiet(row);
                }
                printed
            }
            Value::Object(obj) => {
                if let Some(id) = obj.get("id").or_else(|| obj.get("code")) {
                    println!("{}", Self::value_to_string(id));
                    true
                } else {
                    false
                }
            }
            Value::Null => false,
            other => {
                println!("{}", Self::value_to_string(other));
                true
            }
        }
    }

    fn coerce_rows(value: &Value) -> Option<(Vec<String>, Vec<Vec<String>>)> {
        let rows = match value {
            Value::Array(rows) if !rows.is_empty() => rows,
            _ => return None,
        };

        // Union of keys across rows, in encounter order.
        let mut headers: Vec<String> = Vec::new();
        for row in rows {
            if let Value::Object(obj) = row {
                for key in obj.keys() {
                    if !headers.iter().any(|h| h == key) {
                        headers.push(key.clone());
                    }
                }
            }
        }

        if headers.is_empty() {
            return None;
        }

        let mut data = Vec::with_capacity(rows.len());
        for row in rows {
            let mut record = Vec::with_capacity(headers.len());
            if let Value::Object(obj) = row {
                for header in &headers {
                    let cell = obj
                        .get(header)
                        .map(Self::value_to_string)
                        .unwrap_or_default();
                    record.push(cell);
                }
            }
            data.push(record);
        }

        Some((headers, data))
    }

    fn csv_cell(raw: &str) -> String {
        if raw.contains([',', '"', '\n']) {
            format!("\"{}\"", raw.replace('"', "\"\""))
        } else {
            raw.to_string()
        }
    }

    fn value_to_string(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}
