//! Utility functions for the Salient CLI

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

/// Create a progress bar with standard styling
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Format bytes in human-readable format
pub fn format_bytes(bytes: f64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}

/// Print formatted output (JSON or human-readable)
pub fn print_output(data: &Value, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(data)?);
    } else {
        print_human_readable(data);
    }
    Ok(())
}

/// Print a success marker with a message
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

fn print_human_readable(data: &Value) {
    match data {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::Array(arr) => {
                        println!("{}:", style(key).bold());
                        for (i, item) in arr.iter().enumerate() {
                            println!("  {}: {}", i + 1, item);
                        }
                    }
                    other => println!("{}: {}", style(key).bold(), other),
                }
            }
        }
        other => println!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_byte_magnitudes() {
        assert_eq!(format_bytes(512.0), "512.00 B");
        assert_eq!(format_bytes(2048.0), "2.00 KB");
        assert_eq!(format_bytes(3.0 * 1024.0 * 1024.0), "3.00 MB");
    }
}
