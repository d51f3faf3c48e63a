// Report generation for media check runs

use colored::Colorize;
use mediacheck_scanner::{CheckSummary, LinkCheck};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// One line per check: marker, status, method, URL and the error if any.
pub fn format_check_line(check: &LinkCheck) -> String {
    let status = check
        .status_code
        .map(|s| s.to_string())
        .unwrap_or_else(|| "ERR".to_string());

    if check.passed() {
        format!(
            "  {} {} {} {}",
            "✓".green().bold(),
            status.green(),
            check.method.to_string().bright_black(),
            check.url
        )
    } else {
        let mut line = format!(
            "  {} {} {} {}",
            "✗".red().bold(),
            status.red(),
            check.method.to_string().bright_black(),
            check.url
        );
        if let Some(ref error) = check.error {
            line.push_str(&format!("\n      {}", error.yellow()));
        }
        line
    }
}

pub fn generate_text_report(summary: &CheckSummary) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push('\n');
    report.push_str("                         MEDIA SOURCE CHECK REPORT\n");
    report.push_str(RULE);
    report.push_str("\n\n");

    report.push_str(&format!("Page:         {}\n", summary.base_url));
    report.push_str(&format!("Page Size:    {} bytes\n", summary.page_bytes));
    report.push_str(&format!("Sources:      {}\n\n", summary.checks.len()));

    if summary.checks.is_empty() {
        report.push_str("No <source src=...> elements found.\n\n");
    } else {
        for check in &summary.checks {
            report.push_str(&format_check_line(check));
            report.push('\n');
        }
        report.push('\n');
    }

    report.push_str(RULE);
    report.push('\n');

    let passed = summary.passed_count();
    let failed = summary.failed_count();
    let failed_str = if failed > 0 {
        format!("{} failed", failed).red().bold().to_string()
    } else {
        format!("{} failed", failed)
    };
    report.push_str(&format!(
        "Checked {} media URL(s): {}, {}\n",
        summary.checks.len(),
        format!("{} passed", passed).green(),
        failed_str
    ));

    report
}

pub fn generate_json_report(summary: &CheckSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

pub fn generate_report(
    summary: &CheckSummary,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(summary)),
        ReportFormat::Json => generate_json_report(summary),
    }
}

/// Remove ANSI colour sequences, leaving the plain text.
pub fn strip_ansi(s: &str) -> String {
    let mut plain = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if chars.next() == Some('[') {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}

pub fn write_report(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
