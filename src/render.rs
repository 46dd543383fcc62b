//! Renders generated candidates for the terminal or for files.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::i18n::translate;
use crate::models::{BatchOutcome, PatternReport};
use crate::styles::StyledName;
use std::fmt::{self, Write};

/// The "copy all emails" payload: one address per line.
pub(crate) fn copy_block(emails: &[String]) -> String {
    emails.join("\n")
}

fn render_report_text(report: &PatternReport, lang: &str, out: &mut String) -> fmt::Result {
    writeln!(out, "{}", translate(lang, "results"))?;
    if report.per_person.is_empty() {
        writeln!(out, "{}", translate(lang, "noResults"))?;
        return Ok(());
    }

    for entry in &report.per_person {
        writeln!(
            out,
            "\n{} (@{})",
            entry.person.display_name(),
            entry.person.domain
        )?;
        for pattern in &entry.patterns {
            writeln!(out, "  {}", pattern)?;
        }
    }

    writeln!(out, "\n{}:", translate(lang, "copyAllEmails"))?;
    writeln!(out, "{}", copy_block(&report.flattened))
}

/// Renders a pattern report in the configured format.
pub(crate) fn render_report(
    report: &PatternReport,
    format: OutputFormat,
    lang: &str,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Plain => copy_block(&report.flattened),
        OutputFormat::Text => {
            let mut out = String::new();
            render_report_text(report, lang, &mut out)?;
            out.trim_end().to_string()
        }
    })
}

/// Renders a batch outcome; skipped records only appear in text and JSON.
pub(crate) fn render_batch(
    outcome: &BatchOutcome,
    format: OutputFormat,
    lang: &str,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(outcome)?,
        OutputFormat::Plain => copy_block(&outcome.report.flattened),
        OutputFormat::Text => {
            let mut out = String::new();
            render_report_text(&outcome.report, lang, &mut out)?;
            if !outcome.skipped.is_empty() {
                writeln!(out, "\n{}:", translate(lang, "skippedRecords"))?;
                for record in &outcome.skipped {
                    writeln!(out, "  #{}: {}", record.index, record.reason)?;
                }
            }
            out.trim_end().to_string()
        }
    })
}

/// Renders quick search results, marking each address with its shape check.
pub(crate) fn render_styles(
    styled: &[StyledName],
    format: OutputFormat,
    lang: &str,
) -> Result<String> {
    let all_emails: Vec<String> = styled
        .iter()
        .flat_map(|name| name.emails.iter().map(|e| e.email.clone()))
        .collect();

    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(styled)?,
        OutputFormat::Plain => copy_block(&all_emails),
        OutputFormat::Text => {
            let mut out = String::new();
            writeln!(out, "{}", translate(lang, "results"))?;
            for name in styled {
                writeln!(out, "\n{}", name.name)?;
                for email in &name.emails {
                    let mark = if email.looks_valid { '✓' } else { '✗' };
                    writeln!(out, "  {:<20} {} {}", email.style.label(), email.email, mark)?;
                }
            }
            writeln!(out, "\n{}:", translate(lang, "copyAllEmails"))?;
            writeln!(out, "{}", copy_block(&all_emails))?;
            out.trim_end().to_string()
        }
    })
}
