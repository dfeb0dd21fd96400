//! Plain-text rendering of library results.
//!
//! Every function returns a `String`; printing is left to the caller so the
//! output can be tested. Styling goes through `console`, which drops the ANSI
//! codes by itself when stdout is not a terminal.

use cheatdeckapp::{Cheatsheet, LanguageCatalog, LanguageStats, TagUsage};
use console::style;
use std::collections::BTreeMap;
use std::fmt::Write;

fn flag_for(catalog: &LanguageCatalog, code: &str) -> String {
    catalog
        .info(code)
        .and_then(|info| info.flag.clone())
        .unwrap_or_else(|| format!("[{}]", code))
}

fn date_or_dash(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn render_list(sheets: &[Cheatsheet], catalog: &LanguageCatalog) -> String {
    if sheets.is_empty() {
        return format!("{}\n", style("No cheatsheets.").dim());
    }

    let width = sheets.iter().map(|s| s.filename.len()).max().unwrap_or(0);
    let mut out = String::new();
    for sheet in sheets {
        let _ = write!(
            out,
            "{:<width$}  {} {}",
            style(&sheet.filename).cyan(),
            flag_for(catalog, &sheet.language),
            style(&sheet.title).bold(),
            width = width
        );
        if !sheet.tags.is_empty() {
            let _ = write!(out, "  {}", style(format!("#{}", sheet.tags.join(" #"))).dim());
        }
        out.push('\n');
    }
    out
}

pub fn render_sheet(sheet: &Cheatsheet, catalog: &LanguageCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        flag_for(catalog, &sheet.language),
        style(&sheet.title).bold().underlined()
    );
    let _ = writeln!(
        out,
        "{}",
        style(format!(
            "{} · created {} · updated {}",
            sheet.filename,
            date_or_dash(sheet.created),
            date_or_dash(sheet.updated)
        ))
        .dim()
    );
    if !sheet.tags.is_empty() {
        let _ = writeln!(out, "{}", style(format!("#{}", sheet.tags.join(" #"))).dim());
    }
    out.push('\n');

    for item in &sheet.items {
        let _ = writeln!(out, "  {}", style(&item.code).green().bold());
        let _ = writeln!(out, "    {}", item.description);
        if let Some(example) = &item.example {
            let _ = writeln!(out, "    {} {}", style("e.g.").dim(), style(example).yellow());
        }
    }
    out
}

pub fn render_tags(tags: &[TagUsage]) -> String {
    if tags.is_empty() {
        return format!("{}\n", style("No tags.").dim());
    }

    let width = tags.iter().map(|t| t.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for tag in tags {
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            style(&tag.name).cyan(),
            tag.usage_count,
            width = width
        );
    }
    out
}

pub fn render_languages(stats: &BTreeMap<String, LanguageStats>, default: &str) -> String {
    let mut out = String::new();
    for (code, lang) in stats {
        let marker = if code == default { "*" } else { " " };
        let _ = writeln!(
            out,
            "{} {:<5} {:<4} {:<20} {}",
            marker,
            style(code).cyan(),
            lang.flag,
            lang.name,
            lang.count
        );
    }
    out
}

/// One problem per line, prefixed with a red marker.
pub fn render_problems(problems: &[String]) -> String {
    problems
        .iter()
        .map(|p| format!("{} {}\n", style("✗").red().bold(), p))
        .collect()
}

pub fn render_success(message: &str) -> String {
    format!("{} {}\n", style("✓").green().bold(), message)
}
