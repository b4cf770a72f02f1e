use std::path::Path;

use chrono::NaiveDate;

use crate::error::{Result, TimelineError};
use crate::model::{Item, Rgba, YearMonth};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Title,
    Start,
    End,
    Summary,
    Color,
}

/// Parse a year-month string.
///
/// Accepts `YYYY-MM` / `YYYY/MM` (month taken as written, so `0` and `12`
/// are both allowed) and full dates in common formats, which map to the
/// 1-based calendar month.
pub fn parse_year_month(s: &str) -> Result<YearMonth> {
    let s = s.trim();
    let invalid = || TimelineError::InvalidDate {
        value: s.to_string(),
    };

    let parts: Vec<&str> = s.split(['-', '/', '.']).collect();
    if parts.len() == 2 && parts[0].len() == 4 {
        let year = parts[0].parse().map_err(|_| invalid())?;
        let month = parts[1].parse().map_err(|_| invalid())?;
        return Ok(YearMonth::new(year, month));
    }

    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d.%m.%Y", "%d-%m-%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(YearMonth::from(d));
        }
    }
    Err(invalid())
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons > commas && semicolons >= tabs {
        b';'
    } else if tabs > commas {
        b'\t'
    } else {
        b','
    }
}

fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn header_to_column(normalized: &str) -> Option<Column> {
    match normalized {
        "title" | "name" | "label" | "event" | "item" => Some(Column::Title),
        "start" | "startdate" | "from" | "begin" => Some(Column::Start),
        "end" | "enddate" | "to" | "finish" | "until" => Some(Column::End),
        "summary" | "description" | "notes" | "details" => Some(Column::Summary),
        "color" | "colour" | "hex" => Some(Column::Color),
        _ => None,
    }
}

/// Import items from a CSV file.
///
/// Returns `(items, skipped_rows)`. A file that yields no items is an error.
pub fn import_csv(path: &Path) -> Result<(Vec<Item>, usize)> {
    let content = std::fs::read_to_string(path)?;
    let (items, skipped) = parse_csv(&content)?;
    if items.is_empty() {
        return Err(TimelineError::NoItems {
            path: path.to_path_buf(),
            skipped,
        });
    }
    Ok((items, skipped))
}

/// Parse CSV text with a header row.
///
/// The delimiter (comma, semicolon, tab) is auto-detected and headers are
/// matched loosely ("Start Date", "start_date", "from" all map to the start
/// column). Rows with unparsable dates are skipped; an unparsable colour only
/// drops the colour.
pub fn parse_csv(content: &str) -> Result<(Vec<Item>, usize)> {
    let first_line = content.lines().next().unwrap_or("");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(first_line))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_column(&normalize_header(h)))
        .collect();

    let has = |c: Column| columns.contains(&Some(c));
    if !has(Column::Start) || !has(Column::End) {
        return Err(TimelineError::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut items = Vec::new();
    let mut skipped = 0usize;

    for (i, record) in reader.records().enumerate() {
        let row = i + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };

        let field = |c: Column| {
            columns
                .iter()
                .position(|col| *col == Some(c))
                .and_then(|idx| record.get(idx))
                .filter(|s| !s.is_empty())
        };

        let (start, end) = match (
            field(Column::Start).map(parse_year_month),
            field(Column::End).map(parse_year_month),
        ) {
            (Some(Ok(start)), Some(Ok(end))) => (start, end),
            (start, end) => {
                tracing::warn!(
                    row,
                    start = ?field(Column::Start),
                    end = ?field(Column::End),
                    valid_start = matches!(start, Some(Ok(_))),
                    valid_end = matches!(end, Some(Ok(_))),
                    "skipping CSV row without a valid start and end"
                );
                skipped += 1;
                continue;
            }
        };

        let mut item = Item::new(start, end);
        item.title = field(Column::Title).map(str::to_string);
        item.summary = field(Column::Summary).map(str::to_string);
        item.color = field(Column::Color).and_then(|c| match Rgba::parse_hex(c) {
            Ok(color) => Some(color),
            Err(e) => {
                tracing::warn!(row, error = %e, "ignoring invalid colour");
                None
            }
        });
        items.push(item);
    }

    Ok((items, skipped))
}
