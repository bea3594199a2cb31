//! Output formatting utilities

use crate::projector::{format_instant, instant_to_civil};
use crate::types::{FormatStyle, Instant, OutputFormat, SelectionRange, ValidationError};
use crate::utils::calendar::ViewMonth;
use crate::zones::{format_offset, Zone};
use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Outcome of one pick replayed through the picker
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub pick: String,
    pub state: &'static str,
    pub range: SelectionRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
}

/// Format an optional instant as a zone-local date, "-" when absent
pub fn format_day(instant: Option<Instant>, zone: Zone) -> String {
    instant
        .map(|t| format_instant(t, zone, FormatStyle::Date))
        .unwrap_or_else(|| "-".to_string())
}

/// Get error display string with color
pub fn format_error(error: Option<ValidationError>) -> String {
    match error {
        None => "ok".green().to_string(),
        Some(err) => format!("{} ({})", err.tag().red(), err),
    }
}

/// Table row for display
#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "Pick")]
    pick: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
}

fn rounded(table: Table) -> String {
    let mut table = table;
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(0)).with(Alignment::left()))
        .to_string()
}

/// Format replayed picks
pub fn format_steps(steps: &[StepReport], zone: Zone, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<StepRow> = steps
                .iter()
                .map(|step| StepRow {
                    pick: step.pick.clone(),
                    result: format_error(step.error),
                    state: step.state.to_string(),
                    start: format_day(step.range.start, zone),
                    end: format_day(step.range.end, zone),
                })
                .collect();
            rounded(Table::new(rows))
        }
        OutputFormat::Json => to_json(steps),
        OutputFormat::Csv => {
            let mut output = String::from("Pick,Error,State,Start,End\n");
            for step in steps {
                output.push_str(&format!(
                    "{},{},{},{},{}\n",
                    step.pick,
                    step.error.map(|e| e.tag()).unwrap_or(""),
                    step.state,
                    step.range.start.map(|t| t.to_rfc3339()).unwrap_or_default(),
                    step.range.end.map(|t| t.to_rfc3339()).unwrap_or_default(),
                ));
            }
            output
        }
    }
}

#[derive(Serialize)]
struct RangeJson<'a> {
    label: &'a str,
    zone: &'static str,
    #[serde(flatten)]
    range: &'a SelectionRange,
}

/// Format a single labelled range
pub fn format_range(label: &str, range: &SelectionRange, zone: Zone, format: OutputFormat) -> String {
    let local = |t: Option<Instant>| {
        t.map(|t| format_instant(t, zone, FormatStyle::DateTime))
            .unwrap_or_else(|| "-".to_string())
    };
    match format {
        OutputFormat::Table => {
            let rows = vec![
                ["Range".to_string(), label.to_string()],
                ["Zone".to_string(), zone.to_string()],
                ["Start".to_string(), local(range.start)],
                ["End".to_string(), local(range.end)],
                [
                    "Start (UTC)".to_string(),
                    range.start.map(|t| t.to_rfc3339()).unwrap_or_default(),
                ],
                [
                    "End (UTC)".to_string(),
                    range.end.map(|t| t.to_rfc3339()).unwrap_or_default(),
                ],
            ];
            rounded(Table::from_iter(rows))
        }
        OutputFormat::Json => to_json(&RangeJson {
            label,
            zone: zone.id(),
            range,
        }),
        OutputFormat::Csv => format!(
            "Range,Zone,Start,End\n{},{},{},{}\n",
            label,
            zone,
            range.start.map(|t| t.to_rfc3339()).unwrap_or_default(),
            range.end.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ),
    }
}

/// Table row for the zone listing
#[derive(Tabled, Serialize)]
struct ZoneRow {
    #[tabled(rename = "Zone")]
    zone: &'static str,
    #[tabled(rename = "Offset")]
    offset: String,
    #[tabled(rename = "Local Time")]
    local_time: String,
}

/// Format supported zones with their offset and wall clock at `now`
pub fn format_zones(zones: &[(Zone, i32)], now: Instant, format: OutputFormat) -> String {
    let rows: Vec<ZoneRow> = zones
        .iter()
        .map(|(zone, offset)| ZoneRow {
            zone: zone.id(),
            offset: format_offset(*offset),
            local_time: format_instant(now, *zone, FormatStyle::DateTime),
        })
        .collect();
    match format {
        OutputFormat::Table => rounded(Table::new(rows)),
        OutputFormat::Json => to_json(&rows),
        OutputFormat::Csv => {
            let mut output = String::from("Zone,Offset,Local Time\n");
            for row in &rows {
                output.push_str(&format!("{},{},\"{}\"\n", row.zone, row.offset, row.local_time));
            }
            output
        }
    }
}

/// Render the viewed month as a Sunday-first grid, highlighting the range
pub fn render_calendar(view: ViewMonth, zone: Zone, range: &SelectionRange) -> String {
    let mut output = format!("{:^20}\n", view.to_string()).bold().to_string();
    output.push_str(&format!("{}\n", "Su Mo Tu We Th Fr Sa".dimmed()));

    let mut column = view.leading_blanks();
    output.push_str(&"   ".repeat(column as usize));

    for start in view.day_starts(&zone) {
        let day = instant_to_civil(start, &zone).day();
        let cell = format!("{:>2}", day);
        let cell = if range.start == Some(start) || range.end == Some(start) {
            cell.black().on_cyan().to_string()
        } else if range.contains(start) {
            cell.cyan().to_string()
        } else {
            cell
        };
        output.push_str(&cell);
        column += 1;
        if column == 7 {
            output.push('\n');
            column = 0;
        } else {
            output.push(' ');
        }
    }
    if column != 0 {
        output.push('\n');
    }
    output
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

/// Print banner
pub fn print_banner(zone: Zone) {
    println!();
    println!("{}", "  tzrange - Timezone-aware date range picker".cyan().bold());
    println!("  {}", zone.to_string().dimmed());
    println!();
}
