//! tzrange - pick date ranges in any supported timezone from the command line

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use tzrange::utils::format::{
    format_error, format_range, format_steps, format_zones, print_banner, render_calendar,
    StepReport,
};
use tzrange::utils::paths;
use tzrange::{
    civil_to_instant, format_instant, instant_to_civil, start_of_day_in_zone, zones, CivilTime,
    Config, Direction, FormatStyle, OutputFormat, Picker, Preset, Zone,
};

#[derive(Parser)]
#[command(name = "tzrange")]
#[command(author, version, about = "Timezone-aware date range picker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to <config dir>/tzrange/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Timezone to work in, overrides the config file (e.g., Europe/London)
    #[arg(long, global = true)]
    tz: Option<Zone>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported timezones
    Zones,
    /// Start of the day containing an RFC 3339 instant
    DayStart { instant: String },
    /// Convert a wall-clock time (YYYY-MM-DDTHH:MM) to an instant
    Convert { civil: String },
    /// Format an RFC 3339 instant in the zone
    Format {
        instant: String,
        #[arg(long, value_enum, default_value = "date-time")]
        style: FormatStyle,
    },
    /// Replay day picks (YYYY-MM-DD) through the range picker
    Select {
        #[arg(required = true)]
        days: Vec<String>,
    },
    /// Show a preset range
    Preset {
        #[command(subcommand)]
        kind: PresetKind,
    },
    /// Show a month grid with the selected range
    Calendar {
        /// Months to navigate from the current one (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
        /// Days to select before rendering (YYYY-MM-DD)
        #[arg(long = "pick")]
        picks: Vec<String>,
    },
}

#[derive(Subcommand)]
enum PresetKind {
    /// Today
    Today,
    /// Today and the following 6 days
    Week,
    /// Today and the following N-1 days
    Days { n: u32 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = load_config(&cli)?;
    let now = Utc::now();

    match &cli.command {
        Commands::Zones => run_zones(&cli, now),
        Commands::DayStart { instant } => run_day_start(&cli, &config, instant),
        Commands::Convert { civil } => run_convert(&cli, &config, civil),
        Commands::Format { instant, style } => run_format(&config, instant, *style),
        Commands::Select { days } => run_select(&cli, config, days, now),
        Commands::Preset { kind } => run_preset(&cli, &config, kind, now),
        Commands::Calendar { offset, picks } => run_calendar(config, *offset, picks, now),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new()
        .with_level(level)
        .env()
        .init()
        .context("failed to initialize logger")
}

fn load_config(cli: &Cli) -> Result<Config> {
    let path = match cli.config.clone().or_else(paths::config_file) {
        Some(path) => path,
        None => return Ok(Config::default().with_zone(cli.tz.unwrap_or_default())),
    };
    let config = Config::load(&path)?;
    Ok(match cli.tz {
        Some(zone) => config.with_zone(zone),
        None => config,
    })
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid instant '{}' (expected RFC 3339)", s))
}

fn parse_civil(s: &str) -> Result<CivilTime> {
    let naive = NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M")
        .with_context(|| format!("invalid civil time '{}' (expected YYYY-MM-DDTHH:MM)", s))?;
    Ok(CivilTime::new(
        naive.year(),
        naive.month(),
        naive.day(),
        naive.hour(),
        naive.minute(),
    )?)
}

fn parse_day(s: &str, zone: Zone) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid day '{}' (expected YYYY-MM-DD)", s))?;
    Ok(civil_to_instant(&CivilTime::midnight(date), &zone))
}

fn run_zones(cli: &Cli, now: DateTime<Utc>) -> Result<()> {
    println!("{}", format_zones(&zones::current_offsets(), now, cli.format));
    Ok(())
}

fn run_day_start(cli: &Cli, config: &Config, instant: &str) -> Result<()> {
    let instant = parse_instant(instant)?;
    let start = start_of_day_in_zone(instant, &config.zone);
    match cli.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "zone": config.zone.id(),
                "instant": instant,
                "day_start": start,
                "local": format_instant(start, config.zone, FormatStyle::Iso),
            })
        ),
        _ => {
            println!("{}", start.to_rfc3339());
            println!(
                "  {}",
                format_instant(start, config.zone, FormatStyle::Iso).dimmed()
            );
        }
    }
    Ok(())
}

fn run_convert(cli: &Cli, config: &Config, civil: &str) -> Result<()> {
    let civil = parse_civil(civil)?;
    let instant = civil_to_instant(&civil, &config.zone);
    let shown = instant_to_civil(instant, &config.zone);
    match cli.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "zone": config.zone.id(),
                "civil": civil.to_string(),
                "instant": instant,
                "round_trip": shown.to_string(),
            })
        ),
        _ => {
            println!("{}", instant.to_rfc3339());
            if shown != civil {
                // Only happens for wall-clock times skipped by a DST transition.
                println!(
                    "  {} {} does not exist in {}; resolved to {}",
                    "!".yellow(),
                    civil,
                    config.zone,
                    shown
                );
            }
        }
    }
    Ok(())
}

fn run_format(config: &Config, instant: &str, style: FormatStyle) -> Result<()> {
    let instant = parse_instant(instant)?;
    println!("{}", format_instant(instant, config.zone, style));
    Ok(())
}

fn run_select(cli: &Cli, config: Config, days: &[String], now: DateTime<Utc>) -> Result<()> {
    let zone = config.zone;
    let mut picker = Picker::new(zone, config.constraints, now);
    let mut steps = Vec::with_capacity(days.len());

    for day in days {
        let picked = parse_day(day, zone)?;
        let result = picker.select(picked);
        steps.push(StepReport {
            pick: day.clone(),
            state: picker.selection().state_name(),
            range: picker.range(),
            error: result.err(),
        });
    }

    if matches!(cli.format, OutputFormat::Table) {
        print_banner(zone);
    }
    println!("{}", format_steps(&steps, zone, cli.format));

    if cli.verbose {
        if let Some(err) = picker.error() {
            println!("\n{} {}", "Last pick rejected:".bold(), err.to_string().red());
        }
    }
    Ok(())
}

fn run_preset(cli: &Cli, config: &Config, kind: &PresetKind, now: DateTime<Utc>) -> Result<()> {
    let preset = match kind {
        PresetKind::Today => Preset::Today,
        PresetKind::Week => Preset::NextWeek,
        PresetKind::Days { n } => Preset::NextDays(*n),
    };
    let range = preset.resolve(now, &config.zone)?;
    println!(
        "{}",
        format_range(&preset.to_string(), &range, config.zone, cli.format)
    );
    Ok(())
}

fn run_calendar(config: Config, offset: i32, picks: &[String], now: DateTime<Utc>) -> Result<()> {
    let zone = config.zone;
    let mut picker = Picker::new(zone, config.constraints, now);

    for day in picks {
        if let Err(err) = picker.select(parse_day(day, zone)?) {
            println!("{}: {}", day, format_error(Some(err)));
        }
    }

    let direction = if offset < 0 {
        Direction::Prev
    } else {
        Direction::Next
    };
    for _ in 0..offset.unsigned_abs() {
        picker.navigate(direction);
    }

    print_banner(zone);
    println!("{}", render_calendar(picker.view(), zone, &picker.range()));
    Ok(())
}
