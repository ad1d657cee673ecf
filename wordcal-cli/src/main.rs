mod output;

use anyhow::{Context, Result};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;

use output::OutputTarget;
use wordcal_core::{
    CalendarConfig, CellKind, CellRecord, ConfigOption, calendar_records, render_document,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// Human-readable option list
    Text,
    /// JSON object keyed by option name
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Styled SVG calendar
    Svg,
    /// Raw cell records (geometry plus labels) as JSON
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "wordcal", version)]
#[command(about = "Generate a word-count tracking calendar as an SVG image")]
struct Args {
    /// Config file: `<option> <value>` lines, or JSON when named *.json
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the resolved configuration before rendering
    #[arg(long, value_enum)]
    print_config: Option<ConfigFormat>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Resolve configuration and lay out the month without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Document width in pixels
    #[arg(long, allow_negative_numbers = true)]
    width: Option<i64>,

    /// Document height in pixels
    #[arg(long, allow_negative_numbers = true)]
    height: Option<i64>,

    /// Set the document width from a cell width
    #[arg(long, allow_negative_numbers = true)]
    cell_width: Option<i64>,

    /// Set the document height from a cell height
    #[arg(long, allow_negative_numbers = true)]
    cell_height: Option<i64>,

    /// Fill of in-month cells
    #[arg(long)]
    cell_primary_color: Option<String>,

    /// Fill of padding cells and stroke of all cells
    #[arg(long)]
    cell_secondary_color: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    cell_stroke_width: Option<i64>,

    /// Corner radius of every cell
    #[arg(long, allow_negative_numbers = true)]
    cell_roundness: Option<i64>,

    /// Number of days in the calendar
    #[arg(long)]
    day_number: Option<i64>,

    /// Columns Monday is shifted right by (0-6)
    #[arg(long)]
    monday_cell_offset: Option<i64>,

    /// Weekday of day 1 (1 = Monday .. 7 = Sunday)
    #[arg(long)]
    first_month_day: Option<i64>,

    /// Month as YYYY-MM; sets day-number and first-month-day
    #[arg(long)]
    month: Option<String>,

    /// Gap between cells and around the border
    #[arg(long, allow_negative_numbers = true)]
    margins: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    text_offset_x: Option<i64>,

    #[arg(long, allow_negative_numbers = true)]
    text_offset_y: Option<i64>,

    /// dominant-baseline of the date labels
    #[arg(long)]
    text_baseline: Option<String>,

    #[arg(long)]
    text_color: Option<String>,

    #[arg(long)]
    font_family: Option<String>,

    #[arg(long)]
    font_weight: Option<String>,

    #[arg(long)]
    font_size: Option<i64>,

    /// Word count to reach by the last day
    #[arg(long)]
    goal_wordcount: Option<i64>,

    /// Words-per-day distribution
    #[arg(long)]
    #[arg(value_parser = [
        "regular-cumulative", "regular-daily",
        "uphill-cumulative", "uphill-daily",
        "reverse-cumulative", "reverse-daily",
        "downhill-cumulative", "downhill-daily",
    ])]
    goal_type: Option<String>,

    /// Rounding when the goal does not divide evenly
    #[arg(long)]
    #[arg(value_parser = ["up", "down"])]
    goal_rounding: Option<String>,

    /// Where to write the calendar (`-` for stdout)
    #[arg(short, long)]
    output_filename: Option<String>,
}

/// Where the rendered calendar went, for the summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    DryRun,
    Stdout,
    File,
}

fn main() -> Result<()> {
    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    init_logging(args.verbose);

    let config = resolve_config(&args, &matches, |name| std::env::var(name).ok())?;
    if let Some(format) = args.print_config {
        print_config(&config, format)?;
    }

    let records = calendar_records(&config)?;
    if args.dry_run {
        announce(&config, &records, Destination::DryRun);
        return Ok(());
    }

    let mut target = OutputTarget::new(&config.output_filename)?;
    match args.format {
        OutputFormat::Svg => write!(target, "{}", render_document(&config, &records))?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut target, &records)?;
            writeln!(target)?;
        }
    }
    target
        .flush()
        .with_context(|| format!("failed to write {}", config.output_filename.display()))?;

    let destination = if target.is_stdout() {
        Destination::Stdout
    } else {
        Destination::File
    };
    announce(&config, &records, destination);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Defaults, then `WORDCAL_*` variables, then `--config`, then explicit flags.
fn resolve_config<F>(args: &Args, matches: &ArgMatches, env: F) -> Result<CalendarConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = CalendarConfig::default();
    config
        .apply_env(env)
        .context("invalid WORDCAL_* environment variable")?;
    if let Some(path) = &args.config {
        config
            .apply_file(path)
            .with_context(|| format!("invalid config file {}", path.display()))?;
    }
    let overrides = flag_overrides(args, matches);
    log::debug!("{} option(s) set on the command line", overrides.len());
    config
        .apply_all(overrides)
        .context("invalid command-line option")?;
    config.validate()?;
    Ok(config)
}

/// Options given as flags, in command-line order so a later flag wins.
fn flag_overrides(args: &Args, matches: &ArgMatches) -> Vec<(ConfigOption, String)> {
    let numbers = [
        (ConfigOption::Width, args.width),
        (ConfigOption::Height, args.height),
        (ConfigOption::CellWidth, args.cell_width),
        (ConfigOption::CellHeight, args.cell_height),
        (ConfigOption::CellStrokeWidth, args.cell_stroke_width),
        (ConfigOption::CellRoundness, args.cell_roundness),
        (ConfigOption::DayNumber, args.day_number),
        (ConfigOption::MondayCellOffset, args.monday_cell_offset),
        (ConfigOption::FirstMonthDay, args.first_month_day),
        (ConfigOption::Margins, args.margins),
        (ConfigOption::TextOffsetX, args.text_offset_x),
        (ConfigOption::TextOffsetY, args.text_offset_y),
        (ConfigOption::FontSize, args.font_size),
        (ConfigOption::GoalWordcount, args.goal_wordcount),
    ];
    let texts = [
        (ConfigOption::CellPrimaryColor, &args.cell_primary_color),
        (ConfigOption::CellSecondaryColor, &args.cell_secondary_color),
        (ConfigOption::Month, &args.month),
        (ConfigOption::TextBaseline, &args.text_baseline),
        (ConfigOption::TextColor, &args.text_color),
        (ConfigOption::FontFamily, &args.font_family),
        (ConfigOption::FontWeight, &args.font_weight),
        (ConfigOption::GoalType, &args.goal_type),
        (ConfigOption::GoalRounding, &args.goal_rounding),
        (ConfigOption::OutputFilename, &args.output_filename),
    ];

    let mut overrides: Vec<(ConfigOption, String)> = numbers
        .into_iter()
        .filter_map(|(option, value)| value.map(|v| (option, v.to_string())))
        .chain(
            texts
                .into_iter()
                .filter_map(|(option, value)| value.clone().map(|v| (option, v))),
        )
        .collect();
    overrides.sort_by_key(|(option, _)| matches.index_of(&arg_id(*option)));
    overrides
}

/// Clap derives argument ids from field names.
fn arg_id(option: ConfigOption) -> String {
    option.key().replace('-', "_")
}

fn print_config(config: &CalendarConfig, format: ConfigFormat) -> Result<()> {
    match format {
        ConfigFormat::Text => println!("{config}"),
        ConfigFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
    }
    Ok(())
}

fn summary_line(
    config: &CalendarConfig,
    records: &[CellRecord],
    destination: Destination,
) -> String {
    let days = records
        .iter()
        .filter(|record| record.kind == CellKind::Primary)
        .count();
    let last_goal = records
        .iter()
        .rev()
        .find_map(|record| record.goal.as_deref())
        .unwrap_or("-");
    let summary = format!(
        "{} days, {} cells, {} goal ending at {}",
        days,
        records.len(),
        config.goal_type,
        last_goal
    );
    match destination {
        Destination::DryRun => format!("🗓  {summary} (dry run, nothing written)"),
        Destination::Stdout => format!("🗓  {summary}"),
        Destination::File => format!("🗓  {summary} -> {}", config.output_filename.display()),
    }
}

fn announce(config: &CalendarConfig, records: &[CellRecord], destination: Destination) {
    let line = summary_line(config, records, destination).bright_cyan();
    // Keep stdout clean when the calendar itself goes there.
    if destination == Destination::Stdout {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}
