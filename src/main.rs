#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::Path;

use mortydex::app_config::{Config, LogLevel};
use mortydex::debt::DebtEditor;
use mortydex::models::{CharacterEntity, DebtField, DebtRecord, FilterState, Selector, SelectorKind};
use mortydex::{Controller, apply_search, projected_amount};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List characters, optionally filtered and searched
    Characters(CharactersArgs),

    /// List locations from the catalog
    Locations,

    /// Show the known values for each filter
    Filters,

    /// Inspect or edit a debt record
    Debt {
        #[command(subcommand)]
        action: DebtCommand,
    },

    /// Compute a compound-interest projection
    #[command(allow_negative_numbers = true)]
    Project {
        /// Principal amount
        principal: f64,
        /// Interest rate in percent per period
        rate: f64,
        /// Number of periods
        periods: f64,
    },

    /// Generate shell completions for mortydex
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct CharactersArgs {
    /// Status filter (e.g. Alive, Dead, unknown)
    #[arg(long, default_value = "All")]
    status: String,

    /// Gender filter (e.g. female, male, genderless)
    #[arg(long, default_value = "All")]
    gender: String,

    /// Species filter (e.g. Human, Alien)
    #[arg(long, default_value = "All")]
    species: String,

    /// Type filter
    #[arg(long = "type", default_value = "All")]
    kind: String,

    /// Case-insensitive name search applied after fetching
    #[arg(short, long)]
    search: Option<String>,

    /// Cap on concurrent episode lookups
    #[arg(long)]
    concurrency: Option<usize>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl CharactersArgs {
    fn filters(&self) -> FilterState {
        FilterState {
            status: Selector::from(self.status.as_str()),
            gender: Selector::from(self.gender.as_str()),
            species: Selector::from(self.species.as_str()),
            kind: Selector::from(self.kind.as_str()),
        }
    }
}

#[derive(Subcommand, Debug)]
enum DebtCommand {
    /// Show a debt record and its projected amount
    Show {
        /// Debt identifier
        id: String,
    },
    /// Edit fields of a debt record and save it
    Edit {
        /// Debt identifier
        id: String,

        /// Field assignment such as debtAmount=1200 (repeatable)
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        set: Vec<(DebtField, String)>,

        /// Show the result without saving
        #[arg(long)]
        dry_run: bool,
    },
}

fn parse_assignment(raw: &str) -> Result<(DebtField, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    let field = name.trim().parse::<DebtField>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

/// mortydex - character catalog browser and debt editor
#[derive(Parser, Debug)]
#[command(name = "mortydex")]
#[command(version)]
#[command(about = "Browse the character catalog and edit debt records")]
#[command(long_about = "mortydex lists characters from the public catalog with filters and search,
and edits debt records on the finance backend.

EXAMPLES:
    mortydex characters                              # First page of all characters
    mortydex characters --status Alive --species Human
    mortydex characters --search smith               # Narrow by name after fetching
    mortydex debt show 42                            # Show a debt and its projection
    mortydex debt edit 42 --set installment=24       # Update and save
    mortydex project 1000 5 12                       # 1795.86
    mortydex completions bash > mortydex.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file does not
    exist, a default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Colored stderr logger
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level.min(log::max_level())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let (color, tag) = Self::style(record.level());
        let _ = writeln!(
            std::io::stderr(),
            "\x1B[{}m{} {} {}\x1B[0m",
            color,
            now,
            tag,
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here; the effective level is set by max_level below.
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();
    if let Some(level) = &cli.log_level {
        log::set_max_level(LogLevel::from(level.clone()).into());
    }

    // Commands that need neither config nor network
    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "mortydex", &mut std::io::stdout());
            return Ok(());
        }
        Commands::Project {
            principal,
            rate,
            periods,
        } => {
            println!("{:.2}", projected_amount(*principal, *rate, *periods));
            return Ok(());
        }
        Commands::Filters => {
            print_filter_options();
            return Ok(());
        }
        _ => {}
    }

    let config = Config::load_or_create(Path::new(&cli.config_path))?;
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.into());
    }
    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Characters(args) => run_characters(&controller, args).await,
        Commands::Locations => run_locations(&controller).await,
        Commands::Debt { action } => run_debt(&controller, action).await,
        Commands::Filters | Commands::Project { .. } | Commands::Completions { .. } => Ok(()),
    }
}

async fn run_characters(controller: &Controller, args: CharactersArgs) -> Result<()> {
    let filters = args.filters();
    let pipeline = controller.pipeline(args.concurrency);

    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {pos}/{len}")
            .context("Invalid progress template")?
            .progress_chars("=> "),
    );
    bar.set_message("Resolving first episodes");

    let outcome = pipeline
        .load_characters_with_progress(&filters, |done, total| {
            bar.set_length(total as u64);
            bar.set_position(done as u64);
        })
        .await;
    bar.finish_and_clear();

    if let Some(message) = outcome.error {
        return Err(anyhow!("Could not load characters: {}", message));
    }

    let shown = apply_search(&outcome.characters, args.search.as_deref().unwrap_or(""));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    if shown.is_empty() {
        println!("No characters found.");
        return Ok(());
    }
    for character in &shown {
        print_character(character);
    }
    info!("{} of {} characters shown", shown.len(), outcome.characters.len());
    Ok(())
}

async fn run_locations(controller: &Controller) -> Result<()> {
    let locations = controller.pipeline(None).load_locations().await;
    if locations.is_empty() {
        warn!("No locations available");
    }
    for location in locations {
        println!("{:>4}  {} ({}, {})", location.id, location.name, location.kind, location.dimension);
    }
    Ok(())
}

async fn run_debt(controller: &Controller, action: DebtCommand) -> Result<()> {
    match action {
        DebtCommand::Show { id } => {
            let editor = controller.open_debt(&id).await;
            let record = editor
                .record()
                .ok_or_else(|| anyhow!("Debt {} could not be loaded", id))?;
            print_debt(record, editor.projected_amount());
            Ok(())
        }
        DebtCommand::Edit { id, set, dry_run } => {
            let mut editor = controller.open_debt(&id).await;
            if !editor.is_loaded() {
                return Err(anyhow!("Debt {} could not be loaded", id));
            }
            for (field, value) in &set {
                editor.set_field(*field, value)?;
            }
            report_edit(&editor, dry_run).await
        }
    }
}

async fn report_edit(editor: &DebtEditor, dry_run: bool) -> Result<()> {
    if dry_run {
        if let Some(record) = editor.record() {
            print_debt(record, editor.projected_amount());
        }
        return Ok(());
    }

    let saved = editor
        .submit()
        .await
        .ok_or_else(|| anyhow!("Debt {} was not saved", editor.id()))?;
    print_debt(&saved, editor.projected_amount());
    Ok(())
}

fn print_character(character: &CharacterEntity) {
    println!("{} [{}]", character.name, character.status);
    println!("  {} - {}", character.origin.name, character.species);
    println!("  Last known location: {}", character.location.name);
    println!(
        "  First seen in: {}",
        character.first_episode_name.as_deref().unwrap_or("-")
    );
}

fn print_debt(record: &DebtRecord, amount: f64) {
    println!("Debt name:   {}", record.debt_name);
    println!("Lender name: {}", record.lender_name);
    println!("Debt amount: {}", record.debt_amount);
    println!("Interest:    {}%", record.interest_rate);
    println!("Installment: {}", record.installment);
    println!("Amount:      {:.2}", amount);
    if !record.description.is_empty() {
        println!("Description: {}", record.description);
    }
}

fn print_filter_options() {
    for kind in SelectorKind::ALL_KINDS {
        let values: Vec<&str> = kind.known_options().iter().map(|o| o.value).collect();
        println!("{:<8} All, {}", kind.param(), values.join(", "));
    }
}
