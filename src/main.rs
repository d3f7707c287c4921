use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use u_roster::calendar::{date_in_month, month_name, parse_month, sundays_in_month};
use u_roster::config::ConfigFile;
use u_roster::io::{load_mappings, load_people, write_assignment, GridSink};
use u_roster::models::{CompositionPattern, Person, RoleMapping};
use u_roster::validation::validate_roster;
use u_roster::{logging, DutyScheduler, Result, RosterError, SchedulerConfig};

const DEFAULT_HEADER_ROWS: usize = 30;

#[derive(Parser, Debug)]
#[command(name = "u-roster")]
#[command(about = "Generate the monthly duty roster for both services")]
struct Cli {
    /// Month: 1-12 or an Indonesian month name (e.g. Agustus)
    #[arg(long)]
    month: String,

    #[arg(long)]
    year: i32,

    /// Schedule a single day instead of every Sunday of the month
    #[arg(long)]
    day: Option<u32>,

    /// People sheet (CSV)
    #[arg(long)]
    people: PathBuf,

    /// Role mapping sheet (CSV)
    #[arg(long)]
    mapping: PathBuf,

    /// Schedule template (CSV); a grid is generated from the mapping when omitted
    #[arg(long)]
    template: Option<PathBuf>,

    #[arg(long, default_value = ".")]
    outdir: PathBuf,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed; 0 seeds from the OS
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    max_readers: Option<usize>,

    #[arg(long)]
    max_cantors: Option<usize>,

    #[arg(long)]
    max_musicians: Option<usize>,

    /// Usher-collector composition code (e.g. 2b)
    #[arg(long)]
    usher_pattern: Option<String>,

    /// Duty-member composition code (e.g. 3a)
    #[arg(long)]
    duty_member_pattern: Option<String>,

    /// Never fill composition shortfalls from the other group
    #[arg(long)]
    strict_composition: bool,

    /// Never assign someone who served on the previous date
    #[arg(long)]
    no_relax: bool,

    /// Rows scanned for date placeholders
    #[arg(long)]
    header_rows: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,
}

/// Resolved run settings: defaults, then config file, then flags.
#[derive(Debug)]
struct Settings {
    config: SchedulerConfig,
    seed: u64,
    header_rows: usize,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => ConfigFile::from_file(path)?,
            None => ConfigFile::default(),
        };
        let mut config = file.apply_to(SchedulerConfig::default())?;

        if let Some(n) = self.max_readers {
            config = config.with_max_readers(n);
        }
        if let Some(n) = self.max_cantors {
            config = config.with_max_cantors(n);
        }
        if let Some(n) = self.max_musicians {
            config = config.with_max_musicians(n);
        }
        if let Some(code) = &self.usher_pattern {
            config = config.with_usher_pattern(CompositionPattern::parse(code)?);
        }
        if let Some(code) = &self.duty_member_pattern {
            config = config.with_duty_member_pattern(CompositionPattern::parse(code)?);
        }
        if self.strict_composition {
            config = config.with_strict_composition(true);
        }
        if self.no_relax {
            config = config.with_strict_fairness(true);
        }

        Ok(Settings {
            config,
            seed: self.seed.or(file.run.seed).unwrap_or(0),
            header_rows: self
                .header_rows
                .or(file.run.header_rows)
                .unwrap_or(DEFAULT_HEADER_ROWS),
        })
    }

    fn dates(&self, month: u32) -> Result<Vec<NaiveDate>> {
        match self.day {
            Some(day) => Ok(vec![date_in_month(self.year, month, day)?]),
            None => sundays_in_month(self.year, month),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match run(&cli) {
        Ok(path) => println!("{}", path.display()),
        Err(e) => {
            tracing::error!("roster generation failed: {e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf> {
    if cli.month.trim().is_empty() || cli.year <= 0 {
        return Err(RosterError::config(
            "--month and --year are required, e.g. --month Agustus --year 2025",
        ));
    }
    let settings = cli.settings()?;
    tracing::debug!(?settings, "settings resolved");

    let month = parse_month(&cli.month)?;
    let dates = cli.dates(month)?;
    tracing::info!(month = month_name(month), year = cli.year, dates = dates.len(), "scheduling");

    let people = load_people(&cli.people)?;
    let mappings = load_mappings(&cli.mapping)?;
    check_roster(&people, &mappings)?;

    let mut rng = if settings.seed == 0 {
        StdRng::from_os_rng()
    } else {
        StdRng::seed_from_u64(settings.seed)
    };
    let scheduler = DutyScheduler::new(settings.config);
    let result = scheduler.schedule(&people, &mappings, &dates, &mut rng);

    let short = result
        .reports
        .iter()
        .filter(|r| !r.is_satisfied(settings.config.strict_composition))
        .count();
    if short > 0 {
        tracing::warn!(short, "some composition quotas were not met");
    }

    let mut grid = match &cli.template {
        Some(path) => GridSink::load(path)?,
        None => GridSink::blank(&mappings, dates.len()),
    };
    grid.fill_headers(&dates, settings.header_rows);
    let written = write_assignment(&result.assignment, &dates, &mut grid);

    let path = output_path(&cli.outdir, month);
    std::fs::create_dir_all(&cli.outdir)?;
    grid.save(&path)?;
    tracing::info!(path = %path.display(), cells = written, "schedule saved");
    Ok(path)
}

fn check_roster(people: &[Person], mappings: &[RoleMapping]) -> Result<()> {
    let Err(errors) = validate_roster(people, mappings) else {
        return Ok(());
    };
    let mut fatal = Vec::new();
    for e in &errors {
        if e.is_fatal() {
            tracing::error!("{}", e.message);
            fatal.push(e.message.as_str());
        } else {
            tracing::warn!("{}", e.message);
        }
    }
    if fatal.is_empty() {
        Ok(())
    } else {
        Err(RosterError::data(fatal.join("; ")))
    }
}

fn output_path(outdir: &Path, month: u32) -> PathBuf {
    let stamp = Local::now().format("%H.%M.%S");
    outdir.join(format!("JadwalPetugas_{}_{stamp}.csv", month_name(month)))
}
