//! ticket-report - generate a synthetic support-ticket dataset and its KPI reports.
//!
//! Usage:
//!   ticket-report                      # 500 tickets, CSV files in the current directory
//!   ticket-report 2000 --format both   # CSV files plus ticket_report.xlsx
//!   ticket-report --seed 42 --view 3   # reproducible run, print a preview without asking

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ticket_report::config::ReportConfig;
use ticket_report::error::AppError;
use ticket_report::export::{self, OutputFormat};
use ticket_report::generator::{FakerProvider, YearWindow};
use ticket_report::viewer::{CompletionPrompt, SystemLauncher, TerminalPrompt};
use ticket_report::Progress;

/// Synthetic support-ticket report generator.
#[derive(Parser)]
#[command(name = "ticket-report", version, about = "Support ticket KPI report generator")]
struct Args {
    /// Number of tickets to generate (default: 500).
    #[arg(value_name = "COUNT")]
    count: Option<usize>,

    /// JSON config file. Command-line flags override its values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for reproducible data.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory receiving the output files.
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Output form: csv, xlsx or both.
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Resolution time limit counted as within SLA, in hours.
    #[arg(long, value_name = "HOURS")]
    sla_hours: Option<u32>,

    /// Answer the viewer menu non-interactively (1-4).
    #[arg(long, value_name = "CHOICE")]
    view: Option<String>,

    /// Skip the viewer menu.
    #[arg(long)]
    no_prompt: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<ReportConfig, AppError> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)?,
            None => ReportConfig::default(),
        };
        if let Some(count) = self.count {
            config.ticket_count = count;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(hours) = self.sla_hours {
            config.sla_threshold_hours = hours;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let config = args.resolve_config()?;
    log::debug!("config: {:?}", config);

    let mut provider = match config.seed {
        Some(seed) => FakerProvider::seeded(seed),
        None => FakerProvider::from_entropy(),
    };
    let window = YearWindow::this_year(chrono::Local::now().naive_local());

    let report = ticket_report::run(&config, window, &mut provider, |p| match p {
        Progress::Generating { count } => println!("Generating {} tickets...", count),
        Progress::Aggregating => println!("Calculating KPIs..."),
        Progress::Saving => println!("\nSaving files..."),
        Progress::Saved(file) => {
            let name = file
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.path.display().to_string());
            println!("✓ {} saved", name);
        }
    })?;
    println!("\nAll files saved successfully.");

    if args.no_prompt {
        return Ok(());
    }

    let preview = export::ticket_preview(&report.tickets, &report.tables, config.preview_rows);
    let stdin = io::stdin();
    let mut prompt = TerminalPrompt::new(stdin.lock(), io::stdout(), SystemLauncher)
        .with_answer(args.view.clone());
    prompt.present(&report.export.primary, &preview)?;

    Ok(())
}
