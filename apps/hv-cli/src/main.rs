use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use hv_app::{
    Analysis, AppError, AppResult, MockCalculationService, WizardSession, comparison_lines,
    kpi_cards, project_service, render_report_today,
};
use hv_engine::{energy_series_csv, lifecycle_series_csv};
use hv_project::{default_form_data, lookup_zip, validate_project_step, validate_system_step};

#[derive(Parser)]
#[command(name = "hv-cli")]
#[command(about = "HVAC retrofit savings analyzer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print (or save) the reference project form
    Defaults {
        /// Output file path (.yaml or .json); defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Look up city, state and climate zone for a ZIP code
    Lookup {
        zip: String,
    },
    /// Check a form file against the wizard step rules
    Validate {
        /// Path to the form file (.yaml or .json)
        form_path: PathBuf,
    },
    /// Print the fully resolved project specification
    Resolve {
        /// Form file; the reference project when omitted
        #[arg(short, long)]
        form: Option<PathBuf>,
    },
    /// Run a calculation and show KPIs and the comparison table
    Calculate {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Write the printable summary
    Report {
        #[command(flatten)]
        run: RunArgs,
        /// Output file path; defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export a projected series as CSV
    ExportSeries {
        #[command(flatten)]
        run: RunArgs,
        /// Which series to export
        #[arg(value_enum)]
        series: SeriesKind,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Form file; the reference project when omitted
    #[arg(short, long)]
    form: Option<PathBuf>,
    /// Projection config YAML
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Simulated service latency in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,
}

#[derive(Clone, Copy, ValueEnum)]
enum SeriesKind {
    Energy,
    Lifecycle,
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Defaults { output } => cmd_defaults(output.as_deref()),
        Commands::Lookup { zip } => cmd_lookup(&zip),
        Commands::Validate { form_path } => cmd_validate(&form_path),
        Commands::Resolve { form } => cmd_resolve(form.as_deref()),
        Commands::Calculate { run } => cmd_calculate(&run),
        Commands::Report { run, output } => cmd_report(&run, output.as_deref()),
        Commands::ExportSeries {
            run,
            series,
            output,
        } => cmd_export_series(&run, series, output.as_deref()),
    }
}

fn cmd_defaults(output: Option<&Path>) -> AppResult<()> {
    let form = default_form_data();
    match output {
        Some(path) => {
            project_service::save_form(path, &form)?;
            println!("✓ Reference form written to {}", path.display());
        }
        None => {
            let yaml = serde_yaml::to_string(&hv_project::ProjectDocument::new(form))
                .map_err(|e| AppError::Project(e.to_string()))?;
            print!("{}", yaml);
        }
    }
    Ok(())
}

fn cmd_lookup(zip: &str) -> AppResult<()> {
    let info = lookup_zip(zip).ok_or_else(|| AppError::LocationNotFound {
        zip: zip.trim().to_string(),
    })?;
    println!("{}, {} (climate zone {})", info.city, info.state, info.climate_zone);
    Ok(())
}

fn cmd_validate(form_path: &Path) -> AppResult<()> {
    println!("Validating form: {}", form_path.display());
    let form = project_service::load_form(form_path)?;

    let mut errors = validate_project_step(&form);
    for (field, message) in validate_system_step(&form).iter() {
        errors.insert(field, message);
    }

    if errors.is_empty() {
        println!("✓ Form is valid");
        Ok(())
    } else {
        for (field, message) in errors.iter() {
            println!("  {}: {}", field, message);
        }
        Err(AppError::Validation(errors))
    }
}

fn load_session(form: Option<&Path>, config: Option<&Path>) -> AppResult<WizardSession> {
    let config = project_service::load_config(config)?;
    let form = match form {
        Some(path) => project_service::load_form(path)?,
        None => default_form_data(),
    };
    Ok(WizardSession::with_form(config, form))
}

fn cmd_resolve(form: Option<&Path>) -> AppResult<()> {
    let session = load_session(form, None)?;
    let spec = session.resolved_spec();
    let yaml = serde_yaml::to_string(&spec).map_err(|e| AppError::Project(e.to_string()))?;
    print!("{}", yaml);
    Ok(())
}

/// Run the calculation on a background worker, showing a spinner while it is pending.
fn run_analysis(run: &RunArgs) -> AppResult<Analysis> {
    let mut session = load_session(run.form.as_deref(), run.config.as_deref())?;
    let service = Arc::new(MockCalculationService::new(Duration::from_millis(
        run.delay_ms,
    )));

    let started = Instant::now();
    let mut pending = session.spawn_calculation(service)?;
    let spinner = ['|', '/', '-', '\\'];
    let mut tick = 0usize;
    let (ticket, outcome) = loop {
        match pending.try_finish() {
            Ok(done) => break done,
            Err(still_pending) => {
                pending = still_pending;
                eprint!(
                    "\r{} Calculating...  elapsed={:.1}s",
                    spinner[tick % spinner.len()],
                    started.elapsed().as_secs_f64()
                );
                let _ = io::stderr().flush();
                tick += 1;
                std::thread::sleep(Duration::from_millis(100));
            }
        }
    };
    if tick > 0 {
        eprint!("\r{}\r", " ".repeat(40));
        let _ = io::stderr().flush();
    }

    let analysis = session.complete_calculation(ticket, outcome)?;
    tracing::debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        request = analysis.request_id.short(),
        "analysis ready"
    );
    Ok(analysis.clone())
}

fn cmd_calculate(run: &RunArgs) -> AppResult<()> {
    let analysis = run_analysis(run)?;
    let p = &analysis.projection;

    println!("{}", analysis.spec.project_name);
    println!();
    for card in kpi_cards(p) {
        println!("  {:<24}{}", card.title, card.value);
    }

    println!("\nDetailed Results:");
    println!(
        "  {:<26}{:>14}{:>14}{:>14}",
        "Metric", "Baseline", "Proposed", "Δ (Savings)"
    );
    for line in comparison_lines(&p.comparison, p.analysis_period_years) {
        println!(
            "  {:<26}{:>14}{:>14}{:>14}",
            line.label, line.baseline, line.compare, line.delta
        );
    }
    Ok(())
}

fn cmd_report(run: &RunArgs, output: Option<&Path>) -> AppResult<()> {
    let analysis = run_analysis(run)?;
    let text = render_report_today(&analysis);

    if let Some(path) = output {
        std::fs::write(path, text)?;
        println!("✓ Report written to {}", path.display());
    } else {
        print!("{}", text);
    }
    Ok(())
}

fn cmd_export_series(run: &RunArgs, series: SeriesKind, output: Option<&Path>) -> AppResult<()> {
    let analysis = run_analysis(run)?;
    let p = &analysis.projection;

    let (csv, rows) = match series {
        SeriesKind::Energy => (energy_series_csv(&p.energy_series), p.energy_series.len()),
        SeriesKind::Lifecycle => (lifecycle_series_csv(&p.lifecycle), p.lifecycle.baseline.len()),
    };

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} years to {}", rows, path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}
