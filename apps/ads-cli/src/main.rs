use std::path::{Path, PathBuf};

use ads_app::{AppResult, RunRequest, SweepRequest, run_service, sweep_service};
use ads_core::units::{Quantity, parse_quantity};
use ads_project::SaturationDef;
use ads_thermo::TemperatureSweep;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(name = "ads-cli")]
#[command(about = "Adsorption equilibria from characteristic curves", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a run configuration
    Validate {
        /// Path to the run YAML (or JSON) file
        config_path: PathBuf,
    },
    /// Build the characteristic curve and compute every configured prediction
    Run {
        /// Path to the run YAML (or JSON) file
        config_path: PathBuf,
        /// Compute only, do not write output files
        #[arg(long)]
        no_write: bool,
    },
    /// Tabulate the saturation pressure (and adsorbate density) over temperature
    Saturation(SaturationArgs),
}

#[derive(Args)]
struct SaturationArgs {
    /// Path to the adsorbate property JSON file
    properties: PathBuf,
    /// Saturation pressure method (dubinin, amankwah, peng-robinson, ...)
    #[arg(short, long, default_value = "peng-robinson")]
    method: String,
    /// First temperature, e.g. 200K or -70C
    #[arg(long, value_parser = parse_temperature)]
    start: f64,
    /// Last temperature
    #[arg(long, value_parser = parse_temperature)]
    end: f64,
    /// Number of temperatures
    #[arg(long, default_value_t = 31)]
    points: usize,
    /// Also tabulate this density correlation (empirical, hauer, ozawa, ozawa-modified)
    #[arg(long)]
    density: Option<String>,
    /// Amankwah exponent
    #[arg(long)]
    exponent: Option<f64>,
    /// Starting pressure of equation-of-state solves, e.g. 1MPa or 10bar
    #[arg(long, value_parser = parse_pressure)]
    pressure_guess: Option<f64>,
    /// Equation of state behind extrapolated-equation
    #[arg(long)]
    equation: Option<String>,
    /// Supercritical regression of extrapolated-equation (polynomial2, amankwah, custom)
    #[arg(long)]
    regression: Option<String>,
    /// Grid size of extrapolated-equation
    #[arg(long)]
    grid_points: Option<usize>,
    /// Species parameter of widom-banuti
    #[arg(long)]
    species_parameter: Option<f64>,
    /// Two-column (K, MPa) table for tabulated-extrapolation
    #[arg(long)]
    table: Option<PathBuf>,
    /// Directory to write saturation_pressure.dat (and density.dat)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_temperature(text: &str) -> Result<f64, String> {
    parse_quantity(text, Quantity::Temperature).map_err(|e| e.to_string())
}

fn parse_pressure(text: &str) -> Result<f64, String> {
    parse_quantity(text, Quantity::Pressure).map_err(|e| e.to_string())
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            no_write,
        } => cmd_run(&config_path, !no_write),
        Commands::Saturation(args) => cmd_saturation(args),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating run: {}", config_path.display());
    let config = ads_project::load_run(config_path)?;
    println!(
        "  reference: {} file(s), {} prediction set(s)",
        config.reference.files.len(),
        config.predictions.len()
    );
    println!("✓ Run configuration is valid");
    Ok(())
}

fn cmd_run(config_path: &Path, write_outputs: bool) -> AppResult<()> {
    println!("Running: {}", config_path.display());
    let report = run_service::execute_run(&RunRequest {
        config_path,
        write_outputs,
    })?;

    let (a_lo, a_hi) = report.curve.potential_range();
    println!(
        "Characteristic curve: {} points, potential {:.3} to {:.3} kJ/mol",
        report.curve.potentials().len(),
        a_lo,
        a_hi
    );
    for mapped in &report.mapped {
        println!(
            "  {:>8.2} K: Psat = {:.5} MPa, density = {:.2} kg/m3",
            mapped.temperature, mapped.saturation_pressure, mapped.density
        );
    }

    for prediction in &report.predictions {
        let (x, y) = prediction.mode.columns();
        println!(
            "  {} at {}: {} from {:.6} to {:.6} ({} points, {})",
            prediction.mode,
            prediction.value,
            x,
            prediction.range.lo,
            prediction.range.hi,
            prediction.points.len(),
            y
        );
    }
    for path in &report.written {
        debug!(path = %path.display(), "wrote");
    }
    if !report.written.is_empty() {
        println!("  {} file(s) written", report.written.len());
    }

    println!("✓ Run completed in {:.3}s", report.elapsed_s);
    Ok(())
}

fn cmd_saturation(args: SaturationArgs) -> AppResult<()> {
    let request = SweepRequest {
        properties: &args.properties,
        saturation: SaturationDef {
            method: args.method,
            exponent: args.exponent,
            pressure_guess: args.pressure_guess,
            equation: args.equation,
            regression: args.regression,
            points: args.grid_points,
            species_parameter: args.species_parameter,
            table: args.table,
            coefficients: None,
        },
        density: args.density,
        sweep: TemperatureSweep {
            start: args.start,
            end: args.end,
            points: args.points,
        },
    };
    let report = sweep_service::run_sweep(&request)?;

    println!("Saturation pressure ({})", report.method);
    match &report.density {
        Some(density) => {
            println!("{:>12} {:>16} {:>16}", "T [K]", "Psat [MPa]", "rho [kg/m3]");
            for ((t, p), rho) in report.saturation.pairs().zip(&density.values) {
                println!("{t:>12.3} {p:>16.6} {rho:>16.3}");
            }
        }
        None => {
            println!("{:>12} {:>16}", "T [K]", "Psat [MPa]");
            for (t, p) in report.saturation.pairs() {
                println!("{t:>12.3} {p:>16.6}");
            }
        }
    }

    if let Some(dir) = &args.output {
        sweep_service::write_sweep(&report, dir)?;
        println!("✓ Written to {}", dir.display());
    }
    Ok(())
}
