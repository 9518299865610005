//! # Vessel CLI
//!
//! Command line front end for `vessel_core`. Reads component or vessel
//! definitions as JSON and prints a fitness report, or the raw JSON result
//! with `--json`.
//!
//! Set `RUST_LOG=debug` to see every defaulted value as it is resolved.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;

use vessel_core::calculations::{calculate_with_config, ComponentInput, ComponentResult};
use vessel_core::life::{assess_life_with_config, LifeAssessment, LifeInput};
use vessel_core::materials::{pipe_schedule, MaterialDb};
use vessel_core::vessel::{evaluate_vessel_with_config, VesselInput, VesselSummary};
use vessel_core::{CalcError, CalcResult, EngineConfig, Warning};

#[derive(Parser)]
#[command(name = "vessel_cli")]
#[command(about = "Pressure vessel thickness, MAWP and remaining life calculator")]
struct Cli {
    /// Threshold configuration (TOML); built-in limits when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON instead of a report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a single component from a JSON file
    Component {
        /// Path to a ComponentInput JSON file
        input: PathBuf,
    },

    /// Calculate every component of a vessel and summarize
    Vessel {
        /// Path to a VesselInput JSON file
        input: PathBuf,
    },

    /// Look up the allowable stress of a material
    Stress {
        /// Material code (e.g., "SA-516-70")
        code: String,

        /// Design temperature (°F)
        temperature_f: f64,
    },

    /// Remaining life and inspection interval from thicknesses and rates
    Life {
        /// Current measured thickness (in)
        #[arg(long)]
        actual: f64,

        /// Minimum required thickness (in)
        #[arg(long)]
        required: f64,

        /// Short-term corrosion rate (in/yr)
        #[arg(long)]
        short_term: Option<f64>,

        /// Long-term corrosion rate (in/yr)
        #[arg(long)]
        long_term: Option<f64>,
    },

    /// List materials in the allowable stress table
    Materials,

    /// List nominal pipe sizes used for nozzle necks
    Pipes,

    /// Write the built-in threshold configuration as TOML
    InitConfig {
        /// Destination file
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CalcResult<()> {
    let config = match &cli.config {
        Some(path) => {
            log::info!("loading thresholds from {}", path.display());
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };

    match &cli.command {
        Commands::Component { input } => {
            let component: ComponentInput = read_json(input)?;
            let result = calculate_with_config(&component, &config)?;
            if cli.json {
                print_json(&result)?;
            } else {
                print_component(&result);
            }
        }

        Commands::Vessel { input } => {
            let vessel: VesselInput = read_json(input)?;
            let summary = evaluate_vessel_with_config(&vessel, &config)?;
            if cli.json {
                print_json(&summary)?;
            } else {
                print_vessel(&summary);
            }
        }

        Commands::Stress { code, temperature_f } => {
            let lookup = MaterialDb::global().resolve_stress(code, *temperature_f);
            if cli.json {
                print_json(&lookup)?;
            } else {
                let material = lookup.normalized_code.clone().unwrap_or_else(|| code.clone());
                let stress = lookup.clone().into_result(code)?;
                println!(
                    "{} at {:.0}°F: S = {:.0} psi ({:?})",
                    material, lookup.temperature_f, stress, lookup.status
                );
            }
        }

        Commands::Life {
            actual,
            required,
            short_term,
            long_term,
        } => {
            let input = LifeInput {
                actual_thickness_in: *actual,
                required_thickness_in: *required,
                short_term_rate: *short_term,
                long_term_rate: *long_term,
            };
            let assessment = assess_life_with_config(&input, &config)?;
            if cli.json {
                print_json(&assessment)?;
            } else {
                print_life(&assessment);
            }
        }

        Commands::Materials => {
            let db = MaterialDb::global();
            if cli.json {
                print_json(&db.all())?;
            } else {
                println!("{:<14} {:<28} {:>10} {:>10}", "Code", "Category", "Min (°F)", "Max (°F)");
                println!("{}", "-".repeat(65));
                for spec in db.all() {
                    println!(
                        "{:<14} {:<28} {:>10.0} {:>10.0}",
                        spec.code,
                        spec.category.display_name(),
                        spec.min_temp_f,
                        spec.max_temp_f
                    );
                }
            }
        }

        Commands::Pipes => {
            let sizes: Vec<_> = pipe_schedule::pipe_sizes().collect();
            if cli.json {
                print_json(&sizes)?;
            } else {
                println!("{:>6} {:>10} {:>10} {:>10}", "NPS", "OD (in)", "STD (in)", "ID (in)");
                println!("{}", "-".repeat(39));
                for size in sizes {
                    println!(
                        "{:>6} {:>10.3} {:>10.3} {:>10.3}",
                        size.nps,
                        size.outside_diameter_in,
                        size.standard_wall_in,
                        size.standard_inside_diameter_in()
                    );
                }
            }
        }

        Commands::InitConfig { path } => {
            config.save(path)?;
            println!("Wrote thresholds to {}", path.display());
        }
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let text = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| CalcError::serialization(format!("{}: {}", path.display(), e)))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn print_component(result: &ComponentResult) {
    println!("═══════════════════════════════════════");
    println!("  {} ({})", result.label, result.geometry);
    println!("═══════════════════════════════════════");
    println!();
    println!("Design Basis:");
    println!("  P   = {:.1} psi", result.design_pressure_psi);
    if result.static_head_psi > 0.0 {
        println!("  P_s = {:.1} psi static head", result.static_head_psi);
    }
    println!("  S   = {:.0} psi", result.allowable_stress_psi);
    println!("  E   = {:.2}", result.joint_efficiency);
    println!();
    println!("Stress Modes:");
    for mode in &result.modes {
        print!("  {:<24} t = {:.4}\"", mode.mode, mode.required_thickness_in);
        if let Some(mawp) = mode.mawp_psi {
            print!("  MAWP = {:.1} psi", mawp);
        }
        println!("  [{}]", mode.code_reference);
    }
    println!();
    println!("Thickness:");
    println!(
        "  t_min = {:.4}\" governed by {} ({})",
        result.required_thickness_in, result.governing_condition, result.formula
    );
    if let Some(actual) = result.actual_thickness_in {
        println!("  t_act = {:.4}\" {}", actual, status_icon(result.compliant));
    }
    if let Some(mawp) = result.mawp_psi {
        println!("  MAWP  = {:.1} psi", mawp);
    }
    if let Some(allowance) = result.corrosion_allowance_in {
        println!("  Ca    = {:.4}\"", allowance);
    }

    if let Some(rate) = result.corrosion_rates.governing {
        println!();
        println!("Life:");
        println!("  Rate  = {:.5} in/yr", rate);
        if let Some(rl) = result.remaining_life_years {
            println!("  RL    = {:.1} yr", rl);
        }
        if let Some(plan) = result.inspection {
            println!("  Next  = {:.1} yr, {}", plan.interval_years, plan.inspection_type);
        }
        if let Some(date) = result.next_inspection_date {
            println!("  Due   = {}", date);
        }
        if let (Some(t), Some(p)) = (result.projected_thickness_in, result.projected_mawp_psi) {
            println!("  At next inspection: t = {:.4}\", MAWP = {:.1} psi", t, p);
        }
    }

    print_defaults_and_warnings(result);
    println!();
    println!("═══════════════════════════════════════");
    println!("  RESULT: {}", if result.passes() { "PASS" } else { "FAIL" });
    println!("═══════════════════════════════════════");
}

fn print_defaults_and_warnings(result: &ComponentResult) {
    if !result.defaults_used.is_empty() {
        println!();
        println!("Defaults Used:");
        for default in &result.defaults_used {
            println!("  {}", default);
        }
    }
    print_warnings(&result.warnings);
}

fn print_warnings(warnings: &[Warning]) {
    if warnings.is_empty() {
        return;
    }
    println!();
    println!("Warnings:");
    for warning in warnings {
        println!("  {}", warning);
    }
}

fn print_vessel(summary: &VesselSummary) {
    println!("═══════════════════════════════════════");
    println!("  VESSEL {}", summary.tag);
    println!("═══════════════════════════════════════");
    println!();
    println!(
        "{:<20} {:>10} {:>10} {:>10} {:>10}",
        "Component", "t_min", "t_act", "MAWP", "RL (yr)"
    );
    println!("{}", "-".repeat(64));
    for c in &summary.components {
        println!(
            "{:<20} {:>10.4} {:>10} {:>10} {:>10} {}",
            c.label,
            c.required_thickness_in,
            optional(c.actual_thickness_in, 4),
            optional(c.mawp_psi, 1),
            optional(c.remaining_life_years, 1),
            status_icon(c.passes())
        );
    }
    println!();
    if let (Some(label), Some(mawp)) = (&summary.governing_component, summary.governing_mawp_psi) {
        println!("Governing MAWP:      {:.1} psi ({})", mawp, label);
    }
    if let (Some(label), Some(rl)) = (&summary.life_limiting_component, summary.min_remaining_life_years) {
        println!("Min remaining life:  {:.1} yr ({})", rl, label);
    }
    if let Some(interval) = summary.inspection_interval_years {
        println!(
            "Next inspection:     {:.1} yr, {}",
            interval,
            if summary.internal_inspection_required { "internal" } else { "external/on-stream" }
        );
    }
    println!("Critical warnings:   {}", summary.critical_warning_count);
    println!();
    println!("═══════════════════════════════════════");
    println!("  RESULT: {}", if summary.overall_compliant { "PASS" } else { "FAIL" });
    println!("═══════════════════════════════════════");
}

fn print_life(assessment: &LifeAssessment) {
    println!("Corrosion allowance: {:.4}\"", assessment.corrosion_allowance_in);
    if let Some(rate) = assessment.rates.governing {
        println!("Governing rate:      {:.5} in/yr", rate);
    }
    match (assessment.remaining_life_years, assessment.inspection) {
        (Some(rl), Some(plan)) => {
            println!("Remaining life:      {:.1} yr", rl);
            println!("Next inspection:     {:.1} yr, {}", plan.interval_years, plan.inspection_type);
        }
        _ => println!("Remaining life:      not available (no corrosion rate)"),
    }
    println!("Reference:           {}", assessment.code_reference);
    print_warnings(&assessment.warnings);
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.*}", precision, v))
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
