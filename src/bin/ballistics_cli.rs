use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use exterior_ballistics::angle::deg_to_moa;
use exterior_ballistics::{
    load_config, BallisticCoefficient, BallisticInputs, BallisticsError, DragModel,
    TrajectoryReport, TrajectoryRow, TrajectorySolver, ZeroSolution,
};
use serde::Serialize;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "ballistics-cli")]
#[command(version)]
#[command(about = "Point-mass trajectory tables, zeroing and point-blank range", long_about = None)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a range card for a zeroed rifle
    Trajectory {
        #[command(flatten)]
        shot: ShotArgs,

        /// Yards between printed rows
        #[arg(long, default_value = "100")]
        step: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Print the bore angle needed for the zero range
    Zero {
        #[command(flatten)]
        shot: ShotArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Print the point-blank range for a vital zone
    Pbr {
        #[command(flatten)]
        shot: ShotArgs,

        /// Vital zone radius (inches)
        #[arg(long, default_value = "4.0")]
        vital_zone: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// List the supported drag models
    Info,
}

/// Shot description, from a load file and/or flags. Flags win.
#[derive(Args, Debug)]
struct ShotArgs {
    /// TOML load file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Muzzle velocity (fps)
    #[arg(long)]
    velocity: Option<f64>,

    /// Ballistic coefficient valid at every velocity
    #[arg(short, long)]
    bc: Option<f64>,

    /// Velocity banded coefficient as bc:min_fps:max_fps (repeatable)
    #[arg(long = "bc-segment", value_parser = parse_bc_segment)]
    bc_segments: Vec<BallisticCoefficient>,

    /// Drag model (G1..G8)
    #[arg(short, long)]
    drag_model: Option<DragModel>,

    /// Sight height above the bore (inches)
    #[arg(long)]
    sight_height: Option<f64>,

    /// Bullet weight (grains)
    #[arg(short, long)]
    weight: Option<f64>,

    /// Zero range (yards)
    #[arg(short, long)]
    zero_range: Option<f64>,

    /// Point of impact above the line of sight at the zero range (inches)
    #[arg(long, allow_hyphen_values = true)]
    y_intercept: Option<f64>,

    /// Line of sight angle (degrees, negative downhill)
    #[arg(long, allow_hyphen_values = true)]
    los_angle: Option<f64>,

    /// Wind speed (mph)
    #[arg(long)]
    wind_speed: Option<f64>,

    /// Wind direction (degrees, 0 from ahead, 90 from the right)
    #[arg(long, allow_hyphen_values = true)]
    wind_angle: Option<f64>,

    /// Last range to compute (yards)
    #[arg(short, long)]
    max_range: Option<usize>,

    /// Altitude (ft)
    #[arg(long)]
    altitude: Option<f64>,

    /// Barometric pressure (inHg)
    #[arg(long)]
    pressure: Option<f64>,

    /// Temperature (°F)
    #[arg(long, allow_hyphen_values = true)]
    temperature: Option<f64>,

    /// Relative humidity (0.0 - 1.0)
    #[arg(long)]
    humidity: Option<f64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn parse_bc_segment(value: &str) -> Result<BallisticCoefficient, String> {
    let parts: Vec<&str> = value.split(':').collect();
    let [bc, min, max] = parts.as_slice() else {
        return Err(format!("expected bc:min_fps:max_fps, got '{value}'"));
    };
    let number = |s: &str| s.trim().parse::<f64>().map_err(|e| format!("'{s}': {e}"));
    Ok(BallisticCoefficient::new(number(bc)?, number(min)?, number(max)?))
}

impl ShotArgs {
    fn into_inputs(self) -> Result<BallisticInputs, BallisticsError> {
        let mut inputs = match &self.config {
            Some(path) => BallisticInputs::from(load_config(path)?),
            None if self.velocity.is_none() => {
                return Err("either --config or --velocity is required".into());
            }
            None => BallisticInputs::default(),
        };

        if self.bc.is_some() || !self.bc_segments.is_empty() {
            inputs.coefficients = self
                .bc
                .map(BallisticCoefficient::catch_all)
                .into_iter()
                .chain(self.bc_segments)
                .collect();
        }

        let overrides = [
            (&mut inputs.velocity, self.velocity),
            (&mut inputs.sight_height, self.sight_height),
            (&mut inputs.weight, self.weight),
            (&mut inputs.zero_range, self.zero_range),
            (&mut inputs.y_intercept, self.y_intercept),
            (&mut inputs.los_angle, self.los_angle),
            (&mut inputs.wind.speed, self.wind_speed),
            (&mut inputs.wind.angle, self.wind_angle),
            (&mut inputs.atmosphere.altitude, self.altitude),
            (&mut inputs.atmosphere.pressure, self.pressure),
            (&mut inputs.atmosphere.temperature, self.temperature),
            (&mut inputs.atmosphere.humidity, self.humidity),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(drag_model) = self.drag_model {
            inputs.drag_model = drag_model;
        }
        if let Some(max_range) = self.max_range {
            inputs.max_range = max_range;
        }

        inputs.validate()?;
        Ok(inputs)
    }
}

#[derive(Debug, Serialize)]
struct ZeroOutput {
    drag_model: DragModel,
    zero_range: f64,
    angle_deg: f64,
    angle_moa: f64,
    iterations: usize,
    converged: bool,
}

impl ZeroOutput {
    fn new(inputs: &BallisticInputs, zero: ZeroSolution) -> Self {
        Self {
            drag_model: inputs.drag_model,
            zero_range: inputs.zero_range,
            angle_deg: zero.angle,
            angle_moa: deg_to_moa(zero.angle),
            iterations: zero.iterations,
            converged: zero.converged,
        }
    }
}

#[derive(Debug, Serialize)]
struct PbrOutput {
    zero_range: usize,
    vital_zone: f64,
    min_pbr: usize,
    max_pbr: usize,
}

#[derive(Debug, Serialize)]
struct TrajectoryOutput<'a> {
    zero: &'a ZeroOutput,
    max_valid_range: usize,
    rows: &'a [TrajectoryRow],
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Trajectory { shot, step, output } => {
            let inputs = shot.into_inputs()?;
            let report = TrajectorySolver::new(inputs.clone())?.solve()?;
            info!(
                samples = report.context.sample_count(),
                max_valid_range = report.context.max_valid_range(),
                "trajectory solved"
            );
            display_trajectory(&inputs, &report, step, output)?;
        }

        Commands::Zero { shot, output } => {
            let inputs = shot.into_inputs()?;
            let zero = TrajectorySolver::new(inputs.clone())?.solve_zero();
            let result = ZeroOutput::new(&inputs, zero);
            match output {
                OutputFormat::Table => {
                    println!("Zero range:  {:.0} yd ({})", result.zero_range, result.drag_model);
                    println!("Bore angle:  {:.4}° ({:.2} MOA)", result.angle_deg, result.angle_moa);
                    println!(
                        "Converged:   {} after {} iterations",
                        if result.converged { "yes" } else { "no" },
                        result.iterations
                    );
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Csv => write_csv(std::iter::once(&result))?,
            }
        }

        Commands::Pbr { shot, vital_zone, output } => {
            if !(vital_zone > 0.0) {
                return Err(BallisticsError::from("--vital-zone must be positive").into());
            }
            let inputs = shot.into_inputs()?;
            let report = TrajectorySolver::new(inputs)?.solve()?;
            let result = PbrOutput {
                zero_range: report.zero_range,
                vital_zone,
                min_pbr: report.min_pbr(vital_zone),
                max_pbr: report.max_pbr(vital_zone),
            };
            match output {
                OutputFormat::Table => {
                    println!("Vital zone:  ±{:.1} in around the zero at {} yd", result.vital_zone, result.zero_range);
                    println!("Point blank: {} to {} yd", result.min_pbr, result.max_pbr);
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Csv => write_csv(std::iter::once(&result))?,
            }
        }

        Commands::Info => {
            println!("ballistics-cli {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Drag models:");
            for model in DragModel::ALL {
                println!("  {} (id {})  {}", model, model.id(), model.description());
            }
        }
    }

    Ok(())
}

fn write_csv<T: Serialize>(records: impl IntoIterator<Item = T>) -> Result<(), BallisticsError> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn display_trajectory(
    inputs: &BallisticInputs,
    report: &TrajectoryReport,
    step: usize,
    format: OutputFormat,
) -> Result<(), BallisticsError> {
    let zero = ZeroOutput::new(inputs, report.zero);
    let rows: Vec<TrajectoryRow> = report.rows(step).collect();

    match format {
        OutputFormat::Json => {
            let output = TrajectoryOutput {
                zero: &zero,
                max_valid_range: report.context.max_valid_range(),
                rows: &rows,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        OutputFormat::Csv => write_csv(&rows)?,

        OutputFormat::Table => {
            println!(
                "{} | {:.0} fps | zero {:.0} yd | bore angle {:.4}° ({:.2} MOA){}",
                zero.drag_model,
                inputs.velocity,
                zero.zero_range,
                zero.angle_deg,
                zero.angle_moa,
                if zero.converged { "" } else { " NOT CONVERGED" }
            );
            println!();
            println!(
                "{:>6} {:>9} {:>8} {:>9} {:>8} {:>9} {:>9} {:>7}",
                "Range", "Path", "MOA", "Windage", "MOA", "Velocity", "Energy", "Time"
            );
            println!(
                "{:>6} {:>9} {:>8} {:>9} {:>8} {:>9} {:>9} {:>7}",
                "(yd)", "(in)", "", "(in)", "", "(fps)", "(ft-lb)", "(s)"
            );
            for row in &rows {
                println!(
                    "{:>6} {:>9.2} {:>8.2} {:>9.2} {:>8.2} {:>9.0} {:>9.0} {:>7.3}",
                    row.range,
                    row.path,
                    row.path_moa,
                    row.windage,
                    row.windage_moa,
                    row.velocity,
                    row.energy,
                    row.time
                );
            }
            if report.context.max_valid_range() < inputs.max_range {
                println!();
                println!(
                    "Trajectory ends at {} yd ({:?})",
                    report.context.max_valid_range(),
                    report.context.termination()
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bc_segment() {
        let segment = parse_bc_segment("0.45:1500:2800").unwrap();
        assert_eq!(segment, BallisticCoefficient::new(0.45, 1500.0, 2800.0));
        assert!(parse_bc_segment("0.45:1500").is_err());
        assert!(parse_bc_segment("a:b:c").is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
