//! # Bolt CLI
//!
//! Terminal front end for bolt_core.
//!
//! ```bash
//! bolt calc M10 8.8 --dm 13
//! bolt calc M12 10.9 --preload 0.7 --dm 16 --mu 0.12 --json
//! bolt --table data/threads.csv list M1
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use bolt_core::calculations::{calculate, Bolt, BoltInput, DEFAULT_FRICTION_COEFF, DEFAULT_PRELOAD};
use bolt_core::{builtin_metric_coarse, load_table, BoltResult, ThreadTable};
use clap::{Parser, Subcommand};
use tracing::{debug, Level};

#[derive(Parser, Debug)]
#[command(name = "bolt", version, about = "Bolt preload, axial load and tightening torque")]
struct Cli {
    /// Thread reference table (CSV). The bundled M3-M24 table is used if unset.
    #[arg(long, global = true, env = "BOLT_TABLE")]
    table: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate axial load and, with --dm, tightening torque
    Calc {
        /// Thread designation, e.g. M10
        thread: String,

        /// Strength class, e.g. 8.8
        strength_class: String,

        /// Preload as a fraction of yield strength
        #[arg(long, default_value_t = DEFAULT_PRELOAD)]
        preload: f64,

        /// Effective friction diameter at the bearing face (mm)
        #[arg(long)]
        dm: Option<f64>,

        /// Friction coefficient
        #[arg(long, default_value_t = DEFAULT_FRICTION_COEFF)]
        mu: f64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List thread designations in the table
    List {
        /// Only designations starting with this prefix
        prefix: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let json_errors = matches!(cli.command, Command::Calc { json: true, .. });

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if json_errors {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> BoltResult<()> {
    let loaded;
    let table: &ThreadTable = match &cli.table {
        Some(path) => {
            debug!(path = %path.display(), "Using table file");
            loaded = load_table(path)?;
            &loaded
        }
        None => builtin_metric_coarse()?,
    };

    match cli.command {
        Command::Calc {
            thread,
            strength_class,
            preload,
            dm,
            mu,
            json,
        } => {
            let input = BoltInput::new(thread, strength_class).with_preload(preload);
            let bolt = calculate(table, &input)?;
            let torque = dm.map(|dm| bolt.torque(dm, mu));

            if json {
                print_json(&bolt, torque);
            } else {
                print_report(&bolt, dm, mu, torque);
            }
        }
        Command::List { prefix } => {
            let rows = table.search(prefix.as_deref().unwrap_or(""));
            for row in rows {
                println!("{}", row);
            }
        }
    }
    Ok(())
}

fn print_json(bolt: &Bolt, torque_kn_mm: Option<f64>) {
    let Ok(mut value) = serde_json::to_value(bolt) else { return };
    if let (Some(t), Some(obj)) = (torque_kn_mm, value.as_object_mut()) {
        obj.insert("torque_kn_mm".to_string(), serde_json::Value::from(t));
    }
    if let Ok(json) = serde_json::to_string_pretty(&value) {
        println!("{}", json);
    }
}

fn print_report(bolt: &Bolt, dm: Option<f64>, mu: f64, torque_kn_mm: Option<f64>) {
    println!("═══════════════════════════════════════");
    println!("  BOLT {} - CLASS {}", bolt.designation, bolt.strength_class);
    println!("═══════════════════════════════════════");
    println!();
    println!("Thread:");
    println!("  P  = {} mm", bolt.pitch_mm);
    println!("  d  = {} mm", bolt.d_mm);
    println!("  d2 = {} mm", bolt.d2_mm);
    println!("  d1 = {} mm", bolt.d1_mm);
    println!("  d3 = {} mm", bolt.d3_mm);
    println!("  A  = {} mm²", bolt.area_mm2);
    println!();
    println!("Material:");
    println!("  Re = {} MPa", bolt.re_mpa);
    println!("  Rm = {} MPa", bolt.rm_mpa);
    println!();
    println!("Preload:");
    println!("  {:.2} x Re  ->  Fi = {:.2} kN", bolt.preload, bolt.fi_kn);

    if let (Some(dm), Some(t)) = (dm, torque_kn_mm) {
        println!();
        println!("Tightening torque (dm = {} mm, mu = {}):", dm, mu);
        println!("  T  = {:.2} kN·mm (= N·m)", t);
    }
    println!("═══════════════════════════════════════");
}
