//! opticorr command-line interface.
//!
//! Correct measured R/T spectra for the substrate backside from TOML job
//! files:
//! ```sh
//! opticorr correct job.toml
//! opticorr validate job.toml
//! opticorr materials --database ./db
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use opticorr_materials::provider::SubstrateOptics;
use opticorr_materials::store::MaterialStore;

#[derive(Parser)]
#[command(name = "opticorr")]
#[command(about = "Backside correction for thin-sample R/T spectra")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a correction job from a TOML configuration file.
    Correct {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without running the correction.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// List the available substrate dispersion tables.
    Materials {
        /// Database directory of `<name>_nk.txt` tables.
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Correct { config, output } => {
            println!("opticorr backside correction");
            println!("============================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());
            println!(
                "Substrate: {} ({} thick, ambient n = {}, {} deg)",
                job.correction.substrate,
                job.correction.thickness,
                job.correction.ambient_index,
                job.correction.incidence_angle_deg
            );

            let result = runner::run_correction(&job)?;

            let path = runner::output_path(&job, output.as_deref());
            runner::write_corrected(&result, &path)?;

            if job.output.save_json {
                let json_path = path.with_extension("json");
                runner::write_corrected_json(&result, &json_path)?;
            }

            println!("Correction complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let _job = config::load_config(&config)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Materials { database } => {
            let glass = opticorr_materials::b270::b270();
            let (lo, hi) = glass.wavelength_range();
            println!("Embedded substrates:");
            println!("  B270 — crown glass, {lo:.0}-{hi:.0} nm");

            if let Some(dir) = database {
                let store = MaterialStore::open(&dir);
                let names = store.available()?;
                println!();
                println!("Database '{}':", dir.display());
                if names.is_empty() {
                    println!("  (no *_nk.txt tables found)");
                }
                for name in names {
                    println!("  {name}");
                }
            }
            Ok(())
        }
    }
}
