// Crop advisory command line
//
// Purpose: Score a crop for a state and print the advisory report
// Usage: cargo run --bin advise -- --crop Rice --region Kerala --lang hi

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use crop_advisor_rust::advice::render_report;
use crop_advisor_rust::config::load_scoring_params;
use crop_advisor_rust::{
    logging, AdvisorConfig, AdvisoryRequest, CropAdvisor, InputOverrides, Language, ReferenceData,
};

/// Crop suitability advisor
#[derive(Parser)]
#[command(name = "advise")]
#[command(about = "Score crop suitability for an Indian state and print advice")]
struct Cli {
    /// Directory holding the reference data files [default: $DATA_DIR or "data"]
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output language, code or name [default: $ADVISOR_LANG or English]
    #[arg(long)]
    lang: Option<String>,

    /// Crop name as listed by --list
    #[arg(long)]
    crop: Option<String>,

    /// State name
    #[arg(long)]
    region: Option<String>,

    /// Soil nitrogen override (kg/ha)
    #[arg(long)]
    nitrogen: Option<f64>,

    /// Soil phosphorus override (kg/ha)
    #[arg(long)]
    phosphorus: Option<f64>,

    /// Soil potassium override (kg/ha)
    #[arg(long)]
    potassium: Option<f64>,

    /// Seasonal average temperature override (°C)
    #[arg(long)]
    temperature: Option<f64>,

    /// Annual rainfall override (mm)
    #[arg(long)]
    rainfall: Option<f64>,

    /// List crops and eligible regions, then exit
    #[arg(long)]
    list: bool,

    /// Print the advisory as JSON
    #[arg(long)]
    json: bool,

    /// Also print the region's agency directory
    #[arg(long)]
    agencies: bool,
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();

    // Flags win over the environment
    let mut config = AdvisorConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(lang) = &cli.lang {
        config.language = lang.parse::<Language>()?;
    }

    tracing::info!("DATA_DIR: {:?}", config.data_dir);
    tracing::info!("Language: {}", config.language);
    let paths = config.paths();
    let data = ReferenceData::load(&paths)?;
    let params = load_scoring_params(&paths.scoring_params)?;
    let advisor = CropAdvisor::new(&data, params);

    if cli.list {
        println!("Crops:");
        for (crop, label) in advisor.crop_labels(config.language) {
            if crop == label {
                println!("  {}", crop);
            } else {
                println!("  {} ({})", crop, label);
            }
        }
        println!("Regions:");
        for region in advisor.eligible_regions() {
            println!("  {}", region);
        }
        return Ok(());
    }

    let (Some(crop), Some(region)) = (cli.crop, cli.region) else {
        bail!("--crop and --region are required (see --list)");
    };

    let request = AdvisoryRequest::new(crop, region).with_overrides(InputOverrides {
        nitrogen: cli.nitrogen,
        phosphorus: cli.phosphorus,
        potassium: cli.potassium,
        temperature: cli.temperature,
        rainfall: cli.rainfall,
    });

    let advisory = advisor.advise(&request)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&advisory).context("Failed to serialize advisory")?;
        println!("{}", json);
    } else {
        println!("{}", render_report(&advisory, config.language, data.lang_pack()));
    }

    if cli.agencies {
        let agencies = advisor.agencies(&advisory.region)?;
        println!();
        if agencies.height() == 0 {
            println!("No agencies listed for {}", advisory.region);
        } else {
            println!("{}", agencies);
        }
    }

    Ok(())
}
