use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sounding-processor")]
#[command(about = "Atmospheric sounding data processor with quality screening")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        default_value = "data",
        help = "Directory holding screening rule files"
    )]
    pub data_dir: PathBuf,

    #[arg(
        long,
        global = true,
        default_value = "export",
        help = "Directory for intermediate product artifacts"
    )]
    pub export_dir: PathBuf,

    #[arg(
        long,
        global = true,
        default_value = "output",
        help = "Directory for screened artifacts"
    )]
    pub output_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract ground-based radiometer retrievals into a product artifact
    Radiometer {
        #[arg(short, long, help = "Root directory of the radiometer file tree")]
        root: PathBuf,

        #[arg(
            long,
            default_value = "false",
            help = "Scan and report without writing artifacts"
        )]
        validate_only: bool,
    },

    /// Extract satellite limb-sounder samples into a product artifact
    Satellite {
        #[arg(short, long, help = "Root directory of the swath file tree")]
        root: PathBuf,

        #[arg(short, long, help = "Satellite product tag (temperature, o3)")]
        product: String,

        #[arg(
            long,
            default_value = "300",
            help = "Acceptance radius around the reference site in km"
        )]
        radius: u32,

        #[arg(long, default_value = "false")]
        validate_only: bool,
    },

    /// Apply a product's screening rules to a persisted dataset
    Screen {
        #[arg(
            short,
            long,
            help = "Product artifact name in the export directory (e.g. temperature_300km)"
        )]
        dataset: String,

        #[arg(short, long, help = "Filename stem of the screened artifact")]
        filename: String,

        #[arg(
            long,
            default_value = "false",
            help = "Restrict to the campaign winter window"
        )]
        winter: bool,
    },

    /// Write the reference date range artifact for the aligner
    Daterange {
        #[arg(long, help = "First campaign date (YYYY-MM-DD)")]
        start: String,

        #[arg(long, help = "Last campaign date (YYYY-MM-DD)")]
        end: String,
    },
}
