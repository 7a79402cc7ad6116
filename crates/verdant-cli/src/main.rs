use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use verdant_cli::{parse_region, parse_roi_mode, parse_size, build_options, OptionOverrides};
use verdant_core::config::{log_config_usage, set_verbose};

mod commands;

#[derive(Parser)]
#[command(name = "verdant")]
#[command(version, about = "Plant tray green-pixel analyzer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one region of a tray image
    Analyze {
        /// Input image file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Region to analyze, in source coordinates (x,y,width,height).
        /// Omit to analyze the whole image.
        #[arg(long, value_name = "X,Y,W,H")]
        region: Option<String>,

        /// Interpret --region in display coordinates for a WIDTHxHEIGHT
        /// display and rescale to source coordinates
        #[arg(long, value_name = "WxH")]
        display_size: Option<String>,

        /// Value-channel threshold (dark-object polarity)
        #[arg(long, value_name = "N")]
        threshold: Option<u8>,

        /// Minimum connected-region size kept in the mask, in pixels
        #[arg(long, value_name = "N")]
        fill_min_size: Option<u32>,

        /// Region-of-interest size, centered in the crop
        #[arg(long, value_name = "WxH")]
        roi_size: Option<String>,

        /// ROI filter mode: "partial" (default) or "cutto"
        #[arg(long, value_name = "MODE")]
        roi_mode: Option<String>,

        /// Append the result to a CSV file
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,

        /// Save the masked crop (background painted white) as an image
        #[arg(long, value_name = "FILE")]
        save_masked: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Print progress and config diagnostics
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze every supported image in a directory
    Batch {
        /// Directory of tray images
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Region to analyze in every image, in source coordinates.
        /// Omit to analyze whole images.
        #[arg(long, value_name = "X,Y,W,H")]
        region: Option<String>,

        /// Interpret --region in display coordinates for a WIDTHxHEIGHT display
        #[arg(long, value_name = "WxH")]
        display_size: Option<String>,

        /// Value-channel threshold (dark-object polarity)
        #[arg(long, value_name = "N")]
        threshold: Option<u8>,

        /// Minimum connected-region size kept in the mask, in pixels
        #[arg(long, value_name = "N")]
        fill_min_size: Option<u32>,

        /// Region-of-interest size, centered in the crop
        #[arg(long, value_name = "WxH")]
        roi_size: Option<String>,

        /// ROI filter mode: "partial" (default) or "cutto"
        #[arg(long, value_name = "MODE")]
        roi_mode: Option<String>,

        /// CSV file the results are written to
        #[arg(long, value_name = "FILE", default_value = "results.csv")]
        csv: PathBuf,

        /// Print progress and config diagnostics
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write a starter configuration file
    Init {
        /// Where to write the config
        #[arg(long, value_name = "FILE", default_value = "verdant.yml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            region,
            display_size,
            threshold,
            fill_min_size,
            roi_size,
            roi_mode,
            csv,
            save_masked,
            json,
            verbose,
        } => {
            set_verbose(verbose);
            log_config_usage();
            run_analyze(
                input,
                region,
                display_size,
                threshold,
                fill_min_size,
                roi_size,
                roi_mode,
                csv,
                save_masked,
                json,
            )
        }
        Commands::Batch {
            dir,
            region,
            display_size,
            threshold,
            fill_min_size,
            roi_size,
            roi_mode,
            csv,
            verbose,
        } => {
            set_verbose(verbose);
            log_config_usage();
            run_batch(
                dir,
                region,
                display_size,
                threshold,
                fill_min_size,
                roi_size,
                roi_mode,
                csv,
            )
        }
        Commands::Init { path, force } => commands::cmd_init(&path, force),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_analyze(
    input: PathBuf,
    region: Option<String>,
    display_size: Option<String>,
    threshold: Option<u8>,
    fill_min_size: Option<u32>,
    roi_size: Option<String>,
    roi_mode: Option<String>,
    csv: Option<PathBuf>,
    save_masked: Option<PathBuf>,
    json: bool,
) -> Result<(), String> {
    let region = region.as_deref().map(parse_region).transpose()?;
    let display_size = display_size.as_deref().map(parse_size).transpose()?;
    let options = build_options(&OptionOverrides {
        threshold,
        fill_min_size,
        roi_size: roi_size.as_deref().map(parse_size).transpose()?,
        roi_mode: roi_mode.as_deref().map(parse_roi_mode).transpose()?,
    });

    commands::cmd_analyze(
        &input,
        region,
        display_size,
        &options,
        csv.as_ref(),
        save_masked.as_ref(),
        json,
    )
}

#[allow(clippy::too_many_arguments)]
fn run_batch(
    dir: PathBuf,
    region: Option<String>,
    display_size: Option<String>,
    threshold: Option<u8>,
    fill_min_size: Option<u32>,
    roi_size: Option<String>,
    roi_mode: Option<String>,
    csv: PathBuf,
) -> Result<(), String> {
    let region = region.as_deref().map(parse_region).transpose()?;
    let display_size = display_size.as_deref().map(parse_size).transpose()?;
    let options = build_options(&OptionOverrides {
        threshold,
        fill_min_size,
        roi_size: roi_size.as_deref().map(parse_size).transpose()?,
        roi_mode: roi_mode.as_deref().map(parse_roi_mode).transpose()?,
    });

    commands::cmd_batch(&dir, region, display_size, &options, &csv)
}
