//! Command-line STAC generation for NOAA Climate Data Records.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use noaa_cdr::{ocean_heat_content, sea_ice_concentration, CreateItemOptions};

#[derive(Parser, Debug)]
#[command(name = "noaa-cdr")]
#[command(about = "Create STAC metadata for NOAA Climate Data Records")]
struct Args {
    /// Log level
    #[arg(long, env = "CDR_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// The Global Ocean Heat Content CDR
    OceanHeatContent {
        #[command(subcommand)]
        command: OceanHeatContentCommand,
    },
    /// The NOAA/NSIDC Sea Ice Concentration CDR
    SeaIceConcentration {
        #[command(subcommand)]
        command: SeaIceConcentrationCommand,
    },
}

#[derive(Subcommand, Debug)]
enum OceanHeatContentCommand {
    /// Write the collection JSON
    CreateCollection {
        /// Output file
        outfile: PathBuf,
    },
    /// Convert NetCDF files to COGs and write one item JSON per record window
    CreateItems {
        /// Source NetCDF hrefs
        #[arg(required = true)]
        hrefs: Vec<String>,

        /// Directory for COGs and item JSON files
        #[arg(long, default_value = ".")]
        outdir: PathBuf,

        /// Href of an already-produced COG to reuse, repeatable
        #[arg(long = "cog-href")]
        cog_hrefs: Vec<String>,

        /// Only write the item with the latest start datetime
        #[arg(long)]
        latest_only: bool,
    },
    /// Convert one NetCDF file's time slices to COGs
    Cogify {
        /// Source NetCDF href
        href: String,

        /// Output directory
        #[arg(long)]
        outdir: Option<PathBuf>,

        /// Href of an already-produced COG to reuse, repeatable
        #[arg(long = "cog-href")]
        cog_hrefs: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum SeaIceConcentrationCommand {
    /// Write the collection JSON
    CreateCollection {
        /// Output file
        outfile: PathBuf,
    },
    /// Create an item for one NetCDF file, converting its variables to COGs
    CreateItem {
        /// Source NetCDF href
        href: String,

        /// Directory for COGs and the item JSON file
        #[arg(long, default_value = ".")]
        outdir: PathBuf,

        /// Decode the time variable instead of trusting coverage attributes
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        decode_times: bool,

        /// Href of an already-produced COG to reuse, repeatable
        #[arg(long = "cog-href")]
        cog_hrefs: Vec<String>,

        /// Skip COG conversion
        #[arg(long)]
        no_cogs: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::OceanHeatContent { command } => ocean_heat_content_command(command),
        Command::SeaIceConcentration { command } => sea_ice_concentration_command(command),
    }
}

fn ocean_heat_content_command(command: OceanHeatContentCommand) -> Result<()> {
    match command {
        OceanHeatContentCommand::CreateCollection { outfile } => {
            let collection = ocean_heat_content::create_collection();
            collection.write_json(&outfile)?;
            info!(path = %outfile.display(), "Wrote collection");
        }
        OceanHeatContentCommand::CreateItems {
            hrefs,
            outdir,
            cog_hrefs,
            latest_only,
        } => {
            std::fs::create_dir_all(&outdir)?;
            let options = ocean_heat_content::CreateItemsOptions {
                cog_hrefs,
                latest_only,
                read_href_modifier: None,
            };
            let items = ocean_heat_content::create_items(&hrefs, &outdir, &options)?;
            for item in &items {
                item.write_json(outdir.join(format!("{}.json", item.id)))?;
            }
            info!(count = items.len(), outdir = %outdir.display(), "Wrote items");
        }
        OceanHeatContentCommand::Cogify {
            href,
            outdir,
            cog_hrefs,
        } => {
            if let Some(outdir) = &outdir {
                std::fs::create_dir_all(outdir)?;
            }
            let cogs = ocean_heat_content::cogify(&href, outdir.as_deref(), &cog_hrefs, None)?;
            info!(count = cogs.len(), "Wrote COGs");
        }
    }
    Ok(())
}

fn sea_ice_concentration_command(command: SeaIceConcentrationCommand) -> Result<()> {
    match command {
        SeaIceConcentrationCommand::CreateCollection { outfile } => {
            let collection = sea_ice_concentration::create_collection();
            collection.write_json(&outfile)?;
            info!(path = %outfile.display(), "Wrote collection");
        }
        SeaIceConcentrationCommand::CreateItem {
            href,
            outdir,
            decode_times,
            cog_hrefs,
            no_cogs,
        } => {
            std::fs::create_dir_all(&outdir)?;
            let options = CreateItemOptions {
                decode_times,
                ..Default::default()
            };
            let mut item = sea_ice_concentration::create_item(&href, &options)?;
            if !no_cogs {
                sea_ice_concentration::cogify(&mut item, &href, &outdir, &cog_hrefs, None)?;
            }
            let path = outdir.join(format!("{}.json", item.id));
            item.write_json(&path)?;
            info!(path = %path.display(), "Wrote item");
        }
    }
    Ok(())
}
