use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use figshot::model::Layout;
use figshot::{driver, export, RasterOptions, ResourceMode, Resources};

#[derive(Parser)]
#[command(name = "figshot", version, about = "Render layout documents to PNG, SVG, or HTML")]
struct Cli {
    /// Render engine to drive ("argon" or "neon")
    #[arg(long, global = true, default_value = driver::DEFAULT_ENGINE)]
    engine: String,

    /// Device pixel ratio for the created driver
    #[arg(long, global = true)]
    device_pixel_ratio: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rasterize a layout document to a PNG file
    Png {
        /// Layout document (JSON)
        input: PathBuf,
        /// Output file
        #[arg(short, long, default_value = "out.png")]
        output: PathBuf,
        /// Capture scale factor (must not exceed the device pixel ratio)
        #[arg(long)]
        scale: Option<f64>,
        /// Capture width override (plot roots only)
        #[arg(long)]
        width: Option<u32>,
        /// Capture height override (plot roots only)
        #[arg(long)]
        height: Option<u32>,
    },
    /// Serialize a layout document to SVG
    Svg {
        /// Layout document (JSON)
        input: PathBuf,
        /// Output file (per-plot exports add numbered siblings)
        #[arg(short, long, default_value = "out.svg")]
        output: PathBuf,
        /// Write one file per vector plot instead of one composite document
        #[arg(long)]
        each: bool,
    },
    /// Write a standalone HTML snapshot of a layout document
    Html {
        /// Layout document (JSON)
        input: PathBuf,
        /// Output file
        #[arg(short, long, default_value = "out.html")]
        output: PathBuf,
        /// Snapshot width override (plot roots only)
        #[arg(long)]
        width: Option<u32>,
        /// Snapshot height override (plot roots only)
        #[arg(long)]
        height: Option<u32>,
        /// Reference viewer assets by name instead of inlining them
        #[arg(long)]
        linked: bool,
        /// Embed unminified viewer assets
        #[arg(long)]
        unminified: bool,
    },
}

fn load_layout(path: &PathBuf) -> anyhow::Result<Layout> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let layout = serde_json::from_str(&text)
        .with_context(|| format!("parsing layout document {}", path.display()))?;
    Ok(layout)
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new().env().init()?;
    let cli = Cli::parse();

    match cli.command {
        Command::Png { input, output, scale, width, height } => {
            let layout = load_layout(&input)?;
            let mut driver = driver::create(&cli.engine, cli.device_pixel_ratio)?;
            let options = RasterOptions {
                scale_factor: scale,
                width,
                height,
                ..Default::default()
            };
            // terminate the driver even when the export fails
            let result = export::save_png(&layout, driver.as_mut(), &options, &output);
            driver::terminate(driver)?;
            println!("wrote {}", result?.display());
        }
        Command::Svg { input, output, each } => {
            let layout = load_layout(&input)?;
            let mut driver = driver::create(&cli.engine, cli.device_pixel_ratio)?;
            let result = if each {
                export::save_svgs(&layout, driver.as_mut(), &output)
            } else {
                export::save_svg(&layout, driver.as_mut(), &output)
            };
            driver::terminate(driver)?;
            for path in result? {
                println!("wrote {}", path.display());
            }
        }
        Command::Html { input, output, width, height, linked, unminified } => {
            let layout = load_layout(&input)?;
            let resources = Resources {
                mode: if linked { ResourceMode::Linked } else { ResourceMode::Inline },
                minified: !unminified,
            };
            let html = export::snapshot_html(&layout, &resources, height, width)?;
            fs::write(&output, html).with_context(|| format!("writing {}", output.display()))?;
            println!("wrote {}", output.display());
        }
    }

    Ok(())
}
