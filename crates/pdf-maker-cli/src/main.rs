use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::{Path, PathBuf};

mod logger;

#[derive(Parser)]
#[command(name = "pdfmk", about = "Combine images into a PDF", version)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one PDF page per image, in the order given
    Convert {
        /// Input images
        #[arg(required = true, num_args = 1..)]
        images: Vec<PathBuf>,

        /// Output PDF file (defaults to converted.pdf in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Fail if any input is not a readable image instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Write the effective settings to this JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,
    },

    /// Print where each image would be placed without writing a PDF
    Plan {
        /// Input images
        #[arg(required = true, num_args = 1..)]
        images: Vec<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Load settings from a JSON file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output page size
    #[arg(long, value_enum)]
    page_size: Option<PageSizeArg>,

    /// Output orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Margin around each image
    #[arg(long, value_enum)]
    margin: Option<MarginArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PageSizeArg {
    A4,
    Letter,
    /// Stretch each image over the whole page
    Fit,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

#[derive(Clone, Copy, ValueEnum)]
enum MarginArg {
    None,
    Small,
}

impl From<PageSizeArg> for pdf_maker::PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::A4 => Self::A4,
            PageSizeArg::Letter => Self::Letter,
            PageSizeArg::Fit => Self::FitToImage,
        }
    }
}

impl From<OrientationArg> for pdf_maker::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

impl From<MarginArg> for pdf_maker::MarginMode {
    fn from(arg: MarginArg) -> Self {
        match arg {
            MarginArg::None => Self::None,
            MarginArg::Small => Self::Small,
        }
    }
}

impl LayoutArgs {
    async fn resolve(&self) -> Result<pdf_maker::LayoutSettings> {
        let mut settings = match &self.config {
            Some(path) => pdf_maker::LayoutSettings::load(path).await?,
            None => pdf_maker::LayoutSettings::default(),
        };
        if let Some(page_size) = self.page_size {
            settings.page_size = page_size.into();
        }
        if let Some(orientation) = self.orientation {
            settings.orientation = orientation.into();
        }
        if let Some(margin) = self.margin {
            settings.margin = margin.into();
        }
        Ok(settings)
    }
}

/// Split an output path into its directory and file name
fn split_output(output: &Path) -> Result<(PathBuf, String)> {
    let Some(name) = output.file_name() else {
        bail!("Output path {} has no file name", output.display());
    };
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_owned(),
        _ => PathBuf::from("."),
    };
    Ok((dir, name.to_string_lossy().into_owned()))
}

async fn accept(images: &[PathBuf], strict: bool) -> Result<Vec<pdf_maker::ImageSource>> {
    let report = pdf_maker::accept_images(images).await;
    if strict && !report.rejected.is_empty() {
        let (path, e) = &report.rejected[0];
        bail!(
            "{} of {} input(s) rejected, first: {}: {}",
            report.rejected.len(),
            images.len(),
            path.display(),
            e
        );
    }
    Ok(report.accepted)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    logger::CliLogger::new(level).init()?;

    match cli.command {
        Commands::Convert {
            images,
            output,
            layout,
            strict,
            save_config,
        } => {
            let mut settings = layout.resolve().await?;
            let output_dir = match output {
                Some(output) => {
                    let (dir, name) = split_output(&output)?;
                    settings.output_name = name;
                    dir
                }
                None => PathBuf::from("."),
            };
            settings.validate()?;

            if let Some(path) = save_config {
                settings.save(&path).await?;
                log::info!("Settings written to {}", path.display());
            }

            let sources = accept(&images, strict).await?;
            if sources.is_empty() {
                bail!("None of the {} input(s) is a usable image", images.len());
            }

            match pdf_maker::compose(&sources, &settings, &output_dir).await? {
                pdf_maker::ComposeOutcome::Saved { path, pages } => {
                    println!("Generated {} page(s) → {}", pages, path.display());
                }
                pdf_maker::ComposeOutcome::Skipped => {
                    println!("Nothing to convert");
                }
            }
        }

        Commands::Plan { images, layout } => {
            let settings = layout.resolve().await?;
            let sources = accept(&images, false).await?;
            let composition = pdf_maker::plan(&sources, &settings);

            println!(
                "Page: {} {:?} ({:.2} x {:.2} pt), margin {:.2} pt",
                settings.page_size.name(),
                settings.orientation,
                composition.page.width,
                composition.page.height,
                settings.margin_pt()
            );
            for (index, page) in composition.pages.iter().enumerate() {
                let rect = page.placement.rect;
                println!(
                    "  {:>3}. {} ({}x{} px) → x={:.2} y={:.2} w={:.2} h={:.2}",
                    index + 1,
                    page.image.path().display(),
                    page.image.width(),
                    page.image.height(),
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height
                );
            }
        }
    }

    Ok(())
}
