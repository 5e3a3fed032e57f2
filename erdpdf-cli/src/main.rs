use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use erdpdf::erd::glamcart;
use erdpdf::{plan_pages, Diagram, ErdSession, ExportConfig, ReportContent};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "erdpdf",
    about = "Render an entity-relationship diagram and export it as PDF documentation",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the diagram and write the documentation PDF
    Export {
        /// Directory the PDF is written into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Override the PDF file name
        #[arg(long)]
        file_name: Option<String>,

        /// Diagram JSON (defaults to the built-in GlamCart diagram)
        #[arg(long)]
        diagram: Option<PathBuf>,

        /// Report text JSON (defaults to the GlamCart descriptions)
        #[arg(long)]
        content: Option<PathBuf>,

        /// Export settings JSON
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also save the rendered diagram as a PNG
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// Show how an image of the given height is split across pages
    Plan {
        /// Scaled image height in mm
        #[arg(long)]
        image_height: f64,

        /// Page height in mm
        #[arg(long, default_value_t = 297.0)]
        page_height: f64,

        /// Top margin on the first page in mm
        #[arg(long, default_value_t = 5.0)]
        top_margin: f64,

        /// Print the placements as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the built-in GlamCart diagram as JSON
    DumpDiagram,

    /// Print the built-in GlamCart report text as JSON
    DumpContent,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            output,
            file_name,
            diagram,
            content,
            config,
            png,
        } => {
            let diagram = match diagram {
                Some(path) => Diagram::from_json(&read_input(&path)?)
                    .with_context(|| format!("Invalid diagram in {}", path.display()))?,
                None => glamcart::diagram(),
            };
            let content = match content {
                Some(path) => ReportContent::from_json(&read_input(&path)?)
                    .with_context(|| format!("Invalid report content in {}", path.display()))?,
                None => ReportContent::glamcart(),
            };
            let mut config = match config {
                Some(path) => ExportConfig::from_json(&read_input(&path)?)
                    .with_context(|| format!("Invalid export config in {}", path.display()))?,
                None => ExportConfig::default(),
            };
            if let Some(name) = file_name {
                config.file_name = name;
            }

            let mut session = ErdSession::new(diagram, content, config);
            let bitmap = session.generate().context("Failed to render diagram")?;
            if let Some(png) = png {
                bitmap
                    .save_png(&png)
                    .with_context(|| format!("Failed to write {}", png.display()))?;
                println!("Diagram image saved to {}", png.display());
            }

            fs::create_dir_all(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            let path = session.download(&output).context("Failed to export PDF")?;
            println!("PDF saved to {}", path.display());
        }

        Commands::Plan {
            image_height,
            page_height,
            top_margin,
            json,
        } => {
            let placements = plan_pages(image_height, page_height, top_margin)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&placements)?);
            } else {
                println!("Pages: {}", placements.len());
                for placement in &placements {
                    println!(
                        "Page {}: offset {:.2} mm, slice {:.2} mm",
                        placement.page_index + 1,
                        placement.offset,
                        placement.slice_height
                    );
                }
            }
        }

        Commands::DumpDiagram => {
            println!("{}", glamcart::diagram().to_json_pretty()?);
        }

        Commands::DumpContent => {
            println!("{}", ReportContent::glamcart().to_json_pretty()?);
        }
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "erdpdf=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
