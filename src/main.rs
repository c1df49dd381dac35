use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pixelpal::api;
use pixelpal::assets::AssetLoader;
use pixelpal::models::AppConfig;
use pixelpal::palette_import;
use pixelpal::server;
use pixelpal::services::{PixelArtService, ProcessOptions};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Parser)]
#[command(name = "pixelpal")]
#[command(about = "Pixelpal - turn photos into fixed-palette pixel art")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert an image file to pixel art
    Render {
        /// Input image (PNG, JPEG, WebP or GIF)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Grid size in art pixels, 1..=server.max_pixel_size (default from config)
        #[arg(short, long)]
        pixel_size: Option<u32>,

        /// Resampling filter: nearest, box, bilinear, hamming, bicubic, lanczos
        #[arg(short, long)]
        filter: Option<String>,

        /// Pad the input to a square before processing
        #[arg(long)]
        pad: bool,

        /// Print the colors used by the result
        #[arg(long)]
        list_colors: bool,
    },
    /// Palette maintenance
    Palette {
        #[command(subcommand)]
        command: PaletteCommands,
    },
    /// Write the embedded config.yaml to the filesystem for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum PaletteCommands {
    /// Convert a CSV export with r,g,b columns into a YAML palette block
    Import {
        /// CSV file
        file: PathBuf,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pixelpal API",
        description = "Turn photos into fixed-palette pixel art",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_process, api::handle_palette),
    components(schemas(
        api::ProcessResponse,
        api::ColorInfo,
        api::GridPosition,
        api::PaletteResponse,
    )),
    tags((name = "Processing", description = "Pixel art conversion and palette lookup"))
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            pixel_size,
            filter,
            pad,
            list_colors,
        }) => {
            init_cli_logging();
            let options = ProcessOptions {
                pixel_size,
                filter,
                pad_to_square: pad.then_some(true),
            };
            run_render_command(&input, &output, options, list_colors)
        }
        Some(Commands::Palette {
            command: PaletteCommands::Import { file },
        }) => {
            init_cli_logging();
            run_palette_import_command(&file)
        }
        Some(Commands::Init { force }) => run_init_command(force),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelpal=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Run the pipeline on a file (no server needed)
fn run_render_command(
    input: &Path,
    output: &Path,
    options: ProcessOptions,
    list_colors: bool,
) -> anyhow::Result<()> {
    let loader = AssetLoader::from_env();
    let config = AppConfig::load_from_assets(&loader)?;
    if let Some(size) = options.pixel_size {
        config
            .server
            .check_pixel_size(size)
            .map_err(anyhow::Error::msg)?;
    }
    let service = PixelArtService::from_config(&config)?;

    let bytes = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let result = service.process_sync(&bytes, &options)?;

    std::fs::write(output, &result.png)?;
    println!(
        "Rendered {} ({}x{}, {} colors, {} bytes)",
        output.display(),
        result.width,
        result.height,
        result.colors.len(),
        result.png.len()
    );

    if list_colors {
        println!("\nColors used:");
        for color in &result.colors {
            println!(
                "  {}  H:{} S:{} V:{}",
                color.hex, color.grid.hue, color.grid.saturation, color.grid.value
            );
        }
    }

    Ok(())
}

/// Print a YAML palette block built from a CSV export
fn run_palette_import_command(file: &Path) -> anyhow::Result<()> {
    let colors = palette_import::import_palette_file(file)?;
    if colors.is_empty() {
        anyhow::bail!("No colors found in {}", file.display());
    }
    eprintln!("Imported {} colors from {}", colors.len(), file.display());
    print!("{}", palette_import::palette_yaml(&colors));
    Ok(())
}

/// Extract the embedded config to the filesystem
fn run_init_command(force: bool) -> anyhow::Result<()> {
    let report = AssetLoader::from_env().init(force)?;

    for f in &report.written {
        println!("Wrote {f}");
    }
    for f in &report.skipped {
        println!("Skipped existing {f} (use --force to overwrite)");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Pixelpal v{VERSION}");
    println!("Photo to fixed-palette pixel art converter\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.unwrap_or_else(|| format!("{DEFAULT_BIND_ADDR} (default)"))
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.clone(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("\nConfig:  {config_source}");

    match AppConfig::load_from_assets(&AssetLoader::from_env()) {
        Ok(config) => {
            println!("Palette: {} colors", config.palette.len());
            println!(
                "Recipe:  {}px grid, {} filter, {}px output",
                config.pipeline.pixel_size, config.pipeline.filter, config.pipeline.output_size
            );
        }
        Err(e) => println!("Palette: unavailable ({e})"),
    }

    println!("\nCommands:");
    println!("  pixelpal serve            Start the HTTP server");
    println!("  pixelpal render           Convert an image file to pixel art");
    println!("  pixelpal palette import   Convert a CSV palette to YAML");
    println!("  pixelpal init             Write the embedded config.yaml");
    println!("\nRun 'pixelpal --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelpal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(
        config = ?asset_loader
            .config_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "Config source"
    );

    if let Err(e) = asset_loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config file");
    }

    let state = server::create_app_state(asset_loader)?;

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Pixelpal server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
