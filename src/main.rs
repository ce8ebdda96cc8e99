use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use steglsb::capacity::{max_payload_len, total_channels};
use steglsb::{Carrier, LsbStego, OutputFormat, PixelGrid};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zeroize::Zeroizing;

/// steglsb - hide data in the least-significant bits of an image
///
/// The passphrase decides which color channels carry the hidden bits. It is
/// prompted for on the terminal, or read from STEGLSB_PASSPHRASE when set.
#[derive(Parser)]
#[command(name = "steglsb")]
#[command(version)]
#[command(about = "Save data in the LSB-bits of an image", long_about = None)]
struct Cli {
    /// Passphrase, taken from STEGLSB_PASSPHRASE only
    #[arg(long, global = true, env = "STEGLSB_PASSPHRASE", hide = true)]
    passphrase: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed the data in a cover image
    Embed {
        /// Cover image
        cover: PathBuf,

        /// File with the secret data
        data: PathBuf,

        /// Output image (.png, .bmp, .tif or .tiff)
        output: PathBuf,
    },
    /// Extract the data from an image
    Extract {
        /// Image with secret data
        image: PathBuf,

        /// Output file for the recovered data
        output: PathBuf,
    },
    /// Show image capacity information
    Info {
        /// Image file path
        image: PathBuf,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "steglsb=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Take the passphrase from the environment, or prompt for it without echo.
fn read_passphrase(given: Option<String>) -> anyhow::Result<Zeroizing<String>> {
    match given {
        Some(passphrase) => Ok(Zeroizing::new(passphrase)),
        None => {
            let passphrase = rpassword::prompt_password("Passphrase: ")
                .context("failed to read passphrase")?;
            Ok(Zeroizing::new(passphrase))
        }
    }
}

fn open_carrier(path: &Path) -> anyhow::Result<Carrier> {
    println!("[*] Loading image: {}", path.display());
    let carrier = Carrier::open(path)
        .with_context(|| format!("cannot decode image {}", path.display()))?;
    let (width, height) = carrier.dimensions();
    println!("[✓] Image loaded: {}x{}", width, height);
    Ok(carrier)
}

fn run_embed(
    cover: &Path,
    data: &Path,
    output: &Path,
    passphrase: Option<String>,
) -> anyhow::Result<()> {
    // Validate output format before doing any work
    let format = OutputFormat::from_path(output)?;

    let mut carrier = open_carrier(cover)?;
    let payload = fs::read(data).with_context(|| format!("cannot read {}", data.display()))?;

    let (width, height) = carrier.dimensions();
    println!(
        "[*] Payload size: {} bytes, image capacity: {} bytes",
        payload.len(),
        max_payload_len(width, height)
    );

    let passphrase = read_passphrase(passphrase)?;
    let stego = LsbStego::from_passphrase(&passphrase);

    println!("[*] Embedding payload...");
    let report = stego.embed_in_place(&mut carrier, &payload)?;
    tracing::info!(
        bits_written = report.bits_written,
        channels_changed = report.channels_changed,
        "embed finished"
    );

    println!("[*] Saving stego image to: {}", output.display());
    carrier
        .save(output, format)
        .with_context(|| format!("cannot write {}", output.display()))?;

    println!("[✓] Success! Payload embedded.");
    Ok(())
}

fn run_extract(image: &Path, output: &Path, passphrase: Option<String>) -> anyhow::Result<()> {
    let carrier = open_carrier(image)?;

    let passphrase = read_passphrase(passphrase)?;
    let stego = LsbStego::from_passphrase(&passphrase);

    println!("[*] Extracting hidden payload...");
    let payload = stego.extract_from(&carrier)?;
    println!("[✓] {} bytes extracted", payload.len());

    fs::write(output, &payload).with_context(|| format!("cannot write {}", output.display()))?;
    println!("[✓] Payload saved to: {}", output.display());
    Ok(())
}

fn run_info(image: &Path) -> anyhow::Result<()> {
    let carrier = open_carrier(image)?;
    let (width, height) = carrier.dimensions();
    let capacity = max_payload_len(width, height);

    println!("Dimensions: {}x{}", width, height);
    println!("Channels:   {}", total_channels(width, height));
    println!("Capacity:   {} bytes ({} KB)", capacity, capacity / 1024);
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Embed { cover, data, output } => run_embed(&cover, &data, &output, cli.passphrase),
        Commands::Extract { image, output } => run_extract(&image, &output, cli.passphrase),
        Commands::Info { image } => run_info(&image),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[✗] {:#}", err);
            ExitCode::FAILURE
        }
    }
}
