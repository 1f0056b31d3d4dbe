/// Clip review command-line front end
use clap::{Args, Parser, Subcommand};
use review_cli::{commands, CliConfig, OptionOverrides};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "review-cli")]
#[command(about = "Trim, clean up and normalize recorded clips", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./review.toml)
    #[arg(short, long, global = true, env = "REVIEW_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct StageFlags {
    /// Keep leading and trailing silence
    #[arg(long)]
    no_trim: bool,
    /// Skip the noise filter
    #[arg(long)]
    no_noise: bool,
    /// Skip loudness normalization
    #[arg(long)]
    no_loudness: bool,
}

impl From<StageFlags> for OptionOverrides {
    fn from(flags: StageFlags) -> Self {
        Self {
            no_trim: flags.no_trim,
            no_noise: flags.no_noise,
            no_loudness: flags.no_loudness,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print loudness and speech bounds of a file
    Analyze {
        /// Audio file
        file: PathBuf,
    },
    /// Process files and write WAV results to a directory
    Process {
        /// Audio files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
        #[command(flatten)]
        stages: StageFlags,
    },
    /// Process files and upload them to the server
    Save {
        /// Audio files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        stages: StageFlags,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "review_cli=info,review_session=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze { file } => {
            let report = commands::analyze(&file)?;
            println!("{report}");
        }
        Commands::Process { files, out, stages } => {
            let options = OptionOverrides::from(stages).apply(config.options());
            let report = commands::process(&config, &files, &out, options).await?;
            println!(
                "Wrote {} clip(s) to {}, {} failed",
                report.succeeded_count(),
                out.display(),
                report.failed_count()
            );
            for failed in &report.failed {
                println!("  {}: {}", failed.id, failed.reason);
            }
        }
        Commands::Save { files, stages } => {
            let options = OptionOverrides::from(stages).apply(config.options());
            let report = commands::save(&config, &files, options).await?;
            println!(
                "Saved {} clip(s), {} failed",
                report.succeeded_count(),
                report.failed_count()
            );
            for saved in &report.succeeded {
                println!("  {} -> {}", saved.id, saved.title);
            }
            for failed in &report.failed {
                println!("  {}: {}", failed.id, failed.reason);
            }
        }
    }

    Ok(())
}
