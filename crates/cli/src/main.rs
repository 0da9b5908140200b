mod cmd;
mod logging;

use buildenv_core::OutputFormat;
use buildenv_core::settings::{ResolvedSettings, SettingsLoader};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "buildenv",
    version,
    about = "Add and inspect build environments in multi-module pipeline configurations"
)]
struct Cli {
    /// Tool settings file (default: $XDG_CONFIG_HOME/buildenv/config.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add a build environment to the default pipeline or a profile
    #[command(subcommand)]
    Add(AddCommand),

    /// Show which build environment each module uses
    List(ListArgs),
}

#[derive(Debug, Subcommand)]
pub enum AddCommand {
    /// Build with Google Cloud Build
    #[command(name = "gcb", alias = "googleCloudBuild")]
    Gcb(GcbArgs),
}

/// Which configuration, modules and profile a command operates on.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Main configuration file
    #[arg(short = 'f', long)]
    pub filename: Option<PathBuf>,

    /// Only operate on these modules (repeatable)
    #[arg(short = 'm', long = "module")]
    pub modules: Vec<String>,

    /// Profile to operate on; omitted means the default pipeline
    #[arg(short = 'p', long)]
    pub profile: Option<String>,
}

impl TargetArgs {
    pub fn config_file(&self, settings: &ResolvedSettings) -> PathBuf {
        self.filename.clone().unwrap_or_else(|| settings.config_file.clone())
    }
}

#[derive(Debug, Args)]
pub struct GcbArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// GCP project that runs the builds
    #[arg(long)]
    pub project_id: Option<String>,

    /// Disk size of the build VM in GB
    #[arg(long)]
    pub disk_size_gb: Option<i64>,

    /// Machine type of the build VM
    #[arg(long)]
    pub machine_type: Option<String>,

    /// Build timeout, e.g. "600s"
    #[arg(long)]
    pub timeout: Option<String>,

    /// Maximum number of concurrent builds (0 means no limit)
    #[arg(long)]
    pub concurrency: Option<u32>,

    /// Format of error records printed on stdout
    #[arg(long, value_enum)]
    pub format: Option<RecordFormat>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RecordFormat {
    Json,
    Text,
}

impl From<RecordFormat> for OutputFormat {
    fn from(f: RecordFormat) -> Self {
        match f {
            RecordFormat::Json => OutputFormat::Json,
            RecordFormat::Text => OutputFormat::Text,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Table,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let settings = match SettingsLoader::load(cli.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {e}");
            std::process::exit(1);
        }
    };
    logging::init(&settings);

    match cli.command {
        Commands::Add(AddCommand::Gcb(args)) => cmd::add::run_gcb(&settings, args),
        Commands::List(args) => cmd::list::run(&settings, args),
    }
}
