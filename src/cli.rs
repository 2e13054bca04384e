use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "composectl")]
#[command(about = "Partition, reverse and observe a compose project")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug, Default)]
pub struct ManifestArgs {
    /// Manifest file (defaults to compose.yaml in this or a parent directory)
    #[arg(short = 'f', long = "file", env = "COMPOSE_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Project name (defaults to the manifest's `name` or its directory)
    #[arg(short = 'p', long = "project-name", env = "COMPOSE_PROJECT_NAME", global = true)]
    pub project_name: Option<String>,

    /// Profiles to activate (can be repeated)
    #[arg(
        long,
        env = "COMPOSE_PROFILES",
        value_delimiter = ',',
        global = true
    )]
    pub profile: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode compose progress output into events
    Decode {
        /// File to read (defaults to stdin)
        input: Option<PathBuf>,

        /// Fail on the first line that is not a progress event
        #[arg(long)]
        strict: bool,

        /// Output as JSON lines
        #[arg(long)]
        json: bool,

        /// Only print the latest event per resource
        #[arg(long)]
        latest: bool,
    },
    /// Show which services are active and which are disabled
    Profiles {
        /// Enable every service first, regardless of profiles
        #[arg(long)]
        enable_all: bool,

        /// Disable services declaring this profile (`*` for every profiled service)
        #[arg(long = "disable", value_name = "PROFILE")]
        disable: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Narrow the project to a selection and print the complement
    Reverse {
        /// Services to keep, together with their dependencies
        #[arg(long = "select", value_name = "SERVICE", required = true)]
        select: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare the images used by this manifest against another one
    Images {
        /// Manifest to compare against
        #[arg(long = "new", value_name = "FILE")]
        new: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the manifest
    Validate,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
