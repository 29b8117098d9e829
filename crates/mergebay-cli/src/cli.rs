use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mergebay",
    about = "Mergebay: stage duplicate records for merging",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Entity {
    Customer,
    Vendor,
}

impl From<Entity> for mergebay_types::EntityKind {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::Customer => Self::Customer,
            Entity::Vendor => Self::Vendor,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the session a list of candidates opens with
    Show(ShowArgs),
    /// Replay gestures against a session and optionally commit the merge
    Simulate(SimulateArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// JSON file holding an array of candidate records
    #[arg(long)]
    pub items: String,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// JSON file holding an array of candidate records
    #[arg(long)]
    pub items: String,
    /// Kind of record being merged
    #[arg(long, value_enum, default_value = "customer")]
    pub entity: Entity,
    /// Dialog configuration (TOML)
    #[arg(long)]
    pub config: Option<String>,
    /// Gesture to apply, e.g. "drag s:0 p:0", "drop s:1", "reverse name"
    #[arg(long = "step")]
    pub steps: Vec<String>,
    /// Commit the merge after the last step
    #[arg(long)]
    pub commit: bool,
    /// Make the in-memory merge API reject the commit with this message
    #[arg(long)]
    pub reject: Option<String>,
}
