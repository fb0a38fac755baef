use crate::commands::{
    run_dedupe, run_lookup, run_match, run_migrate, run_normalize, DedupeArgs, LookupArgs,
    MatchArgs, MigrateArgs, NormalizeArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use maestro_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "maestro-match",
    about = "Match and consolidate composer, conductor, orchestra and soloist names",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the canonical comparison form of a name
    Normalize(NormalizeArgs),
    /// Decide whether two names denote the same person or ensemble
    Match(MatchArgs),
    /// List catalog entries matching a name
    Lookup(LookupArgs),
    /// Report catalog entries that look like duplicates of each other
    Dedupe(DedupeArgs),
    /// Consolidate a legacy concert export into catalog entries
    Migrate(MigrateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Normalize(args) => run_normalize(args),
        Command::Match(args) => run_match(args),
        Command::Lookup(args) => run_lookup(args),
        Command::Dedupe(args) => run_dedupe(args),
        Command::Migrate(args) => run_migrate(args),
    }
}
