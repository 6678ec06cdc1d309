use crate::demo::{run_compare, run_demo, CompareArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use name_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Name Match Service",
    about = "Score how closely submitted contact names match canonical records",
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
    /// Score a single name pair from the command line
    Compare(CompareArgs),
    /// Walk through a set of sample reconciliation pairs
    Demo(DemoArgs),
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
        Command::Compare(args) => run_compare(args),
        Command::Demo(args) => run_demo(args),
    }
}
