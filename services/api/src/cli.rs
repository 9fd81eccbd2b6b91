use crate::commands::{run_assess, run_demo, run_rules, AssessArgs, DemoArgs, RulesArgs};
use crate::server;
use ckd_risk::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "CKD Risk Assessment",
    about = "Serve and run the chronic kidney disease risk scoring engine from the command line",
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
    /// Score a patient intake record stored as JSON
    Assess(AssessArgs),
    /// List the active rule table
    Rules(RulesArgs),
    /// Score a built-in sample patient and print the full report
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
        Command::Assess(args) => run_assess(args),
        Command::Rules(args) => run_rules(args),
        Command::Demo(args) => run_demo(args),
    }
}
