use crate::journey::{run_cs_date, run_eligibility, CsDateArgs, EligibilityArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use confirmation_statement::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Confirmation Statement Filing",
    about = "Run the confirmation statement filing service or exercise its journey rules offline",
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
    /// Evaluate journey rules without starting the service
    Journey {
        #[command(subcommand)]
        command: JourneyCommand,
    },
}

#[derive(Subcommand, Debug)]
enum JourneyCommand {
    /// Show where the confirm-company screen would send a company
    Eligibility(EligibilityArgs),
    /// Validate a replacement confirmation statement date
    CsDate(CsDateArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Pre-seed a signed-in session under this `__SID` cookie value
    #[arg(long)]
    pub(crate) session_id: Option<String>,
    /// Email address of the pre-seeded user
    #[arg(long, default_value = "test@example.com", requires = "session_id")]
    pub(crate) user_email: String,
    /// Sign the pre-seeded user in as an authorised agent
    #[arg(long, requires = "session_id")]
    pub(crate) acsp_number: Option<String>,
    /// Ask for the filing fee when a transaction is closed
    #[arg(long)]
    pub(crate) filing_fee: bool,
}

impl ServeArgs {
    fn parse_defaults() -> Self {
        Self {
            host: None,
            port: None,
            session_id: None,
            user_email: "test@example.com".to_string(),
            acsp_number: None,
            filing_fee: false,
        }
    }
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::parse_defaults()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Journey {
            command: JourneyCommand::Eligibility(args),
        } => run_eligibility(args),
        Command::Journey {
            command: JourneyCommand::CsDate(args),
        } => run_cs_date(args),
    }
}
