use std::path::PathBuf;

use anyhow::Result;
use apdesk_core::approval::AccountType;
use apdesk_core::client::ClientId;
use apdesk_core::document::FileKind;
use clap::{Parser, Subcommand, ValueEnum};

mod app;
mod commands;
mod logging;
mod terminal;

use app::{AppContext, GlobalOptions};

#[derive(Parser, Debug)]
#[command(name = "apdesk")]
#[command(version, about = "APDESK - Approvals back-office console", long_about = None)]
struct Cli {
    /// Directory holding config, session and logs (default: platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Base URL of the back-office API (overrides config and APDESK_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the default config file
    Init,

    /// Start a session
    Login {
        /// Name recorded in the session marker
        #[arg(long)]
        user: String,
    },

    /// End the session
    Logout,

    /// Show session and configuration
    Status,

    /// Client and approval counts
    Dashboard,

    /// Manage clients
    #[command(subcommand)]
    Clients(ClientsCommand),

    /// Manage approvals
    #[command(subcommand)]
    Approvals(ApprovalsCommand),
}

#[derive(Subcommand, Debug)]
enum ClientsCommand {
    /// List all clients
    #[command(alias = "ls")]
    List,

    /// Add a client
    Add {
        #[arg(long)]
        manager: String,
        #[arg(long)]
        director: String,
        #[arg(long)]
        address: String,
        /// Letterhead file to attach
        #[arg(long)]
        letter_head: Option<PathBuf>,
        /// Signature image to attach
        #[arg(long)]
        signature: Option<PathBuf>,
    },

    /// Delete a client
    Delete {
        id: ClientId,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Download a stored client file
    Download {
        kind: FileArg,
        id: ClientId,
        /// File name to save as
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FileArg {
    LetterHead,
    Signature,
}

impl From<FileArg> for FileKind {
    fn from(arg: FileArg) -> Self {
        match arg {
            FileArg::LetterHead => FileKind::LetterHead,
            FileArg::Signature => FileKind::Signature,
        }
    }
}

#[derive(Subcommand, Debug)]
enum ApprovalsCommand {
    /// List all approvals
    #[command(alias = "ls")]
    List,

    /// Submit an approval, save its PDF and optionally upload an edited one
    Send {
        /// Client id
        #[arg(long)]
        client: Option<ClientId>,
        /// Collateral, Settlement or Operational
        #[arg(long)]
        account_type: Option<AccountType>,
        #[arg(long, default_value = "")]
        account_number: String,
        #[arg(long, default_value = "")]
        amount: String,
        /// Edited PDF to upload after the document is saved
        #[arg(long, conflicts_with = "no_replacement")]
        replacement: Option<PathBuf>,
        /// Skip the edited-PDF prompt
        #[arg(long)]
        no_replacement: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = GlobalOptions {
        config_dir: cli.config_dir.clone(),
        api_url: cli.api_url.clone(),
    };

    let (paths, service, config) = AppContext::load_config(&options)?;
    let _log_guard = logging::init(&paths.logs_dir()?, &config.logging.level)?;
    tracing::debug!("Starting {:?}", cli.command);

    let ctx = AppContext::build(paths, service, config).await?;
    dispatch(&ctx, cli.command).await
}

async fn dispatch(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Init => commands::session::init(&ctx.config_service),
        Commands::Login { user } => commands::session::login(ctx, &user).await,
        Commands::Logout => commands::session::logout(ctx).await,
        Commands::Status => commands::session::status(ctx).await,
        Commands::Dashboard => commands::dashboard::show(ctx).await,
        Commands::Clients(action) => match action {
            ClientsCommand::List => commands::clients::list(ctx).await,
            ClientsCommand::Add {
                manager,
                director,
                address,
                letter_head,
                signature,
            } => {
                let args = commands::clients::AddArgs {
                    manager,
                    director,
                    address,
                    letter_head,
                    signature,
                };
                commands::clients::add(ctx, args).await
            }
            ClientsCommand::Delete { id, yes } => commands::clients::delete(ctx, id, yes).await,
            ClientsCommand::Download { kind, id, name } => {
                commands::clients::download(ctx, kind.into(), id, name.as_deref()).await
            }
        },
        Commands::Approvals(action) => match action {
            ApprovalsCommand::List => commands::approvals::list(ctx).await,
            ApprovalsCommand::Send {
                client,
                account_type,
                account_number,
                amount,
                replacement,
                no_replacement,
            } => {
                let args = commands::approvals::SendArgs {
                    client,
                    account_type,
                    account_number,
                    amount,
                    replacement,
                    no_replacement,
                };
                commands::approvals::send(ctx, args).await
            }
        },
    }
}
