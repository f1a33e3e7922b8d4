pub mod commands;
pub mod config;
pub mod utils;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::client::{DashboardClient, SessionController};
use crate::models::{BookingType, Currency};

#[derive(Parser)]
#[command(name = "treepz")]
#[command(about = "Treepz admin CLI - bookings, payments and revenue from the terminal")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "TREEPZ_ADMIN_URL",
        default_value = "http://localhost:3000",
        help = "Admin dashboard server URL"
    )]
    pub server: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign in and remember the session")]
    Login {
        #[arg(help = "Admin email")]
        email: String,
        #[arg(long, env = "TREEPZ_ADMIN_PASSWORD", hide_env_values = true, help = "Admin password")]
        password: String,
    },

    #[command(about = "Sign out and forget the session")]
    Logout,

    #[command(about = "Show current session")]
    Status,

    #[command(about = "List bookings")]
    Bookings(ListArgs),

    #[command(about = "List payments")]
    Payments(ListArgs),

    #[command(about = "Show one booking in detail")]
    Booking {
        #[arg(help = "Booking ID")]
        id: String,
    },

    #[command(about = "Dashboard metrics and latest flight bookings")]
    Dashboard {
        #[arg(long, default_value_t = 1, help = "Preview page")]
        page: u32,
        #[arg(long, default_value = "NGN", help = "Display currency (NGN, USD, EUR, GBP)")]
        currency: Currency,
    },

    #[command(about = "Exchange rates for a base currency")]
    Rates {
        #[arg(long, default_value = "NGN", help = "Base currency")]
        base: Currency,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, help = "Status filter, or 'all'")]
    pub status: Option<String>,

    #[arg(long = "type", value_name = "TYPE", help = "flight, hotel, or 'all'")]
    pub kind: Option<String>,

    #[arg(long, help = "Creation date filter (YYYY-MM-DD)")]
    pub date: Option<String>,

    #[arg(long, help = "Search by id or user")]
    pub search: Option<String>,

    #[arg(long, default_value = "NGN", help = "Display currency (NGN, USD, EUR, GBP)")]
    pub currency: Currency,
}

impl ListArgs {
    /// `None` for no type filter; unknown types are an error.
    pub fn kind(&self) -> anyhow::Result<Option<BookingType>> {
        match self.kind.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) if raw.eq_ignore_ascii_case("all") => Ok(None),
            Some(raw) => BookingType::parse(raw)
                .map(Some)
                .ok_or_else(|| anyhow::anyhow!("unknown booking type '{}'", raw)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Client for `server`, signed in when a session for it was recorded.
pub fn connect(server: &str) -> anyhow::Result<SessionController> {
    let client = DashboardClient::new(server)?;
    let session = match config::load_session()? {
        Some(stored) if stored.is_for(server) => SessionController::restore(client, &stored.token()),
        _ => SessionController::new(client),
    };
    Ok(session)
}

/// As [`connect`], but fails when no session is recorded.
pub fn require_session(server: &str) -> anyhow::Result<SessionController> {
    let session = connect(server)?;
    if !session.is_authenticated() {
        anyhow::bail!("Not logged in. Run `treepz login <email>` first");
    }
    Ok(session)
}

/// A proxy answered 401: drop the recorded session.
pub fn session_expired() -> anyhow::Error {
    if let Err(e) = config::clear_session() {
        tracing::warn!("failed to clear stored session: {}", e);
    }
    anyhow::anyhow!("Session expired. Run `treepz login <email>` again")
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let server = cli.server;

    match cli.command {
        Commands::Login { email, password } => commands::auth::login(&server, &email, &password, output_format).await,
        Commands::Logout => commands::auth::logout(&server, output_format).await,
        Commands::Status => commands::auth::status(&server, output_format),
        Commands::Bookings(args) => commands::bookings::list(&server, args, output_format).await,
        Commands::Booking { id } => commands::bookings::detail(&server, &id, output_format).await,
        Commands::Payments(args) => commands::payments::list(&server, args, output_format).await,
        Commands::Dashboard { page, currency } => {
            commands::dashboard::show(&server, page, currency, output_format).await
        }
        Commands::Rates { base } => commands::rates::show(&server, base, output_format).await,
    }
}
