//! `callerid` - serve the API and run management tasks.
//!
//! ```bash
//! callerid                      # same as `callerid serve`
//! callerid migrate
//! callerid seed --users 25
//! callerid create-superuser -p 9876543210 -n "Admin" --password admin1234
//! ```

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use callerid::config::AppConfig;
use callerid::db;
use callerid::repositories::RevokedTokenRepository;
use callerid::services::auth::{self, AccountKind};
use callerid::services::credentials::RegistrationInput;
use callerid::services::seed::{self, SeedOptions};
use callerid::services::tokens::TokenService;
use callerid::{create_app, AppState};

#[derive(Parser)]
#[command(name = "callerid")]
#[command(author, version, about = "Caller identification and spam reporting service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run migrations and start the HTTP server
    Serve,
    /// Apply pending database migrations
    Migrate,
    /// Fill the database with fake users, contacts and spam reports
    Seed {
        /// Number of users to create
        #[arg(short, long, default_value_t = 25)]
        users: usize,

        /// Password given to every seeded user
        #[arg(long, default_value = "password123")]
        password: String,
    },
    /// Create a staff account with superuser rights
    CreateSuperuser {
        #[arg(short, long)]
        phone_number: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "callerid=info,tower_http=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = db::create_pool(&config.database_url, config.pool_size)
        .context("Failed to create pool")?;
    {
        let conn = &mut pool.get().context("Failed to get DB connection")?;
        let applied = db::run_migrations(conn)?;
        if applied > 0 {
            tracing::info!(applied, "Applied database migrations");
        }
    }

    let tokens = TokenService::new(&config.tokens);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let purged = {
                let conn = &mut pool.get().context("Failed to get DB connection")?;
                RevokedTokenRepository::purge_expired(conn, Utc::now().naive_utc())?
            };
            tracing::info!(purged, "Pruned expired token revocations");

            let app = create_app(AppState::new(pool, tokens, config.bcrypt_cost));
            let address = config.socket_addr();
            tracing::info!(%address, "Listening");

            axum::Server::bind(&address)
                .serve(app.into_make_service())
                .with_graceful_shutdown(shutdown_signal())
                .await
                .context("Server error")?;
        }
        Command::Migrate => {
            tracing::info!("Database is up to date");
        }
        Command::Seed { users, password } => {
            let conn = &mut pool.get().context("Failed to get DB connection")?;
            let options = SeedOptions {
                users,
                password,
                bcrypt_cost: config.bcrypt_cost,
            };
            let seeded = seed::populate(conn, &tokens, &options)?;
            for entry in &seeded {
                println!(
                    "{} ({}): {} contacts, {} spam reports",
                    entry.user.name, entry.user.phone_number, entry.contacts, entry.spam_reports
                );
                println!("  access token:  {}", entry.tokens.access_token);
                println!("  refresh token: {}", entry.tokens.refresh_token);
            }
            println!("Seeded {} users", seeded.len());
        }
        Command::CreateSuperuser { phone_number, name, email, password } => {
            let conn = &mut pool.get().context("Failed to get DB connection")?;
            let user = auth::register(
                conn,
                RegistrationInput {
                    name: Some(name),
                    phone_number: Some(phone_number),
                    email,
                    password: Some(password),
                },
                AccountKind::SUPERUSER,
                config.bcrypt_cost,
            )?;
            println!("Created superuser {} ({})", user.name, user.phone_number);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
