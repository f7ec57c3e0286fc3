// ===============================
// src/main.rs
// ===============================
/*
 cd finsync

 FINSYNC_API_TOKEN=... cargo run -- load
 FINSYNC_API_TOKEN=... cargo run -- add-spending --amount 1200 --description lunch --date 2024-05-11 --category-id 3

 # kalau METRICS_PORT di-set
 curl -s localhost:9898/metrics | egrep '^(store_requests_total|dependent_refresh_total)'
*/
/*
=============================================================================
Project : finsync — personal-finance client sync layer in Rust
Module  : main.rs
Version : 0.1.0
Author  : finsync contributors
License : MIT (see LICENSE)

Summary : Keeps balance, credits, spendings, categories, goals,
          recommendations and reminders consistent on the client side:
          per-store loading/error state, translated backend errors,
          dependent refreshes after every mutation, reset on logout.

(c) 2025 finsync contributors.
=============================================================================
*/
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::{error, info, warn};
use url::Url;

use finsync::config::Config;
use finsync::domain::{ActionResponse, CategoryPayload, CreditPayload, SpendingPayload};
use finsync::{metrics, DomainStore, HttpClient, RemoteError, Session, SyncError};

#[derive(Parser, Debug)]
#[command(name = "finsync", about = "Sync and mutate personal-finance data against the backend")]
struct Cli {
    /// Overrides FINSYNC_API_URL
    #[arg(long)]
    api_url: Option<Url>,
    /// Overrides FINSYNC_API_TOKEN
    #[arg(long)]
    token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load every store and print a summary
    Load,
    AddCredit {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        description: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        permanent: bool,
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },
    AddSpending {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        description: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        category_id: i64,
        #[arg(long)]
        permanent: bool,
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },
    DeleteSpending {
        id: i64,
    },
    AddCategory {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    DeleteCategory {
        id: i64,
    },
    SetCurrentGoal {
        id: i64,
    },
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Client(#[from] RemoteError),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let cfg = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // ---- Logging ----
    tracing_subscriber::fmt().with_env_filter(cfg.log_filter.as_str()).init();

    // ---- Metrics ----
    metrics::init();
    if let Some(port) = cfg.metrics_port {
        metrics::serve_metrics(port);
    }

    match run(cli, cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "finsync failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, cfg: Config) -> Result<(), AppError> {
    let api_url = cli.api_url.unwrap_or(cfg.api_url);
    let token = cli.token.or(cfg.api_token);
    let authenticated = token.is_some();

    info!(api = %api_url, authenticated, timeout = ?cfg.timeout, "startup config");

    let client = Arc::new(HttpClient::new(api_url, cfg.timeout, token)?);
    let session = Session::with_http(client, authenticated);
    let coord = session.coordinator();

    match cli.command {
        Command::Load => {
            let report = coord.load_all_data().await?;
            if !report.is_complete() {
                for (resource, e) in &report.failed {
                    warn!(resource = resource.as_str(), status = e.status, error = %e, "load incomplete");
                }
            }
        }
        Command::AddCredit { amount, description, date, permanent, end_date } => {
            let payload = CreditPayload { amount, description, date, is_permanent: permanent, end_date };
            done("add-credit", coord.add_credit(&payload).await?);
        }
        Command::AddSpending { amount, description, date, category_id, permanent, end_date } => {
            let payload =
                SpendingPayload { amount, description, date, is_permanent: permanent, end_date, category_id };
            done("add-spending", coord.add_spending(&payload).await?);
        }
        Command::DeleteSpending { id } => done("delete-spending", coord.delete_spending(id).await?),
        Command::AddCategory { name, description } => {
            let payload = CategoryPayload { name, description };
            done("add-category", coord.add_category(&payload).await?);
        }
        Command::DeleteCategory { id } => done("delete-category", coord.delete_category(id).await?),
        Command::SetCurrentGoal { id } => done("set-current-goal", coord.set_current_goal_by_id(id).await?),
    }

    summary(&session);
    Ok(())
}

fn done(command: &str, rsp: ActionResponse) {
    info!(command, message = rsp.message.as_deref().unwrap_or("-"), "ok");
}

// ---- Ringkasan state per store ----
fn summary(session: &Session) {
    let s = session.stores();

    let balance = s.balance.snapshot();
    info!(balance = ?balance.data, error = ?balance.error.map(|e| e.message), "balance");

    let credits = s.credits.snapshot();
    info!(count = ?credits.data.as_ref().map(Vec::len), error = ?credits.error.map(|e| e.message), "credits");

    let spendings = s.spendings.snapshot();
    info!(count = ?spendings.data.as_ref().map(Vec::len), error = ?spendings.error.map(|e| e.message), "spendings");

    let categories = s.categories.snapshot();
    for c in categories.data.categories.iter().flatten() {
        info!(name = %c.name, color = categories.data.colors.color_of(&c.name).unwrap_or("-"), "category");
    }

    let goals = s.goals.snapshot();
    if let Some(g) = &goals.data.current_goal {
        info!(id = g.id, amount = g.amount, description = %g.description, "current goal");
    }

    let recs = s.recommendations.snapshot();
    for r in recs.data.iter().flatten() {
        info!(title = %r.title, "recommendation");
    }

    let reminders = s.reminders.snapshot();
    if let Some(r) = &reminders.data.today {
        info!(text = %r.text, daily_limit = ?r.daily_limit, "today");
    }
}
