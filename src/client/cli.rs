use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::client::Row;
use crate::client::api::{DEFAULT_API_URL, PortalClient};
use crate::client::dashboard::{Dashboard, SaveOutcome};
use crate::client::error::{ClientError, ClientResult};
use crate::client::session::{SessionStore, View};

#[derive(Parser, Debug)]
#[command(name = "portal", version, about = "Finance records portal client")]
pub struct Cli {
    /// Base URL of the portal API
    #[arg(long, env = "PORTAL_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File holding the logged-in role
    #[arg(long, env = "PORTAL_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Log requests to stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and remember the role
    Login {
        #[arg(short, long)]
        username: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the role
    Logout,
    /// Show the current view
    Status,
    /// Print the role's records
    List {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Add a record: `portal add employee_id=E1 employee_name=Asha salary=90000 --date 2024-04-01`
    Add {
        /// field=value pairs
        #[arg(required = true)]
        fields: Vec<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Edit a record; unspecified fields keep their current value
    Edit {
        id: u64,
        /// field=value pairs
        fields: Vec<String>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a record
    Delete {
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the role's records to `<role>_report.pdf`
    Export {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Output file (defaults to `<role>_report.pdf` in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub async fn run(cli: Cli) -> ClientResult<()> {
    let store = SessionStore::new(cli.session_file.unwrap_or_else(SessionStore::default_path));
    let client = PortalClient::new(cli.api_url);
    debug!(api = client.base_url(), session = %store.path().display(), "Portal client ready");

    match cli.command {
        Command::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ")?,
            };
            let role = client.login(&username, &password).await?;
            store.save(role)?;
            println!("Logged in. Role: {role}");
        }

        Command::Logout => {
            store.clear()?;
            println!("Logged out.");
        }

        Command::Status => match store.load()?.view() {
            View::Login => println!("Not logged in."),
            View::Dashboard(role) => println!("Logged in as {role}."),
        },

        Command::List { from, to } => {
            let mut dashboard = open_dashboard(&store)?;
            dashboard.set_filter(from, to);
            dashboard.refresh(&client).await?;
            print_dashboard(&dashboard);
        }

        Command::Add { fields, date } => {
            let mut dashboard = open_dashboard(&store)?;
            fill_form(&mut dashboard, &fields, date)?;
            save(&mut dashboard, &client).await?;
        }

        Command::Edit { id, fields, date } => {
            let mut dashboard = open_dashboard(&store)?;
            let record = client.get(dashboard.role(), id).await?;
            dashboard.begin_edit(&record)?;
            fill_form(&mut dashboard, &fields, date)?;
            save(&mut dashboard, &client).await?;
        }

        Command::Delete { id, yes } => {
            let mut dashboard = open_dashboard(&store)?;
            if !yes && !confirm("Are you sure?")? {
                println!("Cancelled.");
                return Ok(());
            }
            dashboard.delete(&client, id).await?;
            println!("Record {id} deleted.");
        }

        Command::Export { from, to, output } => {
            let mut dashboard = open_dashboard(&store)?;
            dashboard.set_filter(from, to);
            dashboard.refresh(&client).await?;

            let path = output.unwrap_or_else(|| PathBuf::from(dashboard.report_file_name()));
            dashboard.export_pdf(&path)?;
            println!("Wrote {} record(s) to {}", dashboard.records().len(), path.display());
        }
    }

    Ok(())
}

fn open_dashboard(store: &SessionStore) -> ClientResult<Dashboard> {
    match store.load()?.view() {
        View::Dashboard(role) => Ok(Dashboard::new(role)),
        View::Login => Err(ClientError::NotLoggedIn),
    }
}

/// Applies `field=value` pairs and the optional entry date to the form.
pub fn fill_form(dashboard: &mut Dashboard, pairs: &[String], date: Option<String>) -> ClientResult<()> {
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| ClientError::Invalid(format!("expected field=value, got {pair:?}")))?;
        dashboard.set_field(name.trim(), value.trim())?;
    }

    if let Some(date) = date {
        dashboard.set_field("entry_date", date)?;
    }

    Ok(())
}

/// Saves the form. Failures are reported without detail; `--verbose` logs it.
async fn save(dashboard: &mut Dashboard, client: &PortalClient) -> ClientResult<()> {
    match dashboard.submit(client).await {
        Ok(SaveOutcome::Created(id)) => {
            println!("Saved successfully! (id {id})");
            Ok(())
        }
        Ok(SaveOutcome::Updated(id)) => {
            println!("Saved successfully! (id {id} updated)");
            Ok(())
        }
        Err(e) => {
            debug!(error = %e, "Save failed");
            Err(ClientError::Invalid("Failed to save.".to_string()))
        }
    }
}

fn print_dashboard(dashboard: &Dashboard) {
    println!("{}", dashboard.heading());

    let mut headers: Vec<String> = vec!["id".to_string()];
    headers.extend(dashboard.columns().iter().map(|c| c.replacen('_', " ", 1).to_uppercase()));

    let rows: Vec<Vec<String>> = dashboard
        .records()
        .iter()
        .zip(dashboard.table())
        .map(|(record, cells)| {
            let mut row = vec![record_id(record)];
            row.extend(cells);
            row
        })
        .collect();

    if rows.is_empty() {
        println!("No records found");
        return;
    }

    print!("{}", render_text_table(&headers, &rows));
}

fn record_id(record: &Row) -> String {
    record.get("id").map(|v| v.to_string()).unwrap_or_default()
}

pub fn render_text_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

fn prompt(label: &str) -> ClientResult<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(question: &str) -> ClientResult<bool> {
    let answer = prompt(&format!("{question} [y/N] "))?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
