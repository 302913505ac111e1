mod client;
mod config;
mod models;
mod render;
mod session;
mod store;
mod view;

use anyhow::Context;
use client::{HttpPropertyClient, PropertyApi};
use config::{Config, DEFAULT_LOG_FILTER};
use models::DraftField;
use session::{Intent, Session};
use std::sync::Arc;
use store::PropertyStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// A line of terminal input
#[derive(Debug, PartialEq)]
enum Command {
    Intent(Intent),
    List,
    Form,
    Help,
    Quit,
    Empty,
}

fn parse_command(line: &str) -> anyhow::Result<Command> {
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));

    let command = match word {
        "" => Command::Empty,
        "list" | "ls" => Command::List,
        "form" => Command::Form,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "search" => Command::Intent(Intent::SetSearch(rest.to_string())),
        "type" => Command::Intent(Intent::SetTypeFilter(rest.to_string())),
        "view" => {
            if rest.trim().is_empty() {
                anyhow::bail!("Usage: view <id>");
            }
            Command::Intent(Intent::ViewDetails(rest.trim().to_string()))
        }
        "close" => Command::Intent(Intent::CloseDetails),
        "set" => {
            let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
            let field: DraftField = field.parse()?;
            Command::Intent(Intent::EditDraft {
                field,
                value: value.to_string(),
            })
        }
        "submit" => Command::Intent(Intent::SubmitDraft),
        "refresh" => Command::Intent(Intent::Refresh),
        other => anyhow::bail!("Unknown command: {other} (try `help`)"),
    };
    Ok(command)
}

fn show_after(session: &Session, intent: &Intent) {
    let view = session.view();
    match intent {
        Intent::SetSearch(_) | Intent::SetTypeFilter(_) => println!("{}", render::listing(&view)),
        Intent::ViewDetails(_) => {
            if let Some(property) = view.selected {
                println!("{}", render::detail(property));
            }
        }
        Intent::EditDraft { .. } => println!("{}", render::form(view.draft)),
        Intent::SubmitDraft if view.draft.description.is_empty() => {
            println!("Description is required")
        }
        Intent::SubmitDraft | Intent::Refresh | Intent::CloseDetails => {}
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Initialize logging; stdout belongs to the listing screen
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|e| {
        eprintln!("Invalid PROPERTY_LOG {:?}: {e}", config.log_filter);
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("🏠 Property Listings");

    let client = HttpPropertyClient::new(&config)?;
    info!("Using listing service at {}", client.endpoint());

    let mut session = Session::new(PropertyStore::new(Arc::new(client)));
    session.start();
    println!("{}", render::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Empty) => {}
                    Ok(Command::Help) => println!("{}", render::HELP),
                    Ok(Command::List) => println!("{}", render::listing(&session.view())),
                    Ok(Command::Form) => println!("{}", render::form(session.view().draft)),
                    Ok(Command::Intent(intent)) => {
                        session.dispatch(intent.clone());
                        show_after(&session, &intent);
                    }
                    Err(e) => println!("{e}"),
                }
            }
            Some(notices) = session.next_event(), if session.has_pending() => {
                if notices.is_empty() {
                    println!("{}", render::listing(&session.view()));
                }
                for notice in notices {
                    println!("⚠️  {notice}");
                }
            }
        }
    }

    if session.has_pending() {
        warn!("Exiting with requests still in flight");
    }
    Ok(())
}
