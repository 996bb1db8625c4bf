//! Corpora interactive shell.
//!
//! Connects to a corpora service and drives the full client layer from a
//! small REPL. Assumes the service is already running.
//!
//! Usage:
//!   cargo run --bin corpora-shell -- "corpora://<owner-id>:<token>@<host>:<port>"
//!
//! Commands:
//!   status                 show connection state
//!   docs                   refresh and list the document catalog
//!   meta <key> <value>     stage a metadata pair for the next ingest
//!   text <content>         stage a text draft
//!   ingest-text            submit the staged text draft
//!   ingest-file <path>     submit a file with the staged metadata
//!   filter <key> <value>   stage a query filter
//!   ask <question>         send a query
//!   quit

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use corpora_client::{Catalog, Chat, ClientConfig, Connection, Ingestor};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("corpora_client=warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let uri = match std::env::args().nth(1) {
        Some(uri) => uri,
        None => {
            eprintln!("usage: corpora-shell <connection-string>");
            std::process::exit(2);
        }
    };

    let conn = Arc::new(Connection::new(ClientConfig::from_env()));
    if let Err(e) = conn.connect(&uri).await {
        eprintln!("connect failed: {}", e);
        std::process::exit(1);
    }
    println!("connected");

    let catalog = Arc::new(Catalog::new(conn.clone()));
    let ingestor = Ingestor::new(conn.clone(), catalog.clone());
    let chat = Chat::new(conn.clone(), catalog.clone());

    if let Err(e) = catalog.refresh().await {
        eprintln!("catalog sync failed: {}", e);
    }

    let stdin = io::stdin();
    loop {
        print!("corpora> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        let outcome = match cmd {
            "" => Ok(()),
            "quit" | "exit" => break,
            "status" => {
                let status = conn.status().await;
                match status.last_error {
                    Some(reason) if !status.connected => println!("disconnected: {}", reason),
                    _ if status.connected => println!("connected"),
                    _ => println!("disconnected"),
                }
                Ok(())
            }
            "docs" => catalog.refresh().await.map(|entries| {
                for entry in entries {
                    println!(
                        "{}  {}  {}  {}",
                        entry.id, entry.display_name, entry.content_type, entry.created_at
                    );
                }
            }),
            "meta" => {
                match rest.split_once(' ') {
                    Some((key, value)) => ingestor.add_metadata(key, value.trim()).await,
                    None => eprintln!("usage: meta <key> <value>"),
                }
                Ok(())
            }
            "text" => {
                ingestor.set_text(rest).await;
                Ok(())
            }
            "ingest-text" => ingestor.ingest_text().await,
            "ingest-file" => match std::fs::read(rest) {
                Ok(bytes) => {
                    let filename = std::path::Path::new(rest)
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| rest.to_string());
                    ingestor.ingest_file(&filename, bytes, None).await
                }
                Err(e) => {
                    eprintln!("cannot read {}: {}", rest, e);
                    Ok(())
                }
            },
            "filter" => {
                match rest.split_once(' ') {
                    Some((key, value)) => chat.add_filter(key, value.trim()).await,
                    None => eprintln!("usage: filter <key> <value>"),
                }
                Ok(())
            }
            "ask" => {
                chat.set_draft(rest).await;
                let result = chat.send().await;
                if result.is_ok() {
                    if let Some(reply) = chat.transcript().await.last() {
                        println!("{}", reply.text);
                    }
                }
                result
            }
            other => {
                eprintln!("unknown command: {}", other);
                Ok(())
            }
        };

        if let Err(e) = outcome {
            eprintln!("error: {}", e);
        }
    }
}
