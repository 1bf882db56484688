// Copyright 2026 Muvon Un Limited
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use tracing::warn;

use crate::chat::backend::HttpChatBackend;
use crate::chat::engine::{ChatEngine, SourceLoadReport};
use crate::chat::session::SessionManager;
use crate::cli::{Commands, SessionCommand};
use crate::config::Config;
use crate::knowledge::site_api::HttpSiteContent;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

/// Execute the parsed command.
pub async fn execute(config: &Config, command: Commands) -> Result<()> {
    match command {
        Commands::Chat => run_chat(config).await,
        Commands::Ask { question } => run_ask(config, question.join(" ")).await,
        Commands::Sources => run_sources(config).await,
        Commands::Session { command } => run_session(command),
    }
}

/// Durable store if the data directory is usable, otherwise in-memory for
/// the life of the process.
fn open_store() -> Arc<dyn KeyValueStore> {
    match FileStore::open_system() {
        Ok(store) => Arc::new(store),
        Err(error) => {
            warn!(%error, "session storage unavailable, continuing without persistence");
            Arc::new(MemoryStore::new())
        }
    }
}

fn build_engine(config: &Config) -> Result<ChatEngine> {
    let backend = HttpChatBackend::new(&config.backend)?;
    let session = SessionManager::new(open_store());
    Ok(ChatEngine::new(config.clone(), Arc::new(backend), session))
}

fn print_reply(reply: &str) {
    println!("{} {}\n", "assistant:".blue().bold(), reply);
}

async fn run_chat(config: &Config) -> Result<()> {
    let api = HttpSiteContent::new(&config.api)?;
    let mut engine = build_engine(config)?;
    engine.load_knowledge(&api).await;
    engine.session().save_is_open(true);

    println!("{}", "campuschat: type a question, or 'exit' to leave".bold());
    if let Some(last) = engine.messages().last() {
        print_reply(&last.text);
    }

    let stdin = std::io::stdin();
    loop {
        print!("{} ", "you>".green().bold());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        if let Some(reply) = engine.send_message(line).await {
            print_reply(&reply);
        }
    }

    engine.session().save_is_open(false);
    println!("{}", "Session saved. Goodbye!".bright_black());
    Ok(())
}

async fn run_ask(config: &Config, question: String) -> Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("Question cannot be empty");
    }

    let api = HttpSiteContent::new(&config.api)?;
    let mut engine = build_engine(config)?;
    engine.load_knowledge(&api).await;

    if let Some(reply) = engine.send_message(&question).await {
        print_reply(&reply);
    }
    Ok(())
}

fn format_source_report(reports: &[SourceLoadReport]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:<24} {:<8} {}\n", "Source", "Entries", "Status").bold().to_string());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for report in reports {
        let status = match &report.error {
            None => "ok".green().to_string(),
            Some(error) => format!("failed: {error}").red().to_string(),
        };
        output.push_str(&format!("{:<24} {:<8} {}\n", report.id, report.entries, status));
    }

    let loaded = reports.iter().filter(|report| report.error.is_none()).count();
    let entries: usize = reports.iter().map(|report| report.entries).sum();
    output.push_str(&format!("\n{loaded}/{} sources loaded, {entries} entries indexed\n", reports.len()));

    output
}

async fn run_sources(config: &Config) -> Result<()> {
    let api = HttpSiteContent::new(&config.api)?;
    let mut engine = build_engine(config)?;
    let reports = engine.load_knowledge(&api).await;
    print!("{}", format_source_report(&reports));
    Ok(())
}

fn run_session(command: SessionCommand) -> Result<()> {
    let session = SessionManager::new(open_store());
    match command {
        SessionCommand::Show => {
            let session_id = session
                .get_or_create_session_id()
                .unwrap_or_else(|| "unavailable".to_string());
            let messages = session.load_messages(Vec::new());
            println!("{} {}", "Session id:".bold(), session_id);
            println!("{} {}", "Stored messages:".bold(), messages.len());
            println!("{} {}", "Chat open:".bold(), session.load_is_open());
        }
        SessionCommand::Clear => {
            session.clear_session();
            println!("Conversation cleared. The session id was kept.");
        }
    }
    Ok(())
}
