//! Interactive console for a Promptdesk backend.
//!
//! Configuration comes from the environment: `PROMPTDESK_API_URL` for the
//! backend base URL and `PROMPTDESK_TOKEN_FILE` for the session token path.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use desk_client::auth::HttpAuthClient;
use desk_client::config::ApiConfig;
use desk_client::prompts::HttpPromptClient;
use desk_console::{Console, ConsoleError};
use desk_primitives::PromptId;
use desk_session::{FileTokenStore, SessionManager};

const TOKEN_FILE_ENV: &str = "PROMPTDESK_TOKEN_FILE";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let config = ApiConfig::from_env()?;
    println!("Promptdesk console — backend {}", config.base_url());

    let auth = HttpAuthClient::new(config.clone())?;
    let prompts = HttpPromptClient::new(config)?;
    let session = SessionManager::new(Arc::new(auth), Arc::new(FileTokenStore::new(token_path())));
    let mut console = Console::new(session, Arc::new(prompts));

    match console.startup().await {
        Ok(true) => println!("Session restored ({} prompts).", console.prompts().len()),
        Ok(false) => println!("Not logged in. Type `login` or `register` to begin."),
        Err(err) => notice(&err),
    }

    loop {
        let Some(line) = read_line("> ")? else {
            break;
        };
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let argument = words.next();

        match command {
            "help" => print_help(),
            "login" => run_login(&mut console).await?,
            "register" => run_register(&mut console).await?,
            "list" => print_list(&console),
            "add" => run_add(&mut console).await?,
            "edit" => run_edit(&mut console, argument).await?,
            "rm" => run_remove(&mut console, argument).await,
            "logout" => match console.logout().await {
                Ok(()) => println!("Logged out."),
                Err(err) => notice(&err),
            },
            "quit" | "exit" => break,
            other => println!("Unknown command `{other}`. Type `help` for a list."),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  login          log in with identifier and password");
    println!("  register       create an account (does not log in)");
    println!("  list           show all prompts");
    println!("  add            create a new prompt");
    println!("  edit <id>      edit an existing prompt");
    println!("  rm <id>        delete a prompt");
    println!("  logout         drop the session and the stored token");
    println!("  quit           leave the console");
}

async fn run_login(console: &mut Console) -> Result<()> {
    let Some(identifier) = read_line("Identifier: ")? else {
        return Ok(());
    };
    let Some(password) = read_line("Password: ")? else {
        return Ok(());
    };

    match console.login(identifier.trim(), password.trim()).await {
        Ok(()) => println!("Logged in ({} prompts).", console.prompts().len()),
        Err(err) => notice(&err),
    }
    Ok(())
}

async fn run_register(console: &mut Console) -> Result<()> {
    let Some(username) = read_line("Username: ")? else {
        return Ok(());
    };
    let Some(email) = read_line("Email: ")? else {
        return Ok(());
    };
    let Some(password) = read_line("Password: ")? else {
        return Ok(());
    };

    match console
        .register(username.trim(), email.trim(), password.trim())
        .await
    {
        Ok(profile) => println!("Registered {}. You can now log in.", profile.username),
        Err(err) => notice(&err),
    }
    Ok(())
}

fn print_list(console: &Console) {
    if console.prompts().is_empty() {
        println!("No prompts.");
        return;
    }
    for record in console.prompts() {
        println!("[{}] {}", record.id(), record.name());
        println!("    {}", record.prompt());
    }
}

async fn run_add(console: &mut Console) -> Result<()> {
    let Some(name) = read_line("Name: ")? else {
        return Ok(());
    };
    let Some(body) = read_line("Prompt: ")? else {
        return Ok(());
    };

    console.set_draft_name(name.trim());
    console.set_draft_prompt(body.trim());
    match console.submit_draft().await {
        Ok(()) => println!("Created."),
        Err(err) => {
            notice(&err);
            console.cancel_edit();
        }
    }
    Ok(())
}

async fn run_edit(console: &mut Console, argument: Option<&str>) -> Result<()> {
    let Some(id) = parse_id(argument) else {
        return Ok(());
    };
    if let Err(err) = console.start_edit(id) {
        notice(&err);
        return Ok(());
    }

    let current_name = console.draft().name().unwrap_or_default().to_owned();
    let current_body = console.draft().prompt().unwrap_or_default().to_owned();

    let Some(name) = read_line(&format!("Name [{current_name}]: "))? else {
        console.cancel_edit();
        return Ok(());
    };
    let Some(body) = read_line(&format!("Prompt [{current_body}]: "))? else {
        console.cancel_edit();
        return Ok(());
    };

    // Blank input keeps the current value.
    if !name.trim().is_empty() {
        console.set_draft_name(name.trim());
    }
    if !body.trim().is_empty() {
        console.set_draft_prompt(body.trim());
    }

    match console.submit_draft().await {
        Ok(()) => println!("Updated."),
        Err(err) => {
            notice(&err);
            console.cancel_edit();
        }
    }
    Ok(())
}

async fn run_remove(console: &mut Console, argument: Option<&str>) {
    let Some(id) = parse_id(argument) else {
        return;
    };
    match console.remove(id).await {
        Ok(()) => println!("Deleted."),
        Err(err) => notice(&err),
    }
}

fn parse_id(argument: Option<&str>) -> Option<PromptId> {
    let Some(raw) = argument else {
        println!("Expected a prompt id, e.g. `edit 3`.");
        return None;
    };
    match raw.parse::<PromptId>() {
        Ok(id) => Some(id),
        Err(err) => {
            println!("{err}");
            None
        }
    }
}

/// Transient failure notice: state is left unchanged, the user can retry.
fn notice(err: &ConsoleError) {
    println!("Request failed: {err}");
}

/// Prints a prompt and reads one line. Returns `None` on end of input.
fn read_line(label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}

fn token_path() -> PathBuf {
    if let Ok(path) = env::var(TOKEN_FILE_ENV) {
        return PathBuf::from(path);
    }
    let mut path = env::var("HOME").map_or_else(|_| PathBuf::from("."), PathBuf::from);
    path.push(".promptdesk");
    path.push("token");
    path
}
