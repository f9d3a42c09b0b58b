use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::config::Config;
use crate::host::{TerminalHost, ViewHost};
use crate::refresh::{watch_paths, ChangeWatcher};
use crate::session::{Action, WorkspaceSession, NOT_A_REPOSITORY};
use crate::tree::{self, RenderOptions, TreeProvider};

const HELP: &str = "Commands: r (refresh), o <path> (open file), b <name> (show branch), c <id> (show commit), q (quit)";

#[derive(Debug, PartialEq, Eq)]
enum WatchCommand {
    Run(Action),
    Help,
    Quit,
}

/// Parse one line of interactive input. Blank lines yield `None`.
fn parse_command(line: &str) -> Result<Option<WatchCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, arg) = match line.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (line, ""),
    };

    match verb {
        "r" | "refresh" => Ok(Some(WatchCommand::Run(Action::Refresh))),
        "o" | "open" => with_arg(verb, arg, Action::OpenFile),
        "b" | "branch" => with_arg(verb, arg, Action::ShowBranch),
        "c" | "commit" => with_arg(verb, arg, Action::ShowCommit),
        "?" | "h" | "help" => Ok(Some(WatchCommand::Help)),
        "q" | "quit" | "exit" => Ok(Some(WatchCommand::Quit)),
        other => Err(format!("Unknown command '{}'. {}", other, HELP)),
    }
}

fn with_arg(
    verb: &str,
    arg: &str,
    make: fn(String) -> Action,
) -> Result<Option<WatchCommand>, String> {
    if arg.is_empty() {
        Err(format!("'{}' needs an argument", verb))
    } else {
        Ok(Some(WatchCommand::Run(make(arg.to_string()))))
    }
}

fn draw(root: &Path, tree: &TreeProvider, options: RenderOptions) {
    // Clear screen, cursor home
    print!("\x1b[2J\x1b[H");
    println!(
        "{} · updated {}\n",
        root.display(),
        Local::now().format("%H:%M:%S")
    );

    match tree.snapshot() {
        None => println!("(no status yet)"),
        Some(status) => {
            let nodes = tree::build(&status, options, Utc::now());
            if nodes.is_empty() {
                println!("✅ Workspace is clean.");
            } else {
                print!("{}", tree::render_text(&nodes));
            }
        }
    }
    println!("\n{}", HELP);
}

pub async fn run_watch(config: &Config, expand_all: bool) -> Result<()> {
    let host = TerminalHost;
    let session = WorkspaceSession::init(
        &config.workspace_root,
        config.source(),
        config.refresh_settings(),
    )
    .await;

    let Some(tree) = session.tree().cloned() else {
        host.show_info(NOT_A_REPOSITORY);
        return Ok(());
    };

    // Keep the watcher alive for the whole loop
    let _watcher = match session.trigger() {
        Some(trigger) => {
            let paths = watch_paths(&config.workspace_root, config.watch_worktree);
            match ChangeWatcher::start(&paths, trigger) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    warn!("File watching disabled: {:#}", e);
                    None
                }
            }
        }
        None => None,
    };

    let options = RenderOptions { expand_all };
    let mut changes = tree.changes();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    draw(session.root(), &tree, options);

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if !changed {
                    break;
                }
                draw(session.root(), &tree, options);
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    debug!("stdin closed, continuing without interactive commands");
                    stdin_open = false;
                    continue;
                };
                match parse_command(&line) {
                    Ok(Some(WatchCommand::Run(action))) => {
                        session.run_action(action, &host).await;
                    }
                    Ok(Some(WatchCommand::Help)) => println!("{}", HELP),
                    Ok(Some(WatchCommand::Quit)) => break,
                    Ok(None) => {}
                    Err(message) => host.show_error(&message),
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    session.dispose();
    Ok(())
}
