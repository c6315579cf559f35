//! REPL (Read-Eval-Print Loop) for interactive chat

use super::client::{CONNECTION_ERROR_MESSAGE, ChatClient};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::time::Duration;
use tracing::warn;

/// Interactive chat REPL
pub struct ChatRepl {
    client: ChatClient,
    show_progress: bool,
}

impl ChatRepl {
    pub fn new(client: ChatClient) -> Self {
        Self {
            client,
            show_progress: true,
        }
    }

    /// Set whether to show the waiting spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("aida").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline(&format!("{} ", "you>".green().bold())) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_message(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│   💻 AIda - Computer Inventory Assistant    │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("How can I help you find the perfect computer?");
        println!("{} {}", "Server:".cyan().bold(), self.client.url());
        println!();
        println!("Commands: /help  /new  /quit");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /new             - Start a new conversation");
                println!("  /session         - Show the current session id");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/new" => {
                self.client.reset_session();
                println!("Started a new conversation.");
                false
            }
            "/session" => {
                println!("{}", self.client.session_id());
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_message(&self, message: &str) {
        let spinner = self.show_progress.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("AIda is thinking...");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        let reply = match self.client.send(message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Chat request failed");
                CONNECTION_ERROR_MESSAGE.red().to_string()
            }
        };

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        println!();
        println!("{} {}", "AIda>".cyan().bold(), reply);
        println!();
    }
}
