//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;
pub mod settings;
pub mod theme_list;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::say::run_say;
use crate::cli::settings::{run_set, run_unset};
use crate::cli::theme_list::list_themes;
use crate::core::session::SessionOverrides;
use crate::ui::chat_loop::run_chat;
use crate::utils::diagnostics::{init_tracing, LogTarget};

#[derive(Parser)]
#[command(name = "vibe", version)]
#[command(about = "VIBE_OS Architect: a generative-UI chat panel for the terminal")]
#[command(
    long_about = "VIBE_OS Architect is a full-screen terminal chat panel. Replies that carry a \
structured envelope are rendered as charts, price trackers, color palettes or alerts, and may \
shift the global theme.\n\n\
Environment Variables:\n\
  VIBE_API_KEY      API key (falls back to GEMINI_API_KEY, then API_KEY)\n\
  VIBE_LOG          Diagnostic log filter, e.g. \"vibe_architect=debug\" (default: warn)\n\n\
Controls:\n\
  Enter             Send the message\n\
  Up/Down/PgUp/PgDn Scroll through the conversation\n\
  Esc, Ctrl+C       Quit the application\n\n\
Commands:\n\
  /attach <path>    Attach an image to the next message\n\
  /theme <id>       Switch theme (obsidian, trust-blue, cyberpunk-neon, glass-white)\n\
  /log <filename>   Enable logging to specified file\n\
  /log              Toggle logging pause/resume\n\
  /clear            Start a fresh conversation"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to use instead of the configured one
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature (0.0 to 2.0)
    #[arg(long, global = true, value_name = "VALUE")]
    pub temperature: Option<f32>,

    /// Enable transcript logging to specified file
    #[arg(short = 'l', long, global = true)]
    pub log: Option<String>,

    /// Write diagnostic logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub debug_log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send a single prompt and print the reply without the TUI
    Say {
        /// Image to send along with the prompt
        #[arg(long, value_name = "PATH")]
        image: Option<PathBuf>,
        /// Prompt text
        #[arg(trailing_var_arg = true)]
        prompt: Vec<String>,
    },
    /// List available themes
    Themes,
    /// Set configuration values, or show them all when no key is given
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key (multiple words are joined)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let interactive = matches!(args.command, None | Some(Commands::Chat));
    init_tracing(&LogTarget::select(args.debug_log.clone(), interactive))?;

    // Store and conversation handles are single-threaded.
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    let overrides = SessionOverrides {
        model: args.model,
        temperature: args.temperature,
    };

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => run_chat(overrides, args.log).await,
        Commands::Say { image, prompt } => run_say(prompt, image, overrides, args.log).await,
        Commands::Themes => list_themes(),
        Commands::Set { key, value } => {
            match run_set(key, value) {
                Ok(message) if !message.is_empty() => println!("{message}"),
                Ok(_) => {}
                Err(err) => {
                    err.print();
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            match run_unset(key) {
                Ok(message) => println!("{message}"),
                Err(err) => {
                    err.print();
                    std::process::exit(1);
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_is_the_default_command() {
        let args = Args::try_parse_from(["vibe"]).expect("parse");
        assert!(args.command.is_none());
    }

    #[test]
    fn say_collects_prompt_words_and_image() {
        let args = Args::try_parse_from([
            "vibe", "say", "--image", "foto.png", "qual", "é", "a", "cor?",
        ])
        .expect("parse");
        match args.command {
            Some(Commands::Say { image, prompt }) => {
                assert_eq!(image, Some(PathBuf::from("foto.png")));
                assert_eq!(prompt.join(" "), "qual é a cor?");
            }
            _ => panic!("expected say"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let args = Args::try_parse_from([
            "vibe",
            "say",
            "-m",
            "gemini-test",
            "--temperature",
            "0.2",
            "oi",
        ])
        .expect("parse");
        assert_eq!(args.model.as_deref(), Some("gemini-test"));
        assert_eq!(args.temperature, Some(0.2));
    }

    #[test]
    fn set_accepts_multi_word_values() {
        let args = Args::try_parse_from(["vibe", "set", "system-instruction", "Seja", "breve"])
            .expect("parse");
        match args.command {
            Some(Commands::Set { key, value }) => {
                assert_eq!(key.as_deref(), Some("system-instruction"));
                assert_eq!(value, vec!["Seja".to_string(), "breve".to_string()]);
            }
            _ => panic!("expected set"),
        }
    }
}
