//! TUI-less "say" command

use std::cell::RefCell;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::core::config::data::Config;
use crate::core::conversation::Conversation;
use crate::core::orchestrator::{SubmitOutcome, Submission};
use crate::core::session::{build_session, SessionOverrides};
use crate::core::steps::{AgentStep, StepStatus};
use crate::core::store::SharedState;
use crate::ui::theme::ThemeStyles;
use crate::ui::widgets::{lines_to_plain, message_lines};
use crate::utils::attachment::load_image;
use crate::utils::logging::LoggingState;
use ratatui::crossterm::terminal;

pub async fn run_say(
    prompt: Vec<String>,
    image: Option<PathBuf>,
    overrides: SessionOverrides,
    log_file: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let image = match image {
        Some(path) => Some(load_image(&path)?),
        None => None,
    };
    let submission = Submission {
        text: prompt.join(" "),
        image,
    };
    if submission.is_empty() {
        eprintln!("Usage: vibe say [--image PATH] <prompt>");
        std::process::exit(1);
    }

    let config = Config::load()?;
    let session = match build_session(&config, &overrides, Conversation::new()) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    };
    let logging = LoggingState::new(log_file)?;

    let printer = StepPrinter::default();
    let _progress = session
        .store()
        .subscribe(move |state: &SharedState| printer.observe(state));

    let outcome = session.submit(submission).await;
    let SubmitOutcome::Completed { failed, .. } = outcome else {
        return Ok(());
    };

    for message in session.conversation().snapshot() {
        logging.log_message(&message)?;
    }

    let state = session.store().get_state();
    if let Some(reply) = session.conversation().last() {
        let width = terminal::size().map(|(w, _)| w).unwrap_or(80);
        let lines = message_lines(&reply, &ThemeStyles::for_theme(state.theme), width);
        let rendered = lines_to_plain(&lines);
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", rendered.trim_end())?;
        stdout.flush()?;
    }
    eprintln!("theme: {}", state.theme.as_str());

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Prints one stderr line per step status change.
#[derive(Default)]
struct StepPrinter {
    seen: RefCell<Vec<(String, StepStatus)>>,
}

impl StepPrinter {
    fn observe(&self, state: &SharedState) {
        let mut seen = self.seen.borrow_mut();
        for step in &state.steps {
            let known = seen.iter_mut().find(|(id, _)| *id == step.id);
            let changed = match known {
                Some((_, status)) if *status == step.status => false,
                Some((_, status)) => {
                    *status = step.status;
                    true
                }
                None => {
                    seen.push((step.id.clone(), step.status));
                    step.status != StepStatus::Idle
                }
            };
            if changed {
                eprintln!("{}", progress_line(step));
            }
        }
    }
}

fn progress_line(step: &AgentStep) -> String {
    let marker = match step.status {
        StepStatus::Idle => "·",
        StepStatus::Processing => "…",
        StepStatus::Complete => "✓",
        StepStatus::Error => "✗",
    };
    format!("{marker} {} {}", step.icon, step.label)
}
