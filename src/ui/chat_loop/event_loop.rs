use std::cell::Cell;
use std::error::Error;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::core::config::Config;
use crate::core::conversation::Conversation;
use crate::core::orchestrator::{SubmitOutcome, Submission};
use crate::core::session::{build_session, Session, SessionOverrides};
use crate::ui::chat_loop::commands::{execute, parse_command};
use crate::ui::chat_loop::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};
use crate::ui::chat_loop::view::ChatView;
use crate::ui::renderer::ui;
use crate::utils::logging::LoggingState;

const TICK: Duration = Duration::from_millis(80);

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

#[derive(Debug, PartialEq)]
enum LoopAction {
    Continue,
    Submit(Submission),
    Quit,
}

type InFlight<'a> = Option<LocalBoxFuture<'a, SubmitOutcome>>;

/// Terminal input is read on a plain thread so the single-threaded runtime
/// never blocks on it. The thread ends once the receiver is gone.
fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        if event_tx.is_closed() {
            break;
        }
        match event::poll(Duration::from_millis(50)) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => continue,
            },
            Ok(false) => {}
            Err(_) => break,
        }
    })
}

pub async fn run_chat(
    overrides: SessionOverrides,
    log: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let session = match build_session(&config, &overrides, Conversation::with_greeting()) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    };

    let mut view = ChatView::new(LoggingState::new(log)?);
    view.log_new_messages(session.conversation());

    let dirty = Rc::new(Cell::new(true));
    let _redraw = {
        let dirty = dirty.clone();
        session.store().subscribe(move |_| dirty.set(true))
    };

    let mut terminal = setup_terminal()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let _reader = spawn_event_reader(event_tx);

    let result = drive(&session, &mut view, &mut terminal, &mut event_rx, &dirty).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn drive(
    session: &Session,
    view: &mut ChatView,
    terminal: &mut ChatTerminal,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    dirty: &Cell<bool>,
) -> Result<(), Box<dyn Error>> {
    let mut in_flight: InFlight<'_> = None;
    let mut ticker = tokio::time::interval(TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        if dirty.replace(false) {
            let state = session.store().get_state();
            let model = session.generator().model();
            terminal.draw(|f| ui(f, view, &state, session.conversation(), model))?;
        }

        tokio::select! {
            received = event_rx.recv() => {
                let Some(UiEvent::Crossterm(event)) = received else {
                    return Ok(());
                };
                match handle_event(event, view, session, in_flight.is_some()) {
                    LoopAction::Quit => return Ok(()),
                    LoopAction::Submit(submission) => {
                        in_flight = Some(session.submit(submission).boxed_local());
                    }
                    LoopAction::Continue => {}
                }
                dirty.set(true);
            }
            outcome = poll_in_flight(&mut in_flight), if in_flight.is_some() => {
                in_flight = None;
                debug!(?outcome, "run finished");
                view.log_new_messages(session.conversation());
                view.auto_scroll = true;
                dirty.set(true);
            }
            _ = ticker.tick() => {
                // Keeps the pulse indicator moving.
                if in_flight.is_some() {
                    dirty.set(true);
                }
            }
        }
    }
}

async fn poll_in_flight(in_flight: &mut InFlight<'_>) -> SubmitOutcome {
    match in_flight.as_mut() {
        Some(run) => run.await,
        None => std::future::pending().await,
    }
}

fn handle_event(
    event: Event,
    view: &mut ChatView,
    session: &Session,
    running: bool,
) -> LoopAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            handle_key(key, view, session, running)
        }
        Event::Paste(text) => {
            view.textarea.insert_str(text.replace(['\r', '\n'], " "));
            LoopAction::Continue
        }
        _ => LoopAction::Continue,
    }
}

fn handle_key(
    key: KeyEvent,
    view: &mut ChatView,
    session: &Session,
    running: bool,
) -> LoopAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => LoopAction::Quit,
        KeyCode::Esc => LoopAction::Quit,
        KeyCode::Up => {
            view.scroll_up(1);
            LoopAction::Continue
        }
        KeyCode::Down => {
            view.scroll_down(1);
            LoopAction::Continue
        }
        KeyCode::PageUp => {
            view.scroll_up(view.page_rows());
            LoopAction::Continue
        }
        KeyCode::PageDown => {
            view.scroll_down(view.page_rows());
            LoopAction::Continue
        }
        KeyCode::Enter => submit_input(view, session, running),
        _ => {
            view.textarea.input(tui_textarea::Input::from(key));
            LoopAction::Continue
        }
    }
}

fn submit_input(view: &mut ChatView, session: &Session, running: bool) -> LoopAction {
    let text = view.take_input();

    if let Some(command) = parse_command(&text) {
        let notice = execute(
            command,
            view,
            session.store(),
            session.conversation(),
            running,
        );
        view.notice = Some(notice);
        return LoopAction::Continue;
    }

    let submission = Submission {
        text,
        image: view.staged_image.take(),
    };
    if submission.is_empty() {
        return LoopAction::Continue;
    }
    if running || session.store().get_state().is_busy {
        // Keep what the user typed; one run at a time.
        view.textarea.insert_str(&submission.text);
        view.staged_image = submission.image;
        view.notice = Some("Aguarde: uma resposta ainda está em processamento".to_string());
        return LoopAction::Continue;
    }

    view.notice = None;
    view.auto_scroll = true;
    LoopAction::Submit(submission)
}
