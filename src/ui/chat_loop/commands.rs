//! Slash commands typed into the chat input.

use std::path::Path;

use crate::core::conversation::Conversation;
use crate::core::store::VibeStore;
use crate::core::theme::Theme;
use crate::ui::chat_loop::view::ChatView;
use crate::utils::attachment::load_image;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Attach(String),
    Theme(String),
    Log(Option<String>),
    Clear,
    Unknown(String),
}

/// `None` when the input is an ordinary message.
pub fn parse_command(input: &str) -> Option<SlashCommand> {
    let trimmed = input.trim();
    let rest = trimmed.strip_prefix('/')?;
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    Some(match name.to_ascii_lowercase().as_str() {
        "attach" => SlashCommand::Attach(arg.to_string()),
        "theme" => SlashCommand::Theme(arg.to_string()),
        "log" if arg.is_empty() => SlashCommand::Log(None),
        "log" => SlashCommand::Log(Some(arg.to_string())),
        "clear" => SlashCommand::Clear,
        _ => SlashCommand::Unknown(name.to_string()),
    })
}

/// Run a command and return the notice to show.
pub fn execute(
    command: SlashCommand,
    view: &mut ChatView,
    store: &VibeStore,
    conversation: &Conversation,
    busy: bool,
) -> String {
    match command {
        SlashCommand::Attach(path) if path.is_empty() => {
            "Uso: /attach <caminho>".to_string()
        }
        SlashCommand::Attach(path) => match load_image(Path::new(&path)) {
            Ok(image) => {
                let name = image.file_name.clone().unwrap_or_else(|| path.clone());
                view.staged_image = Some(image);
                format!("Anexado {name}; será enviado com a próxima mensagem")
            }
            Err(err) => err.to_string(),
        },
        SlashCommand::Theme(id) if id.is_empty() => {
            let ids: Vec<&str> = Theme::ALL.iter().map(|theme| theme.as_str()).collect();
            format!("Uso: /theme <{}>", ids.join("|"))
        }
        SlashCommand::Theme(id) => match Theme::try_from(id.as_str()) {
            Ok(theme) => {
                store.set_theme(theme);
                format!("Tema alterado para {}", theme.display_name())
            }
            Err(_) => format!("Tema desconhecido: {id}"),
        },
        SlashCommand::Log(Some(path)) => match view.logging.set_log_file(path) {
            Ok(message) => message,
            Err(err) => format!("Erro de log: {err}"),
        },
        SlashCommand::Log(None) => match view.logging.toggle_logging() {
            Ok(message) => message,
            Err(err) => err.to_string(),
        },
        SlashCommand::Clear if busy => "Aguarde a resposta atual antes de limpar".to_string(),
        SlashCommand::Clear => {
            conversation.restart();
            view.reset_log_cursor();
            view.staged_image = None;
            "Conversa reiniciada".to_string()
        }
        SlashCommand::Unknown(name) => format!("Comando desconhecido: /{name}"),
    }
}
