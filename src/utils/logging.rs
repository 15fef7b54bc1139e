use crate::core::message::{Author, ConversationMessage, Payload};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends the conversation to a plain-text transcript file.
#[derive(Debug, Default)]
pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    /// A path given up front starts logging immediately.
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut logging = LoggingState::default();
        if let Some(path) = log_file {
            logging.set_log_file(path)?;
        }
        Ok(logging)
    }

    pub fn set_log_file(&mut self, path: String) -> Result<String, Box<dyn std::error::Error>> {
        self.test_file_access(&path)?;

        self.file_path = Some(path.clone());
        self.is_active = true;

        Ok(format!("Log ativado em: {path}"))
    }

    pub fn toggle_logging(&mut self) -> Result<String, Box<dyn std::error::Error>> {
        match &self.file_path {
            Some(path) => {
                if self.is_active {
                    self.write_to_log("## Log pausado")?;
                    self.is_active = false;
                    Ok(format!("Log pausado (arquivo: {path})"))
                } else {
                    self.is_active = true;
                    Ok(format!("Log retomado em: {path}"))
                }
            }
            None => {
                Err("Nenhum arquivo de log definido. Use /log <arquivo> para ativar o log.".into())
            }
        }
    }

    pub fn log_message(
        &self,
        message: &ConversationMessage,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !self.is_active {
            return Ok(());
        }
        self.write_to_log(&transcript_entry(message))
    }

    fn write_to_log(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(file_path) = self.file_path.as_ref() else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }
        // Blank line between entries, matching the screen.
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn get_status_string(&self) -> String {
        match (&self.file_path, self.is_active) {
            (None, _) => "desativado".to_string(),
            (Some(path), true) => format!("ativo ({})", file_name(path)),
            (Some(path), false) => format!("pausado ({})", file_name(path)),
        }
    }

    fn test_file_access(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

/// Plain-text form of a message as written to the transcript.
pub fn transcript_entry(message: &ConversationMessage) -> String {
    let mut entry = match message.author {
        Author::User => format!("Você: {}", message.text),
        Author::Assistant => message.text.clone(),
    };

    match &message.payload {
        Some(Payload::Chart(chart)) => {
            entry.push_str(&format!("\n[chart] {}", chart.title));
            for item in &chart.items {
                entry.push_str(&format!("\n  {}: {}", item.name, item.value));
            }
        }
        Some(Payload::Tracker(tracker)) => {
            entry.push_str(&format!(
                "\n[tracker] {} {} ({})",
                tracker.label, tracker.price, tracker.change
            ));
        }
        Some(Payload::Palette(palette)) => {
            entry.push_str(&format!("\n[palette] {}", palette.colors.join(", ")));
        }
        Some(Payload::Alert(data)) => {
            entry.push_str(&format!("\n[!] ERROR_LOG_DATA: {data}"));
        }
        None => {}
    }
    entry
}
