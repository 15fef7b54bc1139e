use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::interpreter::InterpretedResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

impl Author {
    pub fn as_str(self) -> &'static str {
        match self {
            Author::User => "user",
            Author::Assistant => "assistant",
        }
    }
}

/// How a message body should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    #[default]
    Plain,
    Chart,
    Tracker,
    Palette,
    Alert,
}

impl RenderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RenderKind::Plain => "plain",
            RenderKind::Chart => "chart",
            RenderKind::Tracker => "tracker",
            RenderKind::Palette => "palette",
            RenderKind::Alert => "alert",
        }
    }

    /// Map the `type` field of a reply envelope. Unknown or missing kinds
    /// render as plain text.
    pub fn from_envelope_type(kind: Option<&str>) -> Self {
        match kind.map(str::trim) {
            Some("chart") => RenderKind::Chart,
            Some("tracker") => RenderKind::Tracker,
            Some("palette") => RenderKind::Palette,
            Some("system-alert") => RenderKind::Alert,
            _ => RenderKind::Plain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartItem {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub title: String,
    pub items: Vec<ChartItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerData {
    #[serde(deserialize_with = "string_or_number")]
    pub label: String,
    #[serde(deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(deserialize_with = "string_or_number")]
    pub change: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteData {
    pub colors: Vec<String>,
}

/// Kind-specific structured data attached to a message.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Chart(ChartData),
    Tracker(TrackerData),
    Palette(PaletteData),
    /// Diagnostic data shown verbatim.
    Alert(serde_json::Value),
}

impl Payload {
    pub fn kind(&self) -> RenderKind {
        match self {
            Payload::Chart(_) => RenderKind::Chart,
            Payload::Tracker(_) => RenderKind::Tracker,
            Payload::Palette(_) => RenderKind::Palette,
            Payload::Alert(_) => RenderKind::Alert,
        }
    }
}

// Models sometimes emit prices as bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(text) => text,
        Loose::Number(number) => number.to_string(),
    })
}

/// Opaque, process-unique message identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

static NEXT_MESSAGE_SEQ: AtomicU64 = AtomicU64::new(1);

impl MessageId {
    pub fn generate() -> Self {
        let seq = NEXT_MESSAGE_SEQ.fetch_add(1, Ordering::Relaxed);
        MessageId(format!("{:x}-{:04x}", Utc::now().timestamp_millis(), seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationMessage {
    pub id: MessageId,
    pub author: Author,
    pub text: String,
    pub kind: RenderKind,
    pub payload: Option<Payload>,
    pub created_at: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            author,
            text: text.into(),
            kind: RenderKind::Plain,
            payload: None,
            created_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Author::Assistant, text)
    }

    pub fn from_response(response: InterpretedResponse) -> Self {
        let InterpretedResponse {
            kind,
            text,
            payload,
            ..
        } = response;
        Self {
            kind,
            payload,
            ..Self::assistant(text)
        }
    }

    pub fn is_user(&self) -> bool {
        self.author == Author::User
    }
}
