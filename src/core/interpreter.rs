//! Recovery of structured render commands from free-form model output.
//!
//! The model is asked to answer data-bearing prompts with a small JSON
//! envelope, but nothing enforces that: replies may wrap the envelope in
//! prose, omit it, or emit something truncated. [`interpret`] is total and
//! always produces something displayable.

use memchr::memchr;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

use crate::core::constants::{LEGACY_CHART_TEXT, PROCESSED_PLACEHOLDER};
use crate::core::message::{ChartData, ChartItem, PaletteData, Payload, RenderKind, TrackerData};
use crate::core::theme::Theme;

/// Result of interpreting one model reply.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretedResponse {
    pub kind: RenderKind,
    pub text: String,
    pub payload: Option<Payload>,
    /// Present whenever an envelope was decoded; `None` for plain fallbacks.
    pub theme_hint: Option<Theme>,
}

impl InterpretedResponse {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: RenderKind::Plain,
            text: text.into(),
            payload: None,
            theme_hint: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: Option<String>,
    content: Option<String>,
    data: Option<Value>,
    #[serde(rename = "themeShift")]
    theme_shift: Option<Value>,
    /// Only the legacy chart shape carries this; any JSON value is tolerated.
    title: Option<Value>,
}

/// Why a reply carried no usable envelope.
#[derive(Debug)]
pub enum Unstructured {
    /// No balanced `{ ... }` region exists.
    NoObject,
    /// The first balanced region is not a decodable envelope.
    Malformed(serde_json::Error),
}

impl fmt::Display for Unstructured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unstructured::NoObject => write!(f, "no JSON object in reply"),
            Unstructured::Malformed(err) => write!(f, "malformed JSON envelope: {err}"),
        }
    }
}

/// Locate the first brace-delimited region whose braces balance, skipping
/// braces inside JSON string literals.
///
/// Only the first `{` is considered. If it never closes the reply is treated
/// as unstructured instead of decoding some inner fragment.
pub fn find_balanced_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = memchr(b'{', bytes)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    // Braces are ASCII so both ends sit on char boundaries.
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

fn extract_envelope(raw: &str) -> Result<Envelope, Unstructured> {
    let region = find_balanced_object(raw).ok_or(Unstructured::NoObject)?;
    serde_json::from_str::<Envelope>(region).map_err(Unstructured::Malformed)
}

/// Interpret a raw model reply. Never fails; anything that cannot be decoded
/// comes back as plain text carrying the whole original reply.
pub fn interpret(raw: &str) -> InterpretedResponse {
    match extract_envelope(raw) {
        Ok(envelope) => from_envelope(envelope),
        Err(reason) => {
            debug!(%reason, "reply rendered as plain text");
            InterpretedResponse::plain(raw)
        }
    }
}

fn from_envelope(envelope: Envelope) -> InterpretedResponse {
    let Envelope {
        kind,
        content,
        data,
        theme_shift,
        title,
    } = envelope;

    let theme_hint = Some(Theme::from_hint(theme_shift.as_ref().and_then(Value::as_str)));
    let kind = RenderKind::from_envelope_type(kind.as_deref());

    let legacy_chart = kind == RenderKind::Chart && matches!(data, Some(Value::Array(_)));
    let text = content.unwrap_or_else(|| {
        if legacy_chart {
            LEGACY_CHART_TEXT.to_string()
        } else {
            PROCESSED_PLACEHOLDER.to_string()
        }
    });

    let payload = match kind {
        RenderKind::Plain => None,
        RenderKind::Alert => Some(Payload::Alert(data.unwrap_or(Value::Null))),
        RenderKind::Chart => {
            let title = title.as_ref().and_then(Value::as_str).map(str::to_string);
            decode_chart(data, title).map(Payload::Chart)
        }
        RenderKind::Tracker => decode_tracker(data).map(Payload::Tracker),
        RenderKind::Palette => decode_palette(data).map(Payload::Palette),
    };

    // A widget without its data is shown as the envelope text instead.
    let kind = match &payload {
        Some(payload) => payload.kind(),
        None => {
            if kind != RenderKind::Plain {
                debug!(kind = kind.as_str(), "envelope data did not match its kind");
            }
            RenderKind::Plain
        }
    };

    InterpretedResponse {
        kind,
        text,
        payload,
        theme_hint,
    }
}

fn decode_chart(data: Option<Value>, title: Option<String>) -> Option<ChartData> {
    match data? {
        Value::Array(items) => {
            let items = serde_json::from_value::<Vec<ChartItem>>(Value::Array(items)).ok()?;
            Some(ChartData {
                title: title.unwrap_or_default(),
                items,
            })
        }
        Value::Object(mut map) => {
            // Older prompts nested the rows under `data` instead of `items`.
            if !map.contains_key("items") {
                if let Some(rows) = map.remove("data") {
                    map.insert("items".to_string(), rows);
                }
            }
            let mut chart = serde_json::from_value::<ChartData>(Value::Object(map)).ok()?;
            if chart.title.is_empty() {
                chart.title = title.unwrap_or_default();
            }
            Some(chart)
        }
        _ => None,
    }
}

fn decode_tracker(data: Option<Value>) -> Option<TrackerData> {
    serde_json::from_value(data?).ok()
}

fn decode_palette(data: Option<Value>) -> Option<PaletteData> {
    match data? {
        Value::Array(colors) => {
            let colors = serde_json::from_value::<Vec<String>>(Value::Array(colors)).ok()?;
            Some(PaletteData { colors })
        }
        other => serde_json::from_value(other).ok(),
    }
}
