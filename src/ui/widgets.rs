//! Line builders for conversation messages.
//!
//! Every render kind becomes a list of pre-wrapped `Line`s so the transcript
//! can count rows for scrolling, and `say` can print the same layout without
//! a terminal backend.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::message::{
    Author, ChartData, ConversationMessage, PaletteData, Payload, RenderKind, TrackerData,
};
use crate::ui::theme::{parse_color, ThemeStyles};

const USER_PREFIX: &str = "Você: ";
const BAR_GLYPH: char = '█';
const SWATCH: &str = "██";

/// Greedy word wrap measured in terminal cells. Words wider than `width` are
/// broken by character; explicit newlines are kept.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for source_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in source_line.split_whitespace() {
            let word_width = word.width();
            let gap = usize::from(!current.is_empty());

            if current_width + gap + word_width <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current.push_str(word);
                current_width += gap + word_width;
                continue;
            }

            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        out.push(current);
    }

    out
}

/// Lines for one message followed by a blank spacer line.
pub fn message_lines(
    message: &ConversationMessage,
    styles: &ThemeStyles,
    width: u16,
) -> Vec<Line<'static>> {
    let width = usize::from(width).max(1);
    let mut lines = match message.author {
        Author::User => user_lines(&message.text, styles, width),
        Author::Assistant => assistant_lines(message, styles, width),
    };
    lines.push(Line::from(""));
    lines
}

fn user_lines(text: &str, styles: &ThemeStyles, width: usize) -> Vec<Line<'static>> {
    let prefix_width = USER_PREFIX.width();
    let body_width = width.saturating_sub(prefix_width).max(1);
    wrap_words(text, body_width)
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            let prefix = if idx == 0 {
                Span::styled(USER_PREFIX, styles.user_prefix_style)
            } else {
                Span::raw(" ".repeat(prefix_width))
            };
            Line::from(vec![prefix, Span::styled(row, styles.user_text_style)])
        })
        .collect()
}

fn assistant_lines(
    message: &ConversationMessage,
    styles: &ThemeStyles,
    width: usize,
) -> Vec<Line<'static>> {
    let text_style = if message.kind == RenderKind::Alert {
        styles.alert_style
    } else {
        styles.assistant_text_style
    };
    let mut lines = styled_rows(&message.text, text_style, width);

    match &message.payload {
        Some(Payload::Chart(chart)) => lines.extend(chart_lines(chart, styles, width)),
        Some(Payload::Tracker(tracker)) => lines.extend(tracker_lines(tracker, styles)),
        Some(Payload::Palette(palette)) => lines.extend(palette_lines(palette, styles)),
        Some(Payload::Alert(data)) => lines.extend(alert_lines(data, styles, width)),
        None => {}
    }
    lines
}

fn styled_rows(text: &str, style: Style, width: usize) -> Vec<Line<'static>> {
    wrap_words(text, width)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, style)))
        .collect()
}

fn chart_lines(chart: &ChartData, styles: &ThemeStyles, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(chart.items.len() + 1);
    if !chart.title.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            format!("▌ {}", chart.title.trim()),
            styles.title_style,
        )));
    }
    if chart.items.is_empty() {
        lines.push(Line::from(Span::styled("(sem dados)", styles.muted_text_style)));
        return lines;
    }

    let labels: Vec<String> = chart.items.iter().map(|item| item.name.clone()).collect();
    let values: Vec<String> = chart
        .items
        .iter()
        .map(|item| format_value(item.value))
        .collect();
    let label_width = labels.iter().map(|l| l.width()).max().unwrap_or(0);
    let value_width = values.iter().map(|v| v.width()).max().unwrap_or(0);
    let bar_space = width.saturating_sub(label_width + value_width + 2).max(1);
    let max_value = chart
        .items
        .iter()
        .map(|item| item.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    for ((label, value), item) in labels.iter().zip(values.iter()).zip(chart.items.iter()) {
        let ratio = if max_value > 0.0 && item.value.is_finite() {
            (item.value / max_value).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let bar_len = (ratio * bar_space as f64).round() as usize;
        let pad = label_width.saturating_sub(label.width());
        lines.push(Line::from(vec![
            Span::styled(
                format!("{label}{} ", " ".repeat(pad)),
                styles.muted_text_style,
            ),
            Span::styled(
                BAR_GLYPH.to_string().repeat(bar_len),
                styles.chart_bar_style,
            ),
            Span::styled(format!(" {value}"), styles.assistant_text_style),
        ]));
    }
    lines
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

fn tracker_lines(tracker: &TrackerData, styles: &ThemeStyles) -> Vec<Line<'static>> {
    let change_style = if tracker.change.trim_start().starts_with('-') {
        styles.loss_style
    } else {
        styles.gain_style
    };
    let header = format!("{} / USD", tracker.label);
    let body_width = tracker.price.width() + 2 + tracker.change.width();
    let inner = header.width().max(body_width);
    let rule = "─".repeat(inner + 2);
    vec![
        Line::from(Span::styled(format!("┌{rule}┐"), styles.border_style)),
        Line::from(vec![
            Span::styled("│ ", styles.border_style),
            Span::styled(header.clone(), styles.muted_text_style),
            Span::raw(" ".repeat(inner - header.width())),
            Span::styled(" │", styles.border_style),
        ]),
        Line::from(vec![
            Span::styled("│ ", styles.border_style),
            Span::styled(tracker.price.clone(), styles.tracker_price_style),
            Span::raw("  "),
            Span::styled(tracker.change.clone(), change_style),
            Span::raw(" ".repeat(inner - body_width)),
            Span::styled(" │", styles.border_style),
        ]),
        Line::from(Span::styled(format!("└{rule}┘"), styles.border_style)),
    ]
}

fn palette_lines(palette: &PaletteData, styles: &ThemeStyles) -> Vec<Line<'static>> {
    palette
        .colors
        .iter()
        .map(|entry| match parse_color(entry) {
            Some(color) => Line::from(vec![
                Span::styled(SWATCH, Style::default().fg(color)),
                Span::styled(format!(" {entry}"), styles.assistant_text_style),
            ]),
            None => Line::from(vec![
                Span::styled("??", styles.muted_text_style),
                Span::styled(format!(" {entry}"), styles.muted_text_style),
            ]),
        })
        .collect()
}

fn alert_lines(data: &serde_json::Value, styles: &ThemeStyles, width: usize) -> Vec<Line<'static>> {
    styled_rows(&format!("[!] ERROR_LOG_DATA: {data}"), styles.alert_style, width)
}

/// Flatten styled lines to plain text, one row per line.
pub fn lines_to_plain(lines: &[Line<'_>]) -> String {
    let mut out = String::new();
    for line in lines {
        for span in &line.spans {
            out.push_str(&span.content);
        }
        out.push('\n');
    }
    out
}
