use crate::core::conversation::Conversation;
use crate::core::steps::{AgentStep, StepStatus};
use crate::core::store::SharedState;
use crate::ui::chat_loop::view::ChatView;
use crate::ui::theme::ThemeStyles;
use crate::ui::widgets::message_lines;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

const PULSE: [&str; 3] = ["○", "◐", "●"];

pub fn ui(
    f: &mut Frame,
    view: &mut ChatView,
    state: &SharedState,
    conversation: &Conversation,
    model: &str,
) {
    let styles = ThemeStyles::for_theme(state.theme);
    f.render_widget(
        Block::default().style(Style::default().bg(styles.background_color)),
        f.area(),
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(rows[0]);

    render_transcript(f, columns[0], view, &styles, conversation, model);
    render_side_panel(f, columns[1], view, &styles, state);
    render_input(f, rows[1], view, &styles, state.is_busy);
}

fn render_transcript(
    f: &mut Frame,
    area: Rect,
    view: &mut ChatView,
    styles: &ThemeStyles,
    conversation: &Conversation,
    model: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.border_style)
        .title(Span::styled(
            format!(
                " VIBE_OS Architect • {} • Log: {} ",
                model,
                view.logging.get_status_string()
            ),
            styles.title_style,
        ));
    let inner = block.inner(area);

    let lines: Vec<Line<'static>> = conversation.read(|messages| {
        messages
            .iter()
            .flat_map(|message| message_lines(message, styles, inner.width))
            .collect()
    });

    // Rows are pre-wrapped, so the line count is exact.
    let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let offset = view.clamp_scroll(total, inner.height);

    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(styles.background_color))
            .scroll((offset, 0)),
        area,
    );
}

fn render_side_panel(
    f: &mut Frame,
    area: Rect,
    view: &ChatView,
    styles: &ThemeStyles,
    state: &SharedState,
) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Tema: ", styles.muted_text_style),
            Span::styled(state.theme.display_name(), styles.title_style),
        ]),
        Line::from(""),
    ];

    if state.steps.is_empty() {
        lines.push(Line::from(Span::styled(
            "Aguardando comando…",
            styles.muted_text_style,
        )));
    } else {
        let pulse = pulse_symbol(view.pulse_start);
        lines.extend(state.steps.iter().map(|step| step_line(step, styles, pulse)));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            progress_label(&state.steps),
            styles.muted_text_style,
        )));
    }

    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(styles.border_style)
                    .title(Span::styled(" Agente ", styles.title_style)),
            )
            .style(Style::default().bg(styles.background_color)),
        area,
    );
}

fn step_line(step: &AgentStep, styles: &ThemeStyles, pulse: &'static str) -> Line<'static> {
    let (glyph, style) = status_glyph(step.status, styles, pulse);
    Line::from(vec![
        Span::styled(format!("{glyph} "), style),
        Span::raw(format!("{} ", step.icon)),
        Span::styled(step.label.clone(), style),
    ])
}

fn progress_label(steps: &[AgentStep]) -> String {
    let done = steps.iter().filter(|step| step.status.is_terminal()).count();
    format!("Etapas: {done}/{}", steps.len())
}

fn status_glyph(
    status: StepStatus,
    styles: &ThemeStyles,
    pulse: &'static str,
) -> (&'static str, Style) {
    match status {
        StepStatus::Idle => ("·", styles.muted_text_style),
        StepStatus::Processing => (pulse, styles.busy_indicator_style),
        StepStatus::Complete => ("✓", styles.gain_style),
        StepStatus::Error => ("✗", styles.loss_style),
    }
}

fn pulse_symbol(start: Instant) -> &'static str {
    let elapsed = start.elapsed().as_millis() as f32 / 1000.0;
    let phase = (elapsed * 2.0) % 2.0;
    let intensity = if phase < 1.0 { phase } else { 2.0 - phase };
    if intensity < 0.33 {
        PULSE[0]
    } else if intensity < 0.66 {
        PULSE[1]
    } else {
        PULSE[2]
    }
}

fn render_input(
    f: &mut Frame,
    area: Rect,
    view: &mut ChatView,
    styles: &ThemeStyles,
    busy: bool,
) {
    let title = input_title(view, busy);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles.border_style)
        .title(Span::styled(title, styles.muted_text_style));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let indicator_width = if busy { 14 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(indicator_width)])
        .split(inner);

    view.textarea.set_style(styles.input_text_style);
    view.textarea.set_cursor_style(styles.input_cursor_style);
    view.textarea.set_cursor_line_style(Style::default());
    f.render_widget(&view.textarea, chunks[0]);

    if busy {
        let indicator = format!("{} processando", pulse_symbol(view.pulse_start));
        f.render_widget(
            Paragraph::new(Span::styled(indicator, styles.busy_indicator_style)),
            chunks[1],
        );
    }
}

fn input_title(view: &ChatView, busy: bool) -> String {
    let mut title = match &view.notice {
        Some(notice) => format!(" {notice} "),
        None if busy => " Aguarde a resposta… (Esc para sair) ".to_string(),
        None => " Enter envia • /attach /theme /log /clear • Esc sai ".to_string(),
    };
    if let Some(name) = view.staged_image_name() {
        title.push_str(&format!("📎 {name} "));
    }
    title
}
