use crate::core::theme::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Terminal styles for one of the global themes.
#[derive(Debug, Clone)]
pub struct ThemeStyles {
    // Overall background color to paint the full frame
    pub background_color: Color,
    pub accent: Color,
    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_text_style: Style,
    pub muted_text_style: Style,

    // Chrome
    pub title_style: Style,
    pub border_style: Style,
    pub busy_indicator_style: Style,

    // Structured replies
    pub chart_bar_style: Style,
    pub tracker_price_style: Style,
    pub gain_style: Style,
    pub loss_style: Style,
    pub alert_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_cursor_style: Style,
}

impl ThemeStyles {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Obsidian => Self::build(
                Color::Rgb(10, 10, 12),
                Color::Rgb(0, 242, 255),
                Color::Rgb(230, 230, 235),
                Color::Rgb(110, 110, 120),
            ),
            Theme::TrustBlue => Self::build(
                Color::Rgb(8, 20, 48),
                Color::Rgb(96, 165, 250),
                Color::Rgb(226, 236, 255),
                Color::Rgb(120, 140, 180),
            ),
            Theme::CyberpunkNeon => Self::build(
                Color::Rgb(12, 4, 20),
                Color::Rgb(188, 19, 254),
                Color::Rgb(0, 242, 255),
                Color::Rgb(140, 90, 170),
            ),
            Theme::GlassWhite => Self::build(
                Color::Rgb(245, 246, 248),
                Color::Rgb(40, 90, 200),
                Color::Rgb(30, 30, 36),
                Color::Rgb(130, 130, 140),
            ),
        }
    }

    fn build(background: Color, accent: Color, text: Color, muted: Color) -> Self {
        ThemeStyles {
            background_color: background,
            accent,
            user_prefix_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(accent),
            assistant_text_style: Style::default().fg(text),
            muted_text_style: Style::default().fg(muted),

            title_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            border_style: Style::default().fg(muted),
            busy_indicator_style: Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD),

            chart_bar_style: Style::default().fg(accent),
            tracker_price_style: Style::default().fg(text).add_modifier(Modifier::BOLD),
            gain_style: Style::default().fg(Color::Rgb(34, 197, 94)),
            loss_style: Style::default().fg(Color::Rgb(239, 68, 68)),
            alert_style: Style::default()
                .fg(Color::Rgb(239, 68, 68))
                .add_modifier(Modifier::BOLD),

            input_text_style: Style::default().fg(text),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// Parses a palette entry: `#rgb`, `#rrggbb`, `rgb(r, g, b)` or a named color.
pub fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if let Some(c) = parse_hex_color(&lower) {
        return Some(c);
    }
    if let Some(c) = parse_rgb_func(&lower) {
        return Some(c);
    }
    match lower.as_str() {
        "black" => Some(Color::Black),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "dark-grey" | "darkgray" => Some(Color::DarkGray),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "blue" => Some(Color::Blue),
        "cyan" => Some(Color::Cyan),
        "magenta" => Some(Color::Magenta),
        "yellow" => Some(Color::Yellow),
        _ => None,
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    if hex.len() == 3 {
        let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    } else {
        None
    }
}

fn parse_rgb_func(s: &str) -> Option<Color> {
    let content = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let parts: Vec<_> = content
        .split([',', ' '])
        .filter(|t| !t.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse::<u16>().ok()?;
    let g = parts[1].parse::<u16>().ok()?;
    let b = parts[2].parse::<u16>().ok()?;
    Some(Color::Rgb(
        r.min(255) as u8,
        g.min(255) as u8,
        b.min(255) as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(parse_color("#00f2ff"), Some(Color::Rgb(0, 242, 255)));
        assert_eq!(parse_color("#FFF"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_color("#12345"), None);
    }

    #[test]
    fn parses_rgb_function_and_clamps() {
        assert_eq!(
            parse_color("rgb(300, 10, 20)"),
            Some(Color::Rgb(255, 10, 20))
        );
        assert_eq!(parse_color("rgb(1,2)"), None);
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(parse_color(" Magenta "), Some(Color::Magenta));
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn non_ascii_hex_is_rejected() {
        assert_eq!(parse_color("#ééé"), None);
    }

    #[test]
    fn every_theme_has_distinct_background() {
        let mut seen = Vec::new();
        for theme in Theme::ALL {
            let styles = ThemeStyles::for_theme(theme);
            assert!(!seen.contains(&styles.background_color));
            seen.push(styles.background_color);
        }
    }
}
