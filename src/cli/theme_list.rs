use crate::core::config::data::Config;
use crate::core::theme::Theme;

pub fn list_themes() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let current = config.theme();

    println!("Available themes:\n");
    for theme in Theme::ALL {
        let mark = if theme == current { "*" } else { " " };
        println!("  {} {} - {}", mark, theme.as_str(), theme.display_name());
    }

    match config.theme {
        Some(theme) => println!("\nCurrent: {}", theme.as_str()),
        None => println!("\nCurrent: (default: {})", current.as_str()),
    }
    Ok(())
}
