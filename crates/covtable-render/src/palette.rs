//! Styling of classified cells.
//!
//! A [`Palette`] maps each [`Classification`] to a `console::Style`. The
//! [`TextMode`] decides whether the style is applied as ANSI codes, dropped,
//! or shown as `[name]text[/name]` tags.
//!
//! Styling is applied to a cell after its content has been padded or
//! truncated, so escape codes never take part in width calculations.
//!
//! ```rust
//! use covtable_render::{Classification, Palette, TextMode};
//!
//! let palette = Palette::default();
//! assert_eq!(palette.paint("50", Some(Classification::Low), TextMode::Plain), "50");
//! assert_eq!(
//!     palette.paint("50", Some(Classification::Low), TextMode::Debug),
//!     "[low]50[/low]"
//! );
//! ```

use std::collections::HashMap;

use console::{Style, Term};
use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::error::RenderError;

/// How classification styles end up in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Apply styles as ANSI escape codes
    Styled,
    /// No decoration
    #[default]
    Plain,
    /// Keep the classification visible as `[name]text[/name]`
    Debug,
}

/// User-facing color setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color console output when the terminal supports it
    #[default]
    Auto,
    /// Always color console output
    Always,
    /// Never color
    Never,
}

impl ColorChoice {
    /// Resolves to a concrete text mode.
    ///
    /// Output that does not go to the console is always plain.
    pub fn resolve(&self, to_console: bool) -> TextMode {
        if !to_console {
            return TextMode::Plain;
        }
        match self {
            ColorChoice::Auto => {
                if Term::stdout().features().colors_supported() {
                    TextMode::Styled
                } else {
                    TextMode::Plain
                }
            }
            ColorChoice::Always => TextMode::Styled,
            ColorChoice::Never => TextMode::Plain,
        }
    }
}

/// Styles keyed by classification.
#[derive(Debug, Clone)]
pub struct Palette {
    styles: HashMap<Classification, Style>,
}

impl Palette {
    /// A palette with no styles; every cell renders undecorated.
    pub fn empty() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    /// Sets the style for a classification, returning `self` for chaining.
    pub fn add(mut self, class: Classification, style: Style) -> Self {
        self.styles.insert(class, style);
        self
    }

    /// Loads a palette from YAML, one dotted console style per class:
    ///
    /// ```yaml
    /// low: red.bold
    /// medium: yellow
    /// high: green
    /// ```
    ///
    /// Classes that are not listed keep their default style.
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        let raw: HashMap<String, String> = serde_yaml::from_str(yaml)?;
        let mut palette = Palette::default();
        for (name, dotted) in raw {
            let class: Classification = name.parse()?;
            palette = palette.add(class, Style::from_dotted_str(&dotted));
        }
        Ok(palette)
    }

    pub fn get(&self, class: Classification) -> Option<&Style> {
        self.styles.get(&class)
    }

    /// Decorates already formatted text according to its classification.
    pub fn paint(&self, text: &str, class: Option<Classification>, mode: TextMode) -> String {
        let Some(class) = class else {
            return text.to_string();
        };
        match mode {
            TextMode::Plain => text.to_string(),
            TextMode::Debug => format!("[{0}]{1}[/{0}]", class, text),
            TextMode::Styled => match self.styles.get(&class) {
                Some(style) => style
                    .clone()
                    .force_styling(true)
                    .apply_to(text)
                    .to_string(),
                None => text.to_string(),
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::empty()
            .add(Classification::Low, Style::new().red())
            .add(Classification::Medium, Style::new().yellow())
            .add(Classification::High, Style::new().green())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::measure_text_width;

    #[test]
    fn test_plain_mode_leaves_text_alone() {
        let palette = Palette::default();
        for class in Classification::ALL {
            assert_eq!(palette.paint(" 42", Some(class), TextMode::Plain), " 42");
        }
    }

    #[test]
    fn test_styled_mode_adds_ansi_without_changing_width() {
        let palette = Palette::default();
        let painted = palette.paint("  75", Some(Classification::High), TextMode::Styled);
        assert!(painted.contains("\x1b["));
        assert_eq!(measure_text_width(&painted), 4);
    }

    #[test]
    fn test_unclassified_text_is_never_styled() {
        let palette = Palette::default();
        assert_eq!(palette.paint("File", None, TextMode::Styled), "File");
        assert_eq!(palette.paint("File", None, TextMode::Debug), "File");
    }

    #[test]
    fn test_debug_mode_tags() {
        let palette = Palette::empty();
        assert_eq!(
            palette.paint("3,7", Some(Classification::Low), TextMode::Debug),
            "[low]3,7[/low]"
        );
    }

    #[test]
    fn test_missing_style_renders_plain() {
        let palette = Palette::empty();
        assert_eq!(
            palette.paint("x", Some(Classification::High), TextMode::Styled),
            "x"
        );
    }

    #[test]
    fn test_from_yaml_overrides_defaults() {
        let palette = Palette::from_yaml("low: magenta.bold\n").unwrap();
        assert_eq!(
            palette.get(Classification::Low),
            Some(&Style::new().magenta().bold())
        );
        assert_eq!(
            palette.get(Classification::High),
            Some(&Style::new().green())
        );
    }

    #[test]
    fn test_from_yaml_rejects_unknown_class() {
        let err = Palette::from_yaml("severe: red\n").unwrap_err();
        assert!(matches!(err, RenderError::UnknownClass(_)));
    }

    #[test]
    fn test_color_choice_for_files_is_plain() {
        assert_eq!(ColorChoice::Always.resolve(false), TextMode::Plain);
        assert_eq!(ColorChoice::Auto.resolve(false), TextMode::Plain);
    }

    #[test]
    fn test_color_choice_for_console() {
        assert_eq!(ColorChoice::Always.resolve(true), TextMode::Styled);
        assert_eq!(ColorChoice::Never.resolve(true), TextMode::Plain);
    }
}
