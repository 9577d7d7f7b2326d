//! Turning styled text into a printable string.

use console::Style;
use serde::{Deserialize, Serialize};

use crate::style::Attributes;
use crate::styled::StyledText;

/// How [`StyledText`] is written out.
///
/// Terminals can show weight and color but not family or size; those two
/// are only visible in [`TermDebug`](OutputMode::TermDebug) and
/// [`Json`](OutputMode::Json) output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// ANSI styling if stdout supports colors, plain text otherwise.
    #[default]
    Auto,
    /// Always emit ANSI styling.
    Term,
    /// Plain text, no styling.
    Text,
    /// Every run wrapped in a readable `[family/size/bold/color]...[/]` tag.
    TermDebug,
    /// The runs as pretty-printed JSON.
    Json,
}

impl OutputMode {
    /// Whether this mode writes ANSI escape codes.
    pub fn should_use_color(&self) -> bool {
        match self {
            OutputMode::Auto => console::colors_enabled(),
            OutputMode::Term => true,
            OutputMode::Text | OutputMode::TermDebug | OutputMode::Json => false,
        }
    }

    /// Whether this mode writes the tagged debug form.
    pub fn is_debug(&self) -> bool {
        matches!(self, OutputMode::TermDebug)
    }

    /// Formats `text` for this mode.
    ///
    /// # Example
    ///
    /// ```rust
    /// use richmark::{Attributes, OutputMode, StyledText};
    ///
    /// let text = StyledText::new("hi", Attributes::default().with_bold(true));
    /// assert_eq!(OutputMode::Text.format(&text).unwrap(), "hi");
    /// assert_eq!(
    ///     OutputMode::TermDebug.format(&text).unwrap(),
    ///     "[Helvetica/24/bold/black]hi[/]"
    /// );
    /// ```
    pub fn format(&self, text: &StyledText) -> Result<String, serde_json::Error> {
        if *self == OutputMode::Json {
            serde_json::to_string_pretty(text)
        } else if self.is_debug() {
            Ok(format_debug(text))
        } else if self.should_use_color() {
            Ok(format_ansi(text))
        } else {
            Ok(text.to_string())
        }
    }
}

/// Builds the terminal style for an attribute set.
///
/// Only `bold` and `color` have a terminal form.
pub fn terminal_style(attrs: &Attributes) -> Style {
    let style = Style::new().force_styling(true).fg(attrs.color.to_console());
    if attrs.bold {
        style.bold()
    } else {
        style
    }
}

fn format_ansi(text: &StyledText) -> String {
    let mut out = String::with_capacity(text.len());
    for run in text.runs() {
        match run.attributes() {
            Some(attrs) => out.push_str(&terminal_style(attrs).apply_to(run.text()).to_string()),
            None => out.push_str(run.text()),
        }
    }
    out
}

fn format_debug(text: &StyledText) -> String {
    let mut out = String::new();
    for run in text.runs() {
        match run.attributes() {
            Some(attrs) => {
                out.push('[');
                out.push_str(&debug_tag(attrs));
                out.push(']');
                out.push_str(run.text());
                out.push_str("[/]");
            }
            None => out.push_str(run.text()),
        }
    }
    out
}

fn debug_tag(attrs: &Attributes) -> String {
    let mut parts = vec![attrs.family.clone(), attrs.size.to_string()];
    if attrs.bold {
        parts.push("bold".to_string());
    }
    parts.push(attrs.color.to_string());
    parts.join("/")
}
