//! Modal dialog renderer for confirmations, alerts, the secret form and the
//! file path prompt.
//!
//! Dialogs are drawn as a bordered box centered over the table:
//!
//! ```text
//! ┌─ New secret ───────────────────┐
//! │ > Name:     db-password        │
//! │   Value:    ••••••••           │
//! │                                │
//! │ Tab next  Enter save  Esc      │
//! └────────────────────────────────┘
//! ```

use crate::ui::helpers::{fit, position_cursor, width_of};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FormView, Overlay};

const MIN_DIALOG_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Normal,
    Focused,
    Error,
    Hint,
}

/// A single line of dialog content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogLine {
    pub text: String,
    pub style: LineStyle,
}

impl DialogLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn blank() -> Self {
        Self::new("", LineStyle::Normal)
    }
}

/// Title and content lines for an overlay.
///
/// ```rust
/// use vault_explorer::ui::components::{dialog_lines, LineStyle};
/// use vault_explorer::ui::viewmodel::Overlay;
///
/// let (title, lines) = dialog_lines(&Overlay::Confirm { question: "Delete 'api-key'?".into() });
/// assert_eq!(title, " Confirm ");
/// assert_eq!(lines[0].text, "Delete 'api-key'?");
/// assert_eq!(lines.last().unwrap().style, LineStyle::Hint);
/// ```
#[must_use]
pub fn dialog_lines(overlay: &Overlay) -> (String, Vec<DialogLine>) {
    match overlay {
        Overlay::Confirm { question } => (
            " Confirm ".to_string(),
            vec![
                DialogLine::new(question.clone(), LineStyle::Normal),
                DialogLine::blank(),
                DialogLine::new("y yes  n no", LineStyle::Hint),
            ],
        ),
        Overlay::Alert { title, message } => {
            let mut lines: Vec<DialogLine> = message
                .lines()
                .map(|line| DialogLine::new(line, LineStyle::Error))
                .collect();
            lines.push(DialogLine::blank());
            lines.push(DialogLine::new("Enter dismiss", LineStyle::Hint));
            (title.clone(), lines)
        }
        Overlay::Form(form) => (form.title.clone(), form_lines(form)),
        Overlay::Prompt { title, path } => (
            title.clone(),
            vec![
                DialogLine::new(format!("Path: {path}▏"), LineStyle::Focused),
                DialogLine::blank(),
                DialogLine::new("Enter load  Esc cancel", LineStyle::Hint),
            ],
        ),
    }
}

fn form_lines(form: &FormView) -> Vec<DialogLine> {
    let mut lines: Vec<DialogLine> = form
        .fields
        .iter()
        .map(|field| {
            let label = fit(&format!("{}:", field.label), LABEL_WIDTH);
            if field.focused {
                DialogLine::new(format!("> {label}{}▏", field.value), LineStyle::Focused)
            } else {
                DialogLine::new(format!("  {label}{}", field.value), LineStyle::Normal)
            }
        })
        .collect();

    lines.push(DialogLine::blank());
    if let Some(error) = &form.error {
        lines.push(DialogLine::new(error.clone(), LineStyle::Error));
    }
    lines.push(DialogLine::new(
        "Tab next  ←/→ choose  ^v show  Enter save  Esc cancel",
        LineStyle::Hint,
    ));
    lines
}

/// Draws `overlay` centered in a `rows` x `cols` pane.
pub fn render_overlay(overlay: &Overlay, theme: &Theme, rows: usize, cols: usize) {
    let (title, lines) = dialog_lines(overlay);

    let content_width = lines
        .iter()
        .map(|line| width_of(&line.text))
        .chain(std::iter::once(width_of(&title) + 2))
        .max()
        .unwrap_or(0);
    let box_width = (content_width + 4)
        .max(MIN_DIALOG_WIDTH)
        .min(cols.saturating_sub(2))
        .max(4);
    let inner_width = box_width - 2;
    let box_height = lines.len() + 2;

    let top = rows.saturating_sub(box_height) / 2 + 1;
    let left = cols.saturating_sub(box_width) / 2 + 1;
    let border = Theme::fg(&theme.colors.dialog_border);

    let title_width = width_of(&title).min(inner_width.saturating_sub(1));
    position_cursor(top, left);
    print!("{border}┌─");
    print!("{}{}", Theme::bold(), fit(&title, title_width));
    print!("{}{border}", Theme::reset());
    print!("{}┐", "─".repeat(inner_width.saturating_sub(title_width + 1)));
    print!("{}", Theme::reset());

    for (offset, line) in lines.iter().enumerate() {
        position_cursor(top + 1 + offset, left);
        print!("{border}│{}", Theme::reset());
        match line.style {
            LineStyle::Normal => print!("{}", Theme::fg(&theme.colors.text_normal)),
            LineStyle::Focused => {
                print!("{}", Theme::bold());
                print!("{}", Theme::fg(&theme.colors.text_normal));
            }
            LineStyle::Error => print!("{}", Theme::fg(&theme.colors.error_fg)),
            LineStyle::Hint => print!("{}", Theme::fg(&theme.colors.text_dim)),
        }
        print!(" {}", fit(&line.text, inner_width.saturating_sub(1)));
        print!("{}", Theme::reset());
        print!("{border}│{}", Theme::reset());
    }

    position_cursor(top + box_height - 1, left);
    print!("{border}└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::viewmodel::FormFieldView;

    #[test]
    fn form_marks_the_focused_field_and_shows_errors() {
        let form = FormView {
            title: " New secret ".into(),
            fields: vec![
                FormFieldView {
                    label: "Name",
                    value: "db".into(),
                    focused: false,
                },
                FormFieldView {
                    label: "Value",
                    value: "••••".into(),
                    focused: true,
                },
            ],
            error: Some("Name is required".into()),
        };

        let (title, lines) = dialog_lines(&Overlay::Form(form));

        assert_eq!(title, " New secret ");
        assert!(lines[0].text.starts_with("  Name:"));
        assert_eq!(lines[1].style, LineStyle::Focused);
        assert!(lines[1].text.starts_with("> Value:"));
        assert!(lines
            .iter()
            .any(|l| l.style == LineStyle::Error && l.text == "Name is required"));
    }

    #[test]
    fn alert_splits_multiline_messages() {
        let (title, lines) = dialog_lines(&Overlay::Alert {
            title: " Save failed ".into(),
            message: "first\nsecond".into(),
        });

        assert_eq!(title, " Save failed ");
        assert_eq!(lines[0].text, "first");
        assert_eq!(lines[1].text, "second");
        assert_eq!(lines[0].style, LineStyle::Error);
    }

    #[test]
    fn prompt_shows_the_path_being_typed() {
        let (_, lines) = dialog_lines(&Overlay::Prompt {
            title: " Add certificate ".into(),
            path: "~/cert.pem".into(),
        });

        assert_eq!(lines[0].text, "Path: ~/cert.pem▏");
    }
}
