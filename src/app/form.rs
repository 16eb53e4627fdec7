//! The add/edit secret form.
//!
//! A [`SecretForm`] holds the editable fields of one secret while the form
//! overlay is open. Submitting turns it into a [`Secret`] ready to be saved,
//! stamped with the `ChangedBy` audit tag.

use crate::app::guard::Operation;
use crate::domain::{
    format_tags, parse_tags, with_changed_by, ContentType, Secret, SecretAttributes, SecretValue,
};

/// Longest secret name the vault accepts.
pub const MAX_NAME_LENGTH: usize = 127;

/// Focusable form fields, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Value,
    ContentType,
    Tags,
    Enabled,
}

impl FormField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Value,
        Self::ContentType,
        Self::Tags,
        Self::Enabled,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Value => "Value",
            Self::ContentType => "Content type",
            Self::Tags => "Tags",
            Self::Enabled => "Enabled",
        }
    }

    fn step(self, forward: bool) -> Self {
        let len = Self::ALL.len();
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
        Self::ALL[next]
    }
}

/// State of the secret form overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretForm {
    /// Record being edited, as fetched from the vault. `None` when adding.
    pub previous: Option<Secret>,
    /// Operation the submit runs under: [`Operation::Add`] or [`Operation::Edit`].
    pub operation: Operation,
    pub name: String,
    pub value: SecretValue,
    pub content_type: Option<ContentType>,
    /// Tags in `key=value, key2=value2` syntax.
    pub tags: String,
    /// Tri-state enabled flag, untouched unless the user toggles it.
    pub enabled: Option<bool>,
    pub focus: FormField,
    /// Show the value in clear instead of masked.
    pub reveal: bool,
    /// Validation message from the last submit attempt.
    pub error: Option<String>,
}

impl SecretForm {
    /// Empty form for a new secret.
    #[must_use]
    pub fn new_secret() -> Self {
        Self {
            previous: None,
            operation: Operation::Add,
            name: String::new(),
            value: SecretValue::default(),
            content_type: Some(ContentType::Text),
            tags: String::new(),
            enabled: None,
            focus: FormField::Name,
            reveal: false,
            error: None,
        }
    }

    /// Form for a new secret prefilled from a loaded file.
    #[must_use]
    pub fn from_file(draft: Secret) -> Self {
        Self {
            focus: FormField::Name,
            ..Self::prefilled(draft, None, Operation::Add)
        }
    }

    /// Form editing an existing secret fetched from the vault.
    #[must_use]
    pub fn edit(current: Secret) -> Self {
        Self::prefilled(current.clone(), Some(current), Operation::Edit)
    }

    fn prefilled(secret: Secret, previous: Option<Secret>, operation: Operation) -> Self {
        Self {
            previous,
            operation,
            tags: format_tags(&secret.tags),
            name: secret.name,
            value: secret.value,
            content_type: secret.content_type,
            enabled: secret.attributes.enabled,
            focus: FormField::Value,
            reveal: false,
            error: None,
        }
    }

    #[must_use]
    pub fn title(&self) -> String {
        match &self.previous {
            Some(previous) => format!(" Edit secret '{}' ", previous.name),
            None => " New secret ".to_string(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.step(true);
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.step(false);
    }

    /// Types a character into the focused field.
    ///
    /// On the content type field a space cycles forward; on the enabled field
    /// a space toggles the flag. Other characters are ignored there.
    pub fn insert_char(&mut self, c: char) {
        self.error = None;
        match self.focus {
            FormField::Name => self.name.push(c),
            FormField::Value => self.value.push(c),
            FormField::Tags => self.tags.push(c),
            FormField::ContentType if c == ' ' => self.cycle_content_type(true),
            FormField::Enabled if c == ' ' => self.toggle_enabled(),
            FormField::ContentType | FormField::Enabled => {}
        }
    }

    pub fn backspace(&mut self) {
        self.error = None;
        match self.focus {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Value => self.value.pop(),
            FormField::Tags => {
                self.tags.pop();
            }
            FormField::ContentType => self.content_type = None,
            FormField::Enabled => {}
        }
    }

    /// Left/right on the content type or enabled field.
    pub fn cycle(&mut self, forward: bool) {
        match self.focus {
            FormField::ContentType => self.cycle_content_type(forward),
            FormField::Enabled => self.toggle_enabled(),
            _ => {}
        }
    }

    fn cycle_content_type(&mut self, forward: bool) {
        self.content_type = Some(match (self.content_type, forward) {
            (None, _) => ContentType::Text,
            (Some(current), true) => current.next(),
            (Some(current), false) => current.previous(),
        });
    }

    fn toggle_enabled(&mut self) {
        let effective = self.enabled.unwrap_or(true);
        self.enabled = Some(!effective);
    }

    /// Effective enabled state shown in the form.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Builds the secret to save, tagging it with `actor`.
    ///
    /// # Errors
    ///
    /// Returns a message for the form when the name is invalid.
    pub fn to_secret(&self, actor: &str) -> Result<Secret, String> {
        let name = self.name.trim();
        validate_name(name)?;

        Ok(Secret {
            name: name.to_string(),
            value: self.value.clone(),
            content_type: self.content_type,
            tags: with_changed_by(&parse_tags(&self.tags), actor),
            attributes: SecretAttributes::with_enabled(self.enabled),
        })
    }
}

/// Checks a secret name against the vault naming rules: 1 to 127 ASCII
/// letters, digits or dashes.
///
/// ```
/// use vault_explorer::app::form::validate_name;
///
/// assert!(validate_name("db-password-2").is_ok());
/// assert!(validate_name("").is_err());
/// assert!(validate_name("db_password").is_err());
/// ```
///
/// # Errors
///
/// Returns a user-facing message describing the violated rule.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Name is required".to_string());
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(format!("Name must be at most {MAX_NAME_LENGTH} characters"));
    }
    if let Some(bad) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
        return Err(format!("Name may only contain letters, digits and '-' (found '{bad}')"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CHANGED_BY_TAG;

    fn type_str(form: &mut SecretForm, text: &str) {
        for c in text.chars() {
            form.insert_char(c);
        }
    }

    #[test]
    fn new_form_builds_tagged_secret() {
        let mut form = SecretForm::new_secret();
        type_str(&mut form, "api-key");
        form.focus_next();
        type_str(&mut form, "v1");
        form.focus = FormField::Tags;
        type_str(&mut form, "owner=team-a");

        let secret = form.to_secret("alice").unwrap();
        assert_eq!(secret.name, "api-key");
        assert_eq!(secret.value.expose(), "v1");
        assert_eq!(secret.content_type, Some(ContentType::Text));
        assert_eq!(secret.tags.get("owner").map(String::as_str), Some("team-a"));
        assert_eq!(secret.changed_by(), Some("alice"));
        assert_eq!(secret.attributes.enabled, None);
    }

    #[test]
    fn edit_form_keeps_previous_and_replaces_changed_by() {
        let mut current = Secret::new("db", "pw");
        current.tags.insert(CHANGED_BY_TAG.into(), "bob".into());
        let form = SecretForm::edit(current.clone());

        assert_eq!(form.operation, Operation::Edit);
        assert_eq!(form.previous.as_ref(), Some(&current));
        assert_eq!(form.focus, FormField::Value);

        let secret = form.to_secret("alice").unwrap();
        assert_eq!(secret.changed_by(), Some("alice"));
        assert_eq!(secret.value, current.value);
    }

    #[test]
    fn enabled_flag_stays_unspecified_until_toggled() {
        let mut form = SecretForm::new_secret();
        form.focus = FormField::Enabled;
        assert!(form.is_enabled());

        form.insert_char(' ');
        assert_eq!(form.enabled, Some(false));
        form.cycle(true);
        assert_eq!(form.enabled, Some(true));
    }

    #[test]
    fn content_type_field_cycles_and_clears() {
        let mut form = SecretForm::new_secret();
        form.focus = FormField::ContentType;
        form.cycle(true);
        assert_eq!(form.content_type, Some(ContentType::Csv));
        form.cycle(false);
        form.cycle(false);
        assert_eq!(form.content_type, Some(ContentType::Pem));
        form.backspace();
        assert_eq!(form.content_type, None);
    }

    #[test]
    fn focus_wraps_in_both_directions() {
        let mut form = SecretForm::new_secret();
        form.focus_previous();
        assert_eq!(form.focus, FormField::Enabled);
        form.focus_next();
        assert_eq!(form.focus, FormField::Name);
    }

    #[test]
    fn invalid_name_is_reported() {
        let mut form = SecretForm::new_secret();
        type_str(&mut form, "bad name");
        assert!(form.to_secret("alice").is_err());

        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name(&long).is_err());
    }
}
