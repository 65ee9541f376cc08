//! Input validation helpers
//!
//! Control-level validation of the client's forms. Errors are keyed by the
//! control name (camelCase, as the backend names the fields), so a caller
//! can ask `has_error("confirmPassword", ErrorKind::PasswordMismatch)`.
//! Validation never touches the network.

use std::collections::BTreeMap;
use std::fmt;

// ── Text length limits ──────────────────────────────────────────────

/// Person names
pub const MAX_NAME_LEN: usize = 200;

/// Reservation notes
pub const MAX_NOTE_LEN: usize = 500;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Smallest party the restaurant accepts
pub const MIN_PARTY_SIZE: u32 = 1;

// ── Error types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Required,
    Email,
    Min,
    TooLong,
    PasswordMismatch,
    UnavailableTime,
    PastDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Errors of one form, grouped by control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<FieldError>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, control: &'static str, kind: ErrorKind, message: impl Into<String>) {
        self.fields.entry(control).or_default().push(FieldError {
            kind,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether `control` failed with `kind`
    pub fn has_error(&self, control: &str, kind: ErrorKind) -> bool {
        self.field(control).iter().any(|e| e.kind == kind)
    }

    pub fn field(&self, control: &str) -> &[FieldError] {
        self.fields.get(control).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Controls with at least one error
    pub fn controls(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (control, errors) in &self.fields {
            for error in errors {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{control}: {}", error.message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ── Validation helpers ──────────────────────────────────────────────

/// Required string: non-blank and within the length limit.
pub fn check_required_text(
    errors: &mut ValidationErrors,
    control: &'static str,
    value: &str,
    max_len: usize,
) {
    if value.trim().is_empty() {
        errors.add(control, ErrorKind::Required, "must not be empty");
    } else if value.chars().count() > max_len {
        errors.add(
            control,
            ErrorKind::TooLong,
            format!("is too long ({} chars, max {max_len})", value.chars().count()),
        );
    }
}

/// Optional string: within the length limit if present.
pub fn check_optional_text(
    errors: &mut ValidationErrors,
    control: &'static str,
    value: Option<&str>,
    max_len: usize,
) {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        errors.add(
            control,
            ErrorKind::TooLong,
            format!("is too long ({} chars, max {max_len})", v.chars().count()),
        );
    }
}

/// Required email: non-blank, within RFC length, `local@domain` shape.
pub fn check_email(errors: &mut ValidationErrors, control: &'static str, value: &str) {
    check_required_text(errors, control, value, MAX_EMAIL_LEN);
    if !errors.field(control).is_empty() {
        return;
    }
    if !is_email(value.trim()) {
        errors.add(control, ErrorKind::Email, "is not a valid email address");
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}
