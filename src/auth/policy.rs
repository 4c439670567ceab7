use std::sync::LazyLock;

use regex::Regex;

use crate::config::PasswordConfig;

static UPPERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").unwrap());
static LOWERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").unwrap());
static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").unwrap());

/// Decides whether a plaintext password is acceptable. Must be free of side effects.
pub trait PasswordPolicy: Send + Sync {
    fn is_valid(&self, password: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    TooShort { min: usize },
    MissingMixedCase,
    MissingDigit,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::TooShort { min } => write!(f, "shorter than {min} characters"),
            Violation::MissingMixedCase => write!(f, "needs upper and lower case letters"),
            Violation::MissingDigit => write!(f, "needs a digit"),
        }
    }
}

/// Minimum length plus mixed case plus at least one digit.
///
/// Letters and digits are ASCII only. Length is counted in UTF-16 code units,
/// so a character outside the BMP counts twice.
#[derive(Debug, Clone)]
pub struct PasswordRules {
    pub min_length: usize,
}

impl Default for PasswordRules {
    fn default() -> Self {
        Self { min_length: 7 }
    }
}

impl PasswordRules {
    pub fn from_config(config: &PasswordConfig) -> Self {
        Self {
            min_length: config.min_length,
        }
    }

    /// Every rule the password breaks, in a stable order. Empty means valid.
    pub fn violations(&self, password: &str) -> Vec<Violation> {
        let mut violations = Vec::new();

        if password.encode_utf16().count() < self.min_length {
            violations.push(Violation::TooShort {
                min: self.min_length,
            });
        }
        if !UPPERCASE.is_match(password) || !LOWERCASE.is_match(password) {
            violations.push(Violation::MissingMixedCase);
        }
        if !DIGIT.is_match(password) {
            violations.push(Violation::MissingDigit);
        }

        violations
    }
}

impl PasswordPolicy for PasswordRules {
    fn is_valid(&self, password: &str) -> bool {
        let violations = self.violations(password);
        if !violations.is_empty() {
            let reasons: Vec<String> = violations.iter().map(|v| v.to_string()).collect();
            tracing::debug!("Password rejected: {}", reasons.join(", "));
        }
        violations.is_empty()
    }
}
