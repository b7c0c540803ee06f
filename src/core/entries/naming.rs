//! Identifier shortening.
//!
//! Qualified paths are shortened by replacing configured infixes with `.`,
//! e.g. `LoginViewController.Message.welcome` becomes `Login.Message.welcome`
//! with the default `ViewController.` infix. Replacement repeats until nothing
//! changes, so shortening an already shortened name is a no-op.

use std::fmt;

/// Default infixes dropped from qualified paths.
pub const DEFAULT_SHORTENED_INFIXES: &[&str] = &["ViewController.", "String."];

/// An infix that cannot be used for shortening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidInfix(pub String);

impl fmt::Display for InvalidInfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shortened infix \"{}\" must end with '.' and precede it with at least one character",
            self.0
        )
    }
}

impl std::error::Error for InvalidInfix {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorteningRules {
    infixes: Vec<String>,
}

impl Default for ShorteningRules {
    fn default() -> Self {
        Self {
            infixes: DEFAULT_SHORTENED_INFIXES
                .iter()
                .map(|infix| infix.to_string())
                .collect(),
        }
    }
}

impl ShorteningRules {
    /// Create rules from a list of infixes.
    ///
    /// Every infix must end with `.` and be longer than one character, which
    /// keeps each replacement strictly shortening.
    pub fn new(infixes: Vec<String>) -> Result<Self, InvalidInfix> {
        if let Some(invalid) = infixes
            .iter()
            .find(|infix| !infix.ends_with('.') || infix.len() < 2)
        {
            return Err(InvalidInfix(invalid.clone()));
        }
        Ok(Self { infixes })
    }

    /// Rules that leave names untouched.
    pub fn none() -> Self {
        Self {
            infixes: Vec::new(),
        }
    }

    pub fn infixes(&self) -> &[String] {
        &self.infixes
    }

    pub fn apply(&self, qualified_name: &str) -> String {
        let mut name = qualified_name.to_string();
        loop {
            let shortened = self
                .infixes
                .iter()
                .fold(name.clone(), |acc, infix| acc.replace(infix.as_str(), "."));
            if shortened == name {
                return name;
            }
            name = shortened;
        }
    }
}
