//! Symbols
//!
//! Identifiers matching `[A-Za-z*+=<>!?/$%_][0-9A-Za-z*+=<>!?/$%_-]*` or the
//! single character `-`. Cheap to clone; compared by name.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static SYMBOL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z*+=<>!?/$%_][0-9A-Za-z*+=<>!?/$%_\-]*|-)$").unwrap()
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid symbol name: {name:?}")]
pub struct SymbolError {
    pub name: String,
}

/// A validated identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Result<Self, SymbolError> {
        if !Self::is_valid(name) {
            return Err(SymbolError {
                name: name.to_string(),
            });
        }
        Ok(Self(Arc::from(name)))
    }

    pub fn is_valid(name: &str) -> bool {
        SYMBOL_RE.is_match(name)
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = SymbolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0.to_string()
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
