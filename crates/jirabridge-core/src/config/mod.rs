//! Action input resolution
//!
//! Inputs come from plain environment variables first and GitHub Actions
//! `INPUT_*` variables second. Values are trimmed and empty values count as
//! absent.

pub mod event;
pub mod inputs;
pub mod issue_key;
pub mod transitions;

pub use inputs::{ActionInputs, ActionsMode, SchemaMode};
pub use issue_key::IssueKeyExtractor;
pub use transitions::TransitionMap;

use std::collections::HashMap;

/// A source of named input values
pub trait InputSource {
    /// Raw value for `key`, if any
    fn raw(&self, key: &str) -> Option<String>;

    /// Trimmed, non-empty value for `key`
    fn get(&self, key: &str) -> Option<String> {
        self.raw(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Trimmed value for `key`, or `fallback`
    fn get_or(&self, key: &str, fallback: &str) -> String {
        self.get(key).unwrap_or_else(|| fallback.trim().to_string())
    }
}

/// Reads `KEY`, then the Actions form `INPUT_KEY`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl EnvSource {
    /// Name of the variable GitHub Actions sets for input `key`
    pub fn action_input_var(key: &str) -> String {
        format!("INPUT_{}", key.replace(' ', "_").to_uppercase())
    }
}

impl InputSource for EnvSource {
    fn raw(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| std::env::var(Self::action_input_var(key)).ok())
    }
}

/// In-memory inputs, used for CLI overrides and tests
#[derive(Debug, Clone, Default)]
pub struct MapSource(HashMap<String, String>);

impl MapSource {
    /// Empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

impl InputSource for MapSource {
    fn raw(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Two sources; the first non-empty value wins
#[derive(Debug, Clone)]
pub struct Layered<A, B> {
    primary: A,
    fallback: B,
}

impl<A: InputSource, B: InputSource> Layered<A, B> {
    /// Consult `primary` before `fallback`
    pub fn new(primary: A, fallback: B) -> Self {
        Self { primary, fallback }
    }
}

impl<A: InputSource, B: InputSource> InputSource for Layered<A, B> {
    fn raw(&self, key: &str) -> Option<String> {
        self.primary
            .get(key)
            .or_else(|| self.fallback.raw(key))
    }
}
