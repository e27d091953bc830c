use std::path::Path;

use serde::Deserialize;

const MAX_DEPTH_VARIABLE: &str = "ATOM_MAX_DEPTH";

/// Evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// How deeply expressions, and with them function calls, may nest before
    /// evaluation fails with a recursion limit error.
    pub max_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

impl EvalConfig {
    pub fn from_json(source: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    /// Applies overrides from the process environment. Values that don't
    /// parse are reported and ignored.
    pub fn with_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup(MAX_DEPTH_VARIABLE) {
            match value.trim().parse() {
                Ok(max_depth) => self.max_depth = max_depth,
                Err(error) => tracing::warn!(%value, %error, "ignoring invalid {}", MAX_DEPTH_VARIABLE),
            }
        }
        self
    }
}
