//! Configuration (code > env > `.env` file).

use std::collections::HashMap;

/// Default model handed to agent specs when none is set explicitly.
pub const DEFAULT_MODEL: &str = "openai:gpt-4o-mini";

/// Default recursion limit for agent runs (three tool iterations).
pub const DEFAULT_RECURSION_LIMIT: usize = 7;

/// Runtime configuration resolved from the environment.
///
/// API keys are never consumed by this crate directly; they are passed
/// through to the external runtime at construction time.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    model: String,
    recursion_limit: usize,
    api_keys: HashMap<String, String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            api_keys: HashMap::new(),
        }
    }
}

impl RuntimeConfig {
    /// Create an empty config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (CONCIERGE_MODEL, OPENAI_API_KEY, ...).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::new();

        if let Ok(model) = std::env::var("CONCIERGE_MODEL") {
            config.model = model;
        }
        if let Ok(limit) = std::env::var("CONCIERGE_RECURSION_LIMIT") {
            if let Ok(limit) = limit.parse() {
                config.recursion_limit = limit;
            }
        }

        let env_mappings = [
            ("OPENAI_API_KEY", "openai"),
            ("ANTHROPIC_API_KEY", "anthropic"),
        ];
        for (env_var, provider) in &env_mappings {
            if let Ok(key) = std::env::var(env_var) {
                config.set_api_key(provider, key);
            }
        }

        config
    }

    /// Model identifier, e.g. `openai:gpt-4o-mini`.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Recursion limit applied to runs unless a spec overrides it.
    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Set an API key for a provider.
    pub fn set_api_key(&mut self, provider: &str, key: impl Into<String>) {
        self.api_keys.insert(provider.to_string(), key.into());
    }

    /// Look up an API key by provider name.
    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys.get(provider).map(|k| k.as_str())
    }
}
