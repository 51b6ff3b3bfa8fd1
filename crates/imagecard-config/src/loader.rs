use std::{path::Path, sync::OnceLock};

use regex::Regex;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, deserializes,
    /// fills provider credentials from the environment, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Load from `path` when it exists, otherwise start from defaults
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file fails to load
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        let mut config = Self::default();
        config.imagegen.apply_env();
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from raw TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let mut config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.imagegen.apply_env();
        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Missing provider credentials are not an error here.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is empty or the size list is empty or
    /// malformed
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_imagegen()?;
        self.validate_health()?;
        Ok(())
    }

    fn validate_imagegen(&self) -> anyhow::Result<()> {
        fn dimensions() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new(r"^[1-9][0-9]*x[1-9][0-9]*$").expect("must be valid regex"))
        }

        if self.imagegen.model.trim().is_empty() {
            anyhow::bail!("imagegen.model must not be empty");
        }

        if self.imagegen.sizes.is_empty() {
            anyhow::bail!("imagegen.sizes must list at least one size");
        }

        if let Some(bad) = self.imagegen.sizes.iter().find(|s| !dimensions().is_match(s)) {
            anyhow::bail!("invalid size '{bad}' in imagegen.sizes, expected WIDTHxHEIGHT");
        }

        Ok(())
    }

    fn validate_health(&self) -> anyhow::Result<()> {
        let health = &self.server.health;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/'");
        }

        Ok(())
    }
}
