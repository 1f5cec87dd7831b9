//! Dispatch pool configuration.
//!
//! [`DispatchConfig`] describes a dedicated worker pool for
//! [`Dispatcher`](crate::Dispatcher). It can be assembled with the builder
//! setters, deserialized with serde, or (with the `config-file` feature)
//! parsed from TOML:
//!
//! ```toml
//! num_threads = 4
//! thread_name_prefix = "render"
//! stack_size = 4194304
//! ```

use serde::Deserialize;

use crate::error::{Error, Result};

/// Smallest stack size accepted for worker threads.
pub const MIN_STACK_SIZE: usize = 64 * 1024;

/// Worker pool settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// Number of worker threads. Zero lets rayon pick one per CPU.
    pub num_threads: usize,
    /// Prefix of worker thread names; workers are named `{prefix}-{index}`.
    pub thread_name_prefix: String,
    /// Worker stack size in bytes. `None` keeps the platform default.
    pub stack_size: Option<usize>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            num_threads: 0,
            thread_name_prefix: "lazy-task-worker".to_string(),
            stack_size: None,
        }
    }
}

impl DispatchConfig {
    /// Set the number of worker threads.
    #[must_use]
    pub fn num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Set the worker thread name prefix.
    #[must_use]
    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Set the worker stack size.
    #[must_use]
    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Checks the settings for values the pool cannot use.
    pub fn validate(&self) -> Result<()> {
        if self.thread_name_prefix.trim().is_empty() {
            return Err(Error::config("thread_name_prefix must not be empty"));
        }
        match self.stack_size {
            Some(bytes) if bytes < MIN_STACK_SIZE => Err(Error::config(format!(
                "stack_size {bytes} is below the minimum of {MIN_STACK_SIZE} bytes"
            ))),
            _ => Ok(()),
        }
    }

    /// Parses and validates a TOML document.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| Error::config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the settings and builds a rayon pool from them.
    pub fn build_pool(&self) -> Result<rayon::ThreadPool> {
        self.validate()?;
        let prefix = self.thread_name_prefix.clone();
        let mut builder = rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_threads)
            .thread_name(move |index| format!("{prefix}-{index}"));
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }
        builder
            .build()
            .map_err(|e| Error::config(format!("failed to build worker pool: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DispatchConfig::default();
        assert_eq!(config.num_threads, 0);
        assert!(config.stack_size.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_setters_apply() {
        let config = DispatchConfig::default()
            .num_threads(3)
            .thread_name_prefix("io")
            .stack_size(MIN_STACK_SIZE * 2);
        assert_eq!(config.num_threads, 3);
        assert_eq!(config.thread_name_prefix, "io");
        assert_eq!(config.stack_size, Some(MIN_STACK_SIZE * 2));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let blank = DispatchConfig::default().thread_name_prefix("  ");
        assert!(matches!(blank.validate(), Err(Error::Config(_))));

        let tiny = DispatchConfig::default().stack_size(1024);
        let err = tiny.build_pool().unwrap_err();
        assert!(err.to_string().contains("below the minimum"), "{err}");
    }

    #[test]
    fn build_pool_honours_thread_count() {
        let pool = DispatchConfig::default().num_threads(1).build_pool().unwrap();
        assert_eq!(pool.current_num_threads(), 1);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn toml_documents_are_parsed() {
        let config = DispatchConfig::from_toml_str(
            "num_threads = 2\nthread_name_prefix = \"render\"\n",
        )
        .unwrap();
        assert_eq!(config.num_threads, 2);
        assert_eq!(config.thread_name_prefix, "render");
        assert!(config.stack_size.is_none());

        let unknown = DispatchConfig::from_toml_str("threads = 2\n").unwrap_err();
        assert!(matches!(unknown, Error::Config(_)));
    }
}
