//! Configuration for LeafDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a LeafDB table
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Database file. Created on open if it does not exist.
    pub db_path: PathBuf,

    /// Upper bound on the page numbers the pager will hand out
    pub max_pages: u32,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// When dirty pages are written back to the file
    pub flush_policy: FlushPolicy,
}

/// Flush policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Write pages back only when the table is closed
    OnClose,

    /// Also write dirty pages back after every successful insert
    EveryInsert,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./leafdb.db"),
            max_pages: 100,
            flush_policy: FlushPolicy::OnClose,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the database file path
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.db_path = path.into();
        self
    }

    /// Set the maximum page budget
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set the flush policy
    pub fn flush_policy(mut self, policy: FlushPolicy) -> Self {
        self.config.flush_policy = policy;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
