//! Server shared state
//!
//! Holds configuration and the resources every request shares.

use crate::config::Config;
use crate::error::Result;
use crate::geo::{get_resolver, DefaultResolver};
use crate::pipeline::tracker::PassTracker;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration, fixed for the life of the server
    pub config: Config,

    resolver: DefaultResolver,

    /// Decides which nearby pass is the current one
    tracker: PassTracker,
}

impl AppState {
    /// Create state with providers built from config
    pub fn new(config: Config) -> Result<Self> {
        let resolver = get_resolver(&config)?;
        Ok(Self::with_resolver(config, resolver))
    }

    /// Create state around an existing resolver
    pub fn with_resolver(config: Config, resolver: DefaultResolver) -> Self {
        Self {
            config,
            resolver,
            tracker: PassTracker::new(),
        }
    }

    pub fn resolver(&self) -> &DefaultResolver {
        &self.resolver
    }

    pub fn tracker(&self) -> &PassTracker {
        &self.tracker
    }
}
