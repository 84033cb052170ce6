//! The per-tick driver that keeps the cache fresh and retries diverged passes.
//!
//! [`PlateLoader`] owns everything that outlives a single pass: the rotating
//! storage snapshot and the retry state. The host calls
//! [`PlateLoader::request`] when the user asks for a configuration and
//! [`PlateLoader::tick`] once per update of its own loop.
//!
//! Two triggers run on every tick, independently of each other:
//!
//! - **Cache**: if the used-capacity counter moved, rebuild the snapshot.
//! - **Retry**: if a configuration is pending, resolve it again.
//!
//! Waiting for a write to settle is expressed only through ticks. Nothing
//! here sleeps or blocks.
//!
//! # Example
//!
//! ```ignore
//! let mut loader = PlateLoader::new(EngineConfig::default(), valuable);
//! loader.tick(&mut port);
//! let report = loader.request(&mut port, &plate);
//! while loader.retry_state().pending().is_some() {
//!     loader.tick(&mut port);
//! }
//! ```

use glamour_model::{TargetConfiguration, ValuableDyes};

use crate::config::EngineConfig;
use crate::engine::{PassReport, ResolutionEngine};
use crate::port::PlatePort;
use crate::retry::{RetryState, RetryTransition};
use crate::source_cache::SourceCache;

/// What one tick did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The snapshot was rebuilt.
    pub cache_rebuilt: bool,
    /// The retry pass, if one ran.
    pub pass: Option<PassReport>,
    /// How the retry pass moved the retry state, if one ran.
    pub retry: Option<RetryTransition>,
}

/// Long-lived driver for resolution requests.
#[derive(Debug, Clone)]
pub struct PlateLoader {
    config: EngineConfig,
    valuable: ValuableDyes,
    cache: SourceCache,
    retry: RetryState,
}

impl PlateLoader {
    /// Creates a loader with an empty (cold) cache and nothing pending.
    #[must_use]
    pub fn new(config: EngineConfig, valuable: ValuableDyes) -> Self {
        let cache = SourceCache::new(config.storage_slot_limit);
        Self {
            config,
            valuable,
            cache,
            retry: RetryState::Idle,
        }
    }

    /// Resolves `target` now. If the pass diverges it is scheduled for retry,
    /// replacing whatever was pending before.
    pub fn request<P: PlatePort + ?Sized>(&mut self, port: &mut P, target: &TargetConfiguration) -> PassReport {
        if let Some(previous) = self.retry.pending() {
            tracing::debug!(plate = %previous.name, "dropping pending retry for new request");
        }
        self.retry = RetryState::Idle;

        let report = ResolutionEngine::new(&self.config, &self.valuable).resolve(port, &self.cache, target);
        let transition =
            self.retry
                .record_pass(target.clone(), report.converged(), self.config.max_retry_attempts);
        self.log_transition(&target.name, transition);
        report
    }

    /// Runs both triggers once.
    ///
    /// If the used-capacity counter cannot be read the tick does nothing.
    pub fn tick<P: PlatePort + ?Sized>(&mut self, port: &mut P) -> TickReport {
        let used_capacity = match port.used_capacity() {
            Ok(used) => used,
            Err(err) => {
                tracing::debug!(%err, "used capacity unreadable, skipping tick");
                return TickReport::default();
            }
        };

        let cache_rebuilt = self.cache.refresh_if_changed(&*port, used_capacity);

        let Some(target) = self.retry.pending().cloned() else {
            return TickReport {
                cache_rebuilt,
                ..TickReport::default()
            };
        };

        troubleshoot!(
            self.config.troubleshooting,
            plate = %target.name,
            attempt = self.retry.attempts() + 1,
            "retrying plate"
        );
        let report = ResolutionEngine::new(&self.config, &self.valuable).resolve(port, &self.cache, &target);
        let name = target.name.clone();
        let transition = self
            .retry
            .record_pass(target, report.converged(), self.config.max_retry_attempts);
        self.log_transition(&name, transition);

        TickReport {
            cache_rebuilt,
            pass: Some(report),
            retry: Some(transition),
        }
    }

    /// Drops any pending retry.
    pub fn cancel(&mut self) {
        self.retry = RetryState::Idle;
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The valuable-dye set.
    #[must_use]
    pub fn valuable(&self) -> &ValuableDyes {
        &self.valuable
    }

    /// The rotating storage snapshot.
    #[must_use]
    pub fn cache(&self) -> &SourceCache {
        &self.cache
    }

    /// The retry state.
    #[must_use]
    pub fn retry_state(&self) -> &RetryState {
        &self.retry
    }

    fn log_transition(&self, plate: &str, transition: RetryTransition) {
        match transition {
            RetryTransition::Converged => {
                troubleshoot!(self.config.troubleshooting, plate, "plate fully loaded");
            }
            RetryTransition::Scheduled { attempt } => {
                troubleshoot!(
                    self.config.troubleshooting,
                    plate,
                    attempt,
                    "could not fully load plate, retrying next tick"
                );
            }
            RetryTransition::Abandoned { attempts } => {
                tracing::warn!(plate, attempts, "giving up on plate after repeated divergence");
            }
        }
    }
}
