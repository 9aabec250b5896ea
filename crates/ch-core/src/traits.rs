//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{DomainRecord, Module};

/// Data-fetch contract. The view layer only ever sees completed collections;
/// latency and retries belong to the implementation.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Returns every record listed by `module`, in display order.
    async fn fetch(&self, module: Module) -> anyhow::Result<Vec<DomainRecord>>;

    /// Looks a single record up by id within a module.
    async fn find(&self, module: Module, id: &str) -> anyhow::Result<Option<DomainRecord>>;
}

/// Time source for locally authored content (comment ids and timestamps).
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant. Used by fixtures and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
