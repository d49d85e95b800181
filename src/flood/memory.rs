//! In-process sliding-window counter store.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

use super::Flood;

/// One recorded failure and when it stops counting.
struct Event {
    expires_at: Instant,
}

/// Counter store backed by process memory.
///
/// Each `(name, identifier)` key holds the timestamps of its unexpired
/// events; expired events are pruned on every operation. A single async
/// mutex guards the map, so check and register are atomic per key. State
/// does not survive the process and is not shared across instances —
/// multi-instance deployments bring their own [`Flood`] implementation on
/// shared storage.
#[derive(Default)]
pub struct MemoryFlood {
    events: Mutex<HashMap<(String, Option<String>), Vec<Event>>>,
}

impl MemoryFlood {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str, identifier: Option<&str>) -> (String, Option<String>) {
        (name.to_string(), identifier.map(ToString::to_string))
    }
}

#[async_trait]
impl Flood for MemoryFlood {
    // Events remember the window they were registered with, so `window` is
    // not consulted again here.
    async fn is_allowed(
        &self,
        name: &str,
        limit: u32,
        _window: Duration,
        identifier: Option<&str>,
    ) -> Result<bool> {
        let now = Instant::now();
        let mut events = self.events.lock().await;
        let count = match events.get_mut(&Self::key(name, identifier)) {
            Some(entries) => {
                entries.retain(|event| event.expires_at > now);
                entries.len()
            }
            None => 0,
        };
        let allowed = (count as u32) < limit;
        if !allowed {
            debug!(name, identifier, count, limit, "flood limit reached");
        }
        Ok(allowed)
    }

    async fn register(
        &self,
        name: &str,
        window: Duration,
        identifier: Option<&str>,
    ) -> Result<()> {
        let now = Instant::now();
        let mut events = self.events.lock().await;
        let entries = events.entry(Self::key(name, identifier)).or_default();
        entries.retain(|event| event.expires_at > now);
        entries.push(Event {
            expires_at: now + window,
        });
        Ok(())
    }

    async fn clear(&self, name: &str, identifier: Option<&str>) -> Result<()> {
        let mut events = self.events.lock().await;
        events.remove(&Self::key(name, identifier));
        Ok(())
    }
}
