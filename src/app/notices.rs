//! Transient messages shown at the bottom of the window.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub expires: Instant,
}

#[derive(Clone, Debug)]
pub struct Notices {
    items: Vec<Notice>,
    ttl: Duration,
}

impl Notices {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
        }
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.push_at(text, Instant::now());
    }

    pub fn push_at(&mut self, text: impl Into<String>, now: Instant) {
        self.items.push(Notice {
            text: text.into(),
            expires: now + self.ttl,
        });
    }

    /// Drop expired notices.
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| n.expires > now);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Time until the next notice expires.
    pub fn next_expiry(&self, now: Instant) -> Option<Duration> {
        self.items
            .iter()
            .map(|n| n.expires.saturating_duration_since(now))
            .min()
    }
}
