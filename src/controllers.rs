//! Menu action controller.
//!
//! The "Open CSV" action can be fired from the menu bar, the hotkey, or
//! external code holding a clone of the controller. Subscribers receive one
//! message per trigger on an mpsc receiver.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex, MutexGuard};

/// Marker message for one "Open CSV" trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpenCsvRequested;

#[derive(Clone, Default)]
pub struct MenuController {
    inner: Arc<Mutex<MenuCtrlInner>>,
}

#[derive(Default)]
struct MenuCtrlInner {
    next_id: u64,
    listeners: Vec<(u64, Sender<OpenCsvRequested>)>,
}

impl MenuController {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MenuCtrlInner> {
        // A panicked holder cannot leave the listener list half-updated.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a handler for the "Open CSV" action.
    pub fn subscribe_open_csv(&self) -> MenuSubscription {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, tx));
        MenuSubscription {
            id,
            rx,
            controller: Arc::downgrade(&self.inner),
        }
    }

    /// Notify every live subscription. Returns how many were reached.
    pub fn trigger_open_csv(&self) -> usize {
        let mut inner = self.lock();
        inner
            .listeners
            .retain(|(_, tx)| tx.send(OpenCsvRequested).is_ok());
        tracing::debug!(listeners = inner.listeners.len(), "open CSV triggered");
        inner.listeners.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

/// A live registration. Dropping it unsubscribes.
pub struct MenuSubscription {
    id: u64,
    rx: Receiver<OpenCsvRequested>,
    controller: std::sync::Weak<Mutex<MenuCtrlInner>>,
}

impl MenuSubscription {
    /// Next pending trigger, if any.
    pub fn try_recv(&self) -> Option<OpenCsvRequested> {
        match self.rx.try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending triggers and report whether there was at least one.
    pub fn take_pending(&self) -> bool {
        let mut any = false;
        while self.try_recv().is_some() {
            any = true;
        }
        any
    }

    pub fn unsubscribe(self) {}
}

impl Drop for MenuSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.controller.upgrade() {
            let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
            inner.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
