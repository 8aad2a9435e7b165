//! Capabilities the workflow needs from whoever is driving it
//!
//! Confirmation and alerts are injected rather than called globally, so the
//! same controller runs against an interactive front end or a scripted one.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::warn;

#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

pub trait Notify: Send + Sync {
    fn alert(&self, message: &str);
}

pub struct AlwaysConfirm;

#[async_trait]
impl Confirm for AlwaysConfirm {
    async fn confirm(&self, _prompt: &str) -> bool { true }
}

pub struct NeverConfirm;

#[async_trait]
impl Confirm for NeverConfirm {
    async fn confirm(&self, _prompt: &str) -> bool { false }
}

/// Sends alerts to the log.
pub struct LogNotifier;

impl Notify for LogNotifier {
    fn alert(&self, message: &str) {
        warn!(alert = message, "operator alert");
    }
}

/// Keeps every alert it receives.
#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self { Self::default() }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl Notify for RecordingNotifier {
    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }
}
