use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

///
/// The out-of-band delivery collaborator for reset codes - an email or SMS gateway
/// in a real deployment.
///
/// Delivery failure is a boolean, never an error: the caller turns false into its
/// own "could not send" outcome without learning anything else.
///
#[async_trait]
pub trait ResetNotifier: Send + Sync {
    async fn send(&self, email: &str, reset_code: &str) -> bool;
}

///
/// Logs the code instead of delivering it - the teaching deployment's stand-in for
/// a real mail gateway.
///
pub struct ConsoleNotifier;

#[async_trait]
impl ResetNotifier for ConsoleNotifier {
    async fn send(&self, email: &str, reset_code: &str) -> bool {
        tracing::info!("Reset code for {}: {}", email, reset_code);
        true
    }
}

///
/// Captures every send for inspection, and can be told to fail - used by tests.
///
pub struct MemoryNotifier {
    sent: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        MemoryNotifier {
            sent: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    ///
    /// Make every subsequent send report failure.
    ///
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    ///
    /// The most recent code sent to the email, if any.
    ///
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent.lock().iter().rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl ResetNotifier for MemoryNotifier {
    async fn send(&self, email: &str, reset_code: &str) -> bool {
        if self.failing.load(Ordering::SeqCst) {
            return false
        }

        self.sent.lock().push((email.to_string(), reset_code.to_string()));
        true
    }
}
