//! Mock Email Service Implementation
//!
//! Logs messages instead of sending them. Used in development, where the
//! passcode is read from the console, and in tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use om_core::services::NotifierTrait;
use om_shared::validation::mask_email;

/// A message captured by the mock service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEmail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub message_id: String,
}

/// Mock email service for development and testing
///
/// This implementation:
/// - Prints messages to the console
/// - Generates mock message IDs
/// - Keeps every sent message for inspection
/// - Can simulate provider failures
#[derive(Clone)]
pub struct MockEmailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Messages sent so far
    outbox: Arc<Mutex<Vec<CapturedEmail>>>,
    /// Whether to simulate failures
    simulate_failure: Arc<AtomicBool>,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockEmailService {
    /// Create a new mock email service with console output
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: Arc::new(Mutex::new(Vec::new())),
            simulate_failure: Arc::new(AtomicBool::new(simulate_failure)),
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Messages sent so far, oldest first
    pub fn sent_messages(&self) -> Vec<CapturedEmail> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }

    /// Most recent message sent to `recipient`
    pub fn last_message_to(&self, recipient: &str) -> Option<CapturedEmail> {
        self.sent_messages()
            .into_iter()
            .rev()
            .find(|m| m.recipient == recipient)
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotifierTrait for MockEmailService {
    async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, String> {
        let masked = mask_email(recipient);

        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!("Mock email service simulating failure for {}", masked);
            return Err("Simulated email sending failure".to_string());
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK EMAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", recipient);
            println!("Subject: {}", subject);
            println!("Message ID: {}", message_id);
            println!("Body: {}", body);
            println!("{}\n", "=".repeat(60));
        }

        info!(
            target: "email_service",
            provider = "mock",
            recipient = %masked,
            message_id = %message_id,
            message_number = count,
            "Mock email sent"
        );

        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.push(CapturedEmail {
                recipient: recipient.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
                message_id: message_id.clone(),
            });
        }

        Ok(message_id)
    }
}
