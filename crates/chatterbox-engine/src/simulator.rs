//! Response simulator: fabricates a delayed canned reply.
//!
//! Replies never depend on what the user wrote. Each submission gets a delay
//! drawn uniformly from the configured range and one of [`CANNED_REPLIES`]
//! drawn uniformly at random. The delay runs on a spawned Tokio task whose
//! [`PendingReply`] handle aborts it when dropped.

use crate::config::ReplyDelay;
use crate::message::MessageId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

/// Fixed pool of stock replies, in selection-index order.
pub const CANNED_REPLIES: [&str; 5] = [
    "That's an interesting question! Let me think about it...",
    "I understand what you're asking. Here's my perspective:",
    "Great point! I'd be happy to help you with that.",
    "Thanks for your message! Let me provide some insights:",
    "I see what you mean. That's definitely worth exploring further.",
];

/// A reply chosen ahead of time, before its timer starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedReply {
    /// How long to "type" before delivering.
    pub delay: Duration,
    /// Reply text from the canned pool.
    pub content: &'static str,
}

/// Sent over the reply channel when a timer fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyReady {
    /// The user message this reply answers.
    pub in_reply_to: MessageId,
    /// Reply text.
    pub content: &'static str,
}

/// Ownership handle for a scheduled reply.
///
/// Dropping the handle aborts the timer task.
#[derive(Debug)]
pub struct PendingReply {
    in_reply_to: MessageId,
    handle: JoinHandle<()>,
}

impl PendingReply {
    /// The user message this reply answers.
    pub fn in_reply_to(&self) -> MessageId {
        self.in_reply_to
    }

    /// Abort the timer without delivering.
    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for PendingReply {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Picks canned replies and schedules their delivery.
#[derive(Debug)]
pub struct ResponseSimulator {
    rng: StdRng,
    delay: ReplyDelay,
}

impl ResponseSimulator {
    /// Create a simulator seeded from the operating system.
    pub fn new(delay: ReplyDelay) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            delay,
        }
    }

    /// Create a deterministic simulator.
    pub fn seeded(delay: ReplyDelay, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            delay,
        }
    }

    /// Create a simulator from an optional seed.
    pub fn from_seed(delay: ReplyDelay, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(delay, seed),
            None => Self::new(delay),
        }
    }

    /// Draw a delay in `[min_ms, max_ms)` and a reply from the pool.
    pub fn plan_reply(&mut self) -> PlannedReply {
        let ReplyDelay { min_ms, max_ms } = self.delay;
        let millis = if max_ms > min_ms {
            self.rng.random_range(min_ms..max_ms)
        } else {
            min_ms
        };
        let index = self.rng.random_range(0..CANNED_REPLIES.len());

        PlannedReply {
            delay: Duration::from_millis(millis),
            content: CANNED_REPLIES[index],
        }
    }

    /// Plan a reply to `in_reply_to` and start its timer.
    ///
    /// The delay is measured from this call, not from when the timer task
    /// first runs. When the timer fires, a [`ReplyReady`] is sent on `tx`.
    /// A closed receiver is not an error: it means the session went away.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(
        &mut self,
        in_reply_to: MessageId,
        tx: mpsc::UnboundedSender<ReplyReady>,
    ) -> PendingReply {
        let plan = self.plan_reply();
        debug!(%in_reply_to, delay = ?plan.delay, "scheduling simulated reply");

        let deadline = Instant::now() + plan.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(ReplyReady {
                in_reply_to,
                content: plan.content,
            });
        });

        PendingReply {
            in_reply_to,
            handle,
        }
    }
}
