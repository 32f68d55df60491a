//! Chat session: the single owner and mutator of a conversation.
//!
//! A session ties the [`Conversation`] store to the [`ResponseSimulator`].
//! It accepts submissions, keeps the ownership handle of the pending reply
//! timer, and delivers replies as they arrive. Submissions are serialized:
//! while a reply is pending, further submissions are ignored, so user and
//! assistant messages strictly alternate.
//!
//! Dropping the session aborts the pending timer.

use crate::config::Config;
use crate::conversation::Conversation;
use crate::message::{Message, MessageId};
use crate::simulator::{PendingReply, ReplyReady, ResponseSimulator};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Outcome of [`ChatSession::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The message was appended and a reply is on its way.
    Accepted(MessageId),
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl Submission {
    /// Whether the submission was appended.
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Input was empty or whitespace-only.
    Blank,
    /// A reply to an earlier message has not arrived yet.
    ReplyPending,
}

/// A conversation with a simulated assistant.
#[derive(Debug)]
pub struct ChatSession {
    conversation: Conversation,
    simulator: ResponseSimulator,
    reply_tx: mpsc::UnboundedSender<ReplyReady>,
    reply_rx: mpsc::UnboundedReceiver<ReplyReady>,
    pending: Option<PendingReply>,
}

impl ChatSession {
    /// Build a session from configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_parts(
            Conversation::with_greeting(config.greeting.clone()),
            ResponseSimulator::from_seed(config.reply_delay, config.seed),
        )
    }

    /// Build a session from an existing store and simulator.
    pub fn with_parts(conversation: Conversation, simulator: ResponseSimulator) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            conversation,
            simulator,
            reply_tx,
            reply_rx,
            pending: None,
        }
    }

    /// Read-only view of the conversation.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Whether a reply is being "typed".
    pub fn is_typing(&self) -> bool {
        self.conversation.is_typing()
    }

    /// Whether a reply timer is outstanding.
    pub fn has_pending_reply(&self) -> bool {
        self.pending.is_some()
    }

    /// Submit user text.
    ///
    /// On acceptance the user message is appended, the typing flag is set,
    /// and a reply is scheduled. Must be called from within a Tokio runtime.
    pub fn submit(&mut self, text: &str) -> Submission {
        if self.pending.is_some() {
            debug!("ignoring submission while a reply is pending");
            return Submission::Ignored(IgnoreReason::ReplyPending);
        }

        let Some(message) = self.conversation.append_user_message(text) else {
            debug!("ignoring blank submission");
            return Submission::Ignored(IgnoreReason::Blank);
        };
        let id = message.id;
        debug!(%id, chars = text.chars().count(), "user message appended");

        self.conversation.set_typing(true);
        self.pending = Some(self.simulator.schedule(id, self.reply_tx.clone()));

        Submission::Accepted(id)
    }

    /// Deliver a reply that is already waiting, without blocking.
    pub fn try_next_reply(&mut self) -> Option<&Message> {
        while let Ok(ready) = self.reply_rx.try_recv() {
            if self.accept(&ready) {
                return Some(self.conversation.append_ai_message(ready.content));
            }
        }
        None
    }

    /// Wait for the pending reply and deliver it.
    ///
    /// Returns `None` immediately when nothing is pending.
    pub async fn next_reply(&mut self) -> Option<&Message> {
        while self.pending.is_some() {
            let ready = self.reply_rx.recv().await?;
            if self.accept(&ready) {
                return Some(self.conversation.append_ai_message(ready.content));
            }
        }
        None
    }

    /// Abort the pending reply, if any, and clear the typing flag.
    pub fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(in_reply_to = %pending.in_reply_to(), "cancelling pending reply");
            pending.cancel();
        }
        self.conversation.set_typing(false);
    }

    /// Take ownership of a ready reply if it answers the pending submission.
    fn accept(&mut self, ready: &ReplyReady) -> bool {
        match &self.pending {
            Some(pending) if pending.in_reply_to() == ready.in_reply_to => {
                self.pending = None;
                debug!(in_reply_to = %ready.in_reply_to, "delivering simulated reply");
                true
            }
            _ => {
                trace!(in_reply_to = %ready.in_reply_to, "discarding stale reply");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReplyDelay;
    use crate::message::Sender;
    use crate::simulator::CANNED_REPLIES;
    use std::time::Duration;

    fn seeded_session() -> ChatSession {
        ChatSession::new(&Config {
            seed: Some(5),
            ..Default::default()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submission_leaves_conversation_unchanged() {
        let mut session = seeded_session();

        assert_eq!(
            session.submit("   "),
            Submission::Ignored(IgnoreReason::Blank)
        );
        assert_eq!(session.conversation().len(), 1);
        assert!(!session.is_typing());
        assert!(!session.has_pending_reply());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_then_reply_scenario() {
        let mut session = seeded_session();
        assert_eq!(session.conversation().len(), 1);

        let submission = session.submit("test");
        assert!(submission.is_accepted());
        assert_eq!(session.conversation().len(), 2);
        assert_eq!(session.conversation().last().unwrap().content, "test");
        assert_eq!(session.conversation().last().unwrap().sender, Sender::User);
        assert!(session.is_typing());

        let reply = session.next_reply().await.unwrap();
        assert_eq!(reply.sender, Sender::Ai);
        assert!(CANNED_REPLIES.contains(&reply.content.as_str()));

        assert_eq!(session.conversation().len(), 3);
        assert!(!session.is_typing());
        assert!(!session.has_pending_reply());
    }

    fn session_with_delay(min_ms: u64, max_ms: u64) -> ChatSession {
        ChatSession::new(&Config {
            reply_delay: ReplyDelay { min_ms, max_ms },
            seed: Some(5),
            ..Default::default()
        })
    }

    /// Give the timer task a few turns to observe the clock and send.
    async fn settle() {
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_reply_before_min_delay() {
        let mut session = session_with_delay(1000, 1001);
        session.submit("Hi");

        tokio::time::advance(Duration::from_millis(999)).await;
        settle().await;
        assert!(session.try_next_reply().is_none());
        assert!(session.is_typing());

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert!(session.try_next_reply().is_some());
        assert!(!session.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_before_max_delay() {
        let mut session = session_with_delay(2999, 3000);
        session.submit("Hi");

        tokio::time::advance(Duration::from_millis(2998)).await;
        settle().await;
        assert!(session.try_next_reply().is_none());

        tokio::time::advance(Duration::from_millis(1)).await;
        settle().await;
        assert!(session.try_next_reply().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_measured_from_submit() {
        let mut session = session_with_delay(1000, 1001);
        session.submit("Hi");

        // The timer task is first polled inside this advance, after the
        // clock has already moved past the deadline.
        tokio::time::advance(Duration::from_millis(2900)).await;
        settle().await;
        assert!(session.try_next_reply().is_some());
        assert_eq!(session.conversation().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_ignored_while_reply_pending() {
        let mut session = seeded_session();
        session.submit("first");

        assert_eq!(
            session.submit("second"),
            Submission::Ignored(IgnoreReason::ReplyPending)
        );
        assert_eq!(session.conversation().len(), 2);

        session.next_reply().await.unwrap();
        assert!(session.submit("second").is_accepted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_messages_strictly_alternate() {
        let mut session = seeded_session();
        for text in ["one", "two", "three", "four"] {
            assert!(session.submit(text).is_accepted());
            session.next_reply().await.unwrap();
        }

        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 9);
        for (i, msg) in messages.iter().enumerate() {
            let expected = if i % 2 == 0 { Sender::Ai } else { Sender::User };
            assert_eq!(msg.sender, expected, "message {i} out of order");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_reply_without_pending_returns_none() {
        let mut session = seeded_session();
        assert!(session.next_reply().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_pending_clears_typing() {
        let mut session = seeded_session();
        session.submit("Hi");
        session.cancel_pending();

        assert!(!session.is_typing());
        assert!(!session.has_pending_reply());

        tokio::time::advance(Duration::from_millis(5000)).await;
        settle().await;
        assert!(session.try_next_reply().is_none());
        assert_eq!(session.conversation().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_reply_is_discarded() {
        let mut session = seeded_session();
        session
            .reply_tx
            .send(ReplyReady {
                in_reply_to: MessageId::new(),
                content: CANNED_REPLIES[0],
            })
            .unwrap();

        assert!(session.try_next_reply().is_none());
        assert_eq!(session.conversation().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_greeting_and_delay() {
        let config = Config {
            greeting: "Yo".into(),
            reply_delay: ReplyDelay {
                min_ms: 10,
                max_ms: 20,
            },
            seed: Some(1),
        };
        let mut session = ChatSession::new(&config);
        assert_eq!(session.conversation().messages()[0].content, "Yo");

        session.submit("Hi");
        tokio::time::advance(Duration::from_millis(20)).await;
        settle().await;
        assert!(session.try_next_reply().is_some());
    }
}
