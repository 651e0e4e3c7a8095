//! Conversational assistant orchestration.

use futures_util::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use storyboard_core::{ChatMessage, MessageId};
use storyboard_error::{ChatError, ChatErrorKind, StoryboardError, StoryboardResult};
use storyboard_interface::{ChatSession, Conversation, TextStream};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Text shown in place of a reply that failed.
pub const APOLOGY: &str = "Sorry, I encountered an error processing your request.";

/// Fragments of one assistant reply, as they are written into the log.
///
/// Nothing is sent until the stream is first polled. Dropping it early
/// leaves the reply with whatever text had arrived.
pub struct TurnStream<'a> {
    reply_id: MessageId,
    inner: Pin<Box<dyn Stream<Item = String> + Send + 'a>>,
}

impl TurnStream<'_> {
    /// Id of the assistant message this turn writes into.
    pub fn reply_id(&self) -> MessageId {
        self.reply_id
    }
}

impl Stream for TurnStream<'_> {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<String>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl std::fmt::Debug for TurnStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnStream")
            .field("reply_id", &self.reply_id)
            .finish_non_exhaustive()
    }
}

/// Owns the conversation log and the single provider session behind it.
///
/// The session is created on first use and reused for every later turn until
/// [`ChatOrchestrator::reset_session`]. Turns are not serialized: starting a
/// second turn before the first finishes is allowed, and each writes only
/// into its own placeholder.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
/// use std::sync::Arc;
/// use storyboard_interface::Conversation;
/// use storyboard_studio::ChatOrchestrator;
///
/// # async fn demo<C: Conversation>(gateway: Arc<C>) -> storyboard_error::StoryboardResult<()> {
/// let chat = ChatOrchestrator::new(gateway, "You are a helpful assistant.", None);
/// let mut turn = chat.send_turn("Suggest an opening shot.")?;
/// while let Some(fragment) = turn.next().await {
///     print!("{fragment}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct ChatOrchestrator<C> {
    gateway: Arc<C>,
    system_prompt: String,
    session: Mutex<Option<ChatSession>>,
    messages: watch::Sender<Vec<ChatMessage>>,
}

impl<C: Conversation> ChatOrchestrator<C> {
    /// Creates an orchestrator, optionally seeding the log with a greeting.
    pub fn new(
        gateway: Arc<C>,
        system_prompt: impl Into<String>,
        welcome_message: Option<String>,
    ) -> Self {
        let messages = welcome_message
            .map(ChatMessage::assistant)
            .into_iter()
            .collect();

        Self {
            gateway,
            system_prompt: system_prompt.into(),
            session: Mutex::new(None),
            messages: watch::Sender::new(messages),
        }
    }

    /// Snapshot of the log in display order.
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.borrow().clone()
    }

    /// Message with the given id, if present.
    pub fn message(&self, id: MessageId) -> Option<ChatMessage> {
        self.messages
            .borrow()
            .iter()
            .find(|message| message.id() == id)
            .cloned()
    }

    /// Receiver notified on every log change, including each fragment.
    pub fn subscribe(&self) -> watch::Receiver<Vec<ChatMessage>> {
        self.messages.subscribe()
    }

    /// Whether a provider session is currently held.
    pub fn has_session(&self) -> bool {
        self.lock_session().is_some()
    }

    /// Drops the current session; the next turn opens a fresh one.
    ///
    /// The visible log is kept.
    pub fn reset_session(&self) {
        debug!("Chat session reset");
        *self.lock_session() = None;
    }

    /// Starts a turn.
    ///
    /// The user message and an empty assistant placeholder are appended
    /// before this returns. Polling the stream opens the session if needed,
    /// sends the text, and appends each non-empty fragment to the
    /// placeholder. If anything fails, the placeholder text is replaced by
    /// [`APOLOGY`] and the stream ends.
    ///
    /// # Errors
    ///
    /// `ChatError::EmptyMessage` for blank text; nothing is appended.
    pub fn send_turn(&self, user_text: &str) -> StoryboardResult<TurnStream<'_>> {
        if user_text.trim().is_empty() {
            return Err(ChatError::new(ChatErrorKind::EmptyMessage).into());
        }

        let reply = ChatMessage::assistant("");
        let reply_id = reply.id();
        let user = ChatMessage::user(user_text);
        self.messages.send_modify(|log| {
            log.push(user);
            log.push(reply);
        });

        let user_text = user_text.to_string();
        let inner = async_stream::stream! {
            let mut fragments = match self.open_stream(&user_text).await {
                Ok(fragments) => fragments,
                Err(e) => {
                    self.fail(reply_id, &e);
                    return;
                }
            };

            while let Some(item) = fragments.next().await {
                match item {
                    Ok(fragment) if fragment.is_empty() => {}
                    Ok(fragment) => {
                        self.update(reply_id, |message| message.append(&fragment));
                        yield fragment;
                    }
                    Err(e) => {
                        self.fail(reply_id, &e);
                        return;
                    }
                }
            }
            info!(%reply_id, "Chat turn complete");
        };

        Ok(TurnStream {
            reply_id,
            inner: Box::pin(inner),
        })
    }

    /// Runs a turn to completion and returns the reply's id.
    ///
    /// # Errors
    ///
    /// Only for blank text; provider failures end up in the reply text.
    pub async fn send_turn_to_end(&self, user_text: &str) -> StoryboardResult<MessageId> {
        let mut turn = self.send_turn(user_text)?;
        while turn.next().await.is_some() {}
        Ok(turn.reply_id())
    }

    async fn open_stream(&self, user_text: &str) -> StoryboardResult<TextStream> {
        let session = self.session()?;
        self.gateway.stream_chat(&session, user_text).await
    }

    /// Current session, opening one if none is held.
    fn session(&self) -> StoryboardResult<ChatSession> {
        let mut slot = self.lock_session();
        if let Some(session) = slot.as_ref() {
            return Ok(session.clone());
        }

        let session = self
            .gateway
            .open_chat_session(&self.system_prompt)
            .map_err(|e| ChatError::new(ChatErrorKind::NoSession(e.to_string())))?;
        debug!("Chat session opened");
        *slot = Some(session.clone());
        Ok(session)
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, Option<ChatSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, id: MessageId, change: impl FnOnce(&mut ChatMessage)) {
        self.messages.send_if_modified(|log| {
            match log.iter_mut().find(|message| message.id() == id) {
                Some(message) => {
                    change(message);
                    true
                }
                None => false,
            }
        });
    }

    fn fail(&self, id: MessageId, error: &StoryboardError) {
        warn!(reply_id = %id, error = %error, "Chat turn failed");
        self.update(id, |message| message.replace_text(APOLOGY));
    }
}

impl<C> std::fmt::Debug for ChatOrchestrator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatOrchestrator")
            .field("messages", &self.messages.borrow().len())
            .finish_non_exhaustive()
    }
}
