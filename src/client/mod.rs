//! Browser chat client.
//!
//! [`ChatController`] holds the send/receive logic of the chat page and
//! talks to the outside world only through three small traits:
//!
//! - [`FrameSink`]: the WebSocket, written to on submit.
//! - [`TextInput`]: the text field the user types into.
//! - [`MessageList`]: the container incoming messages are appended to.
//!
//! The [`web`] submodule (wasm32 only) binds these traits to `web_sys`
//! and wires the controller to DOM and socket events.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Address the chat page connects to.
pub const CHAT_ENDPOINT: &str = "ws://localhost:8080";

/// Element id of the chat form.
pub const FORM_ID: &str = "formChat";

/// Element id of the text input.
pub const INPUT_ID: &str = "textField";

/// Element id of the messages container.
pub const MESSAGES_ID: &str = "messages";

/// Outbound side of the chat connection.
pub trait FrameSink {
    /// Error returned by the underlying transport.
    type Error: std::fmt::Debug;

    /// Sends one text frame.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the frame could not be queued
    /// (e.g. the socket is already closed).
    fn send_text(&self, text: &str) -> Result<(), Self::Error>;
}

/// The text field the user types messages into.
pub trait TextInput {
    /// Returns the current raw value of the field.
    fn value(&self) -> String;

    /// Replaces the value of the field.
    fn set_value(&self, value: &str);
}

/// The container that received messages are rendered into.
pub trait MessageList {
    /// Appends one block holding `text` verbatim as its text content.
    fn append_text(&self, text: &str);
}

/// Result of handling a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The trimmed text was handed to the socket and the field cleared.
    Sent(String),
    /// The socket refused the frame; the field keeps the typed text.
    SendFailed(String),
    /// The field was empty or whitespace only; nothing happened.
    Empty,
}

/// Send/receive logic of the chat page.
///
/// Every handler runs to completion on the browser event loop, so the
/// controller needs no interior synchronization.
#[derive(Debug)]
pub struct ChatController<S, I, L> {
    sink: S,
    input: I,
    messages: L,
}

impl<S, I, L> ChatController<S, I, L>
where
    S: FrameSink,
    I: TextInput,
    L: MessageList,
{
    /// Creates a controller over the given socket, input and container.
    #[must_use]
    pub const fn new(sink: S, input: I, messages: L) -> Self {
        Self {
            sink,
            input,
            messages,
        }
    }

    /// Handles a form submission.
    ///
    /// Trims the input; a non-empty result is sent as one frame and the
    /// field is cleared. If the socket refuses the frame (still connecting,
    /// or closed) the failure is logged and the field is left as typed.
    pub fn on_submit(&self) -> SubmitOutcome {
        let raw = self.input.value();
        let message = raw.trim();
        if message.is_empty() {
            return SubmitOutcome::Empty;
        }

        if let Err(err) = self.sink.send_text(message) {
            tracing::debug!(error = ?err, "send on chat socket failed");
            return SubmitOutcome::SendFailed(message.to_string());
        }
        self.input.set_value("");
        SubmitOutcome::Sent(message.to_string())
    }

    /// Handles one inbound text frame.
    pub fn on_message(&self, text: &str) {
        tracing::info!(text, "Message received");
        self.messages.append_text(text);
    }

    /// Handles the socket `open` event.
    pub fn on_open(&self) {
        tracing::info!("WebSocket connection opened");
    }

    /// Handles the socket `error` event.
    pub fn on_error(&self, detail: &str) {
        tracing::error!(error = detail, "WebSocket error");
    }

    /// Handles the socket `close` event.
    pub fn on_close(&self) {
        tracing::info!("WebSocket connection closed");
    }
}
