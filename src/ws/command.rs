//! Classification of inbound chat frames.
//!
//! A frame starting with `exchange` is a rates request and is answered to
//! the sender only. Anything else is a chat line for every client.

use crate::error::ChatError;

/// Prefix that marks a frame as an `exchange` command.
pub const EXCHANGE_PREFIX: &str = "exchange";

/// Reply to a malformed `exchange` command.
pub const EXCHANGE_USAGE: &str = "Invalid command. Usage: exchange N";

/// What an inbound text frame asks the server to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound<'a> {
    /// Relay the text to every connected client.
    Chat(&'a str),
    /// Reply with the last `days` currency quotes.
    Exchange {
        /// Number of quotes requested; `0` means all of them.
        days: usize,
    },
}

/// Classifies one inbound frame.
///
/// Arguments are separated by single spaces, so `"exchange  2"` carries
/// an empty argument and is rejected.
///
/// # Errors
///
/// Returns [`ChatError::InvalidCommand`] for an `exchange` frame without
/// exactly one numeric argument.
pub fn classify(text: &str) -> Result<Inbound<'_>, ChatError> {
    if !text.starts_with(EXCHANGE_PREFIX) {
        return Ok(Inbound::Chat(text));
    }

    let mut args = text.split(' ').skip(1);
    match (args.next(), args.next()) {
        (Some(arg), None) => parse_days(arg)
            .map(|days| Inbound::Exchange { days })
            .ok_or_else(|| ChatError::InvalidCommand(format!("{arg:?} is not a day count"))),
        (None, _) => Err(ChatError::InvalidCommand("missing day count".to_string())),
        (Some(_), Some(_)) => Err(ChatError::InvalidCommand(
            "expected exactly one argument".to_string(),
        )),
    }
}

fn parse_days(arg: &str) -> Option<usize> {
    if arg.is_empty() || !arg.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    arg.parse().ok()
}
