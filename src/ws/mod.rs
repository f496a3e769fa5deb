//! WebSocket layer: upgrade handling, connection loop, command parsing.
//!
//! The chat endpoint at `/` carries raw UTF-8 text frames in both
//! directions. There is no envelope: a frame is either a chat line or an
//! `exchange N` command.

pub mod command;
pub mod connection;
pub mod handler;
