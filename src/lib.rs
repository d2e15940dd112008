//! Chatbot Relay Library
//!
//! This library provides the HTTP relay between the web client and the
//! chatbot backend, including request validation, the backend gateway,
//! and the response envelopes.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
