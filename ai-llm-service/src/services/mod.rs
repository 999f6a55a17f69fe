//! Provider-specific HTTP clients.

pub mod gemini_service;
