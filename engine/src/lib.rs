//! Rocky Engine Library
//!
//! This library provides the core functionality of the Rocky engine: the
//! conversational tool-calling orchestrator that connects in-world chat to
//! a remote reasoning agent. It is used by both the main binary and
//! integration tests.

/// Configuration management module
pub mod config;

/// Remote agent client boundary
pub mod remote;

/// Stream event decoding
pub mod stream;

/// Turn executor and session management
pub mod agent;

/// Tool registry, parameter coercion, and action handlers
pub mod tools;

/// Chat bridge between the world and the turn executor
pub mod chat;

/// Telemetry and Observability
pub mod telemetry;

/// CLI interface module
pub mod cli;

/// Command handlers module
pub mod handlers;
