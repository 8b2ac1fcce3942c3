//! # toolchat
//!
//! A chat-completion HTTP service that delegates reasoning to a language
//! model and augments it with callable tools.
//!
//! This library provides:
//! - An HTTP API for chat messages
//! - A bounded tool-invocation loop (ReAct-style action parsing)
//! - Integration with Ollama for text completion
//!
//! ## Architecture
//!
//! The service follows the "tools in a loop" pattern:
//! 1. Receive a message via `POST /chat`
//! 2. Ask the model whether the request needs a tool at all (intent gate)
//! 3. Call the model, parse the proposed action, resolve it against the
//!    tool registry (exact-then-fuzzy), execute the tool
//! 4. Stop on the first observation carrying `Final Answer:`, or after
//!    the iteration bound is reached
//!
//! ## Example
//!
//! ```rust,ignore
//! use toolchat::{config::Config, agent::Agent};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(config)?;
//! let reply = agent.handle("Calculate Factorial of 5").await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod tools;

pub use config::Config;
