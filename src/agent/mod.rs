//! Agent module - the tool-invocation control loop.
//!
//! The agent follows a bounded "tools in a loop" pattern:
//! 1. Ask the model whether the request needs a tool at all (intent gate)
//! 2. Call the model to obtain one proposed action per iteration
//! 3. Resolve the proposed tool name against the registry (exact, then
//!    fuzzy with a hard floor; below the floor the request is aborted)
//! 4. Execute the tool, stop on the first observation carrying the
//!    terminal marker, or fall back when iterations run out

mod agent_loop;
mod intent;
mod matcher;
mod prompt;

pub use agent_loop::{extract, Agent, AgentError, LoopOutcome, StepRecord};
pub use intent::{LeadingNoClassifier, ReplyClassifier, CLARIFICATION_REPLY};
pub use matcher::{parse_action, resolve, Action, Resolution};
