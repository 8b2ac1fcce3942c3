//! Core agent loop implementation.
//!
//! Per-request state machine: RUNNING until the first observation carrying
//! the terminal marker (success), an unresolvable action (security stop),
//! or the iteration bound (exhausted, best-effort fallback). Loop state is
//! freshly allocated per request and never shared.

use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;
use crate::llm::{CompletionClient, LlmError, OllamaClient};
use crate::tools::{ToolRegistry, TERMINAL_MARKER};

use super::intent::{LeadingNoClassifier, ReplyClassifier, CLARIFICATION_REPLY};
use super::matcher::{parse_action, resolve, Action, Resolution};
use super::prompt::{build_gate_prompt, build_loop_prompt};

/// Request-scope agent errors. Everything else the loop can encounter is
/// folded into the outcome rather than surfaced as an error.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Oracle(#[from] LlmError),
}

/// One completed loop iteration: the action the model proposed (with its
/// tool name rewritten to the canonical form) and what the tool returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub action: Action,
    pub observation: String,
}

/// Terminal state of one request's loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopOutcome {
    /// Intent gate decided no tool is needed; the loop was never entered.
    LowIntent,

    /// A terminal-marker observation was seen; `answer` has the marker and
    /// surrounding whitespace stripped.
    Success { answer: String },

    /// The model proposed an action that could not be resolved to a
    /// registered tool. No partial results are trusted.
    SecurityAbort,

    /// Iterations ran out without a terminal marker; `fallback` is the
    /// model's last raw reply, best-effort only.
    Exhausted { fallback: String },
}

/// Project a terminal loop state onto the single user-facing reply.
///
/// Low intent and security aborts map to the same fixed sentence on
/// purpose: the caller must not be able to tell whether no tool was
/// needed or a bogus tool was proposed.
pub fn extract(outcome: LoopOutcome) -> String {
    match outcome {
        LoopOutcome::Success { answer } => answer,
        LoopOutcome::Exhausted { fallback } => fallback,
        LoopOutcome::LowIntent | LoopOutcome::SecurityAbort => CLARIFICATION_REPLY.to_string(),
    }
}

/// The tool-calling agent. Holds the registry and the completion client;
/// per-request loop state lives on the stack of [`Agent::run`].
pub struct Agent {
    config: Config,
    llm: Arc<dyn CompletionClient>,
    tools: Arc<ToolRegistry>,
    classifier: Box<dyn ReplyClassifier>,
}

impl Agent {
    /// Create an agent backed by Ollama and the compiled-in tool set.
    /// Any failure here is fatal; the process must not serve traffic.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm = Arc::new(OllamaClient::new(
            config.ollama_base_url.clone(),
            config.model.clone(),
            config.oracle_timeout,
        )?);
        let tools = Arc::new(ToolRegistry::builtin()?);
        Ok(Self::with_parts(config, llm, tools))
    }

    /// Assemble an agent from explicit parts (useful for testing).
    pub fn with_parts(
        config: Config,
        llm: Arc<dyn CompletionClient>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            config,
            llm,
            tools,
            classifier: Box::new(LeadingNoClassifier),
        }
    }

    /// Handle one chat message end to end: gate, loop, extract.
    pub async fn handle(&self, message: &str) -> Result<String, AgentError> {
        let outcome = self.run(message).await?;
        Ok(extract(outcome))
    }

    /// Run the intent gate and, if it passes, the execution loop.
    pub async fn run(&self, message: &str) -> Result<LoopOutcome, AgentError> {
        let catalog = self.tools.catalog();

        let gate_reply = self
            .llm
            .complete(&build_gate_prompt(&catalog, message))
            .await?;
        if !self.classifier.wants_tool(&gate_reply) {
            tracing::info!("Intent gate closed; skipping tool loop");
            return Ok(LoopOutcome::LowIntent);
        }

        self.run_loop(&catalog, message).await
    }

    /// The bounded model/tool round-trip loop.
    async fn run_loop(&self, catalog: &str, message: &str) -> Result<LoopOutcome, AgentError> {
        let known_names = self.tools.names();
        let mut history: Vec<StepRecord> = Vec::new();
        let mut last_reply = String::new();

        for iteration in 0..self.config.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            let reply = self
                .llm
                .complete(&build_loop_prompt(catalog, message, &history))
                .await?;
            last_reply = reply.clone();

            let Some(mut action) = parse_action(&reply) else {
                // A direct terminal answer is accepted; anything else is
                // free text following neither protocol and is not trusted.
                if let Some(answer) = strip_terminal_marker(&reply) {
                    return Ok(LoopOutcome::Success { answer });
                }
                tracing::warn!("Model reply had no action and no terminal marker");
                return Ok(LoopOutcome::SecurityAbort);
            };

            match resolve(&action.tool_name, &known_names, self.config.match_threshold) {
                Resolution::Exact(_) => {}
                Resolution::Fuzzy { resolved, score } => {
                    tracing::info!(
                        "Fuzzy-matched tool name '{}' -> '{}' (score {})",
                        action.tool_name,
                        resolved,
                        score
                    );
                    action.tool_name = resolved;
                }
                Resolution::Unresolved { original, best_score } => {
                    tracing::warn!(
                        "Rejected unresolvable tool name '{}' (best score {})",
                        original,
                        best_score
                    );
                    return Ok(LoopOutcome::SecurityAbort);
                }
            }

            // Resolution guarantees the name is registered.
            let observation = match self.tools.get(&action.tool_name) {
                Some(tool) => match tool.invoke(&action.tool_input).await {
                    Ok(output) => output,
                    Err(e) => format!("Error: {}", e),
                },
                None => return Ok(LoopOutcome::SecurityAbort),
            };

            tracing::info!(
                "Tool '{}' input '{}' -> {}",
                action.tool_name,
                action.tool_input,
                truncate_for_log(&observation, 200)
            );

            if let Some(answer) = strip_terminal_marker(&observation) {
                return Ok(LoopOutcome::Success { answer });
            }

            history.push(StepRecord {
                action,
                observation,
            });
        }

        tracing::warn!(
            "No terminal marker within {} iteration(s); falling back to raw model output",
            self.config.max_iterations
        );
        Ok(LoopOutcome::Exhausted {
            fallback: last_reply,
        })
    }
}

/// If `text` contains the terminal marker, return everything after the
/// first occurrence, trimmed.
fn strip_terminal_marker(text: &str) -> Option<String> {
    text.find(TERMINAL_MARKER)
        .map(|i| text[i + TERMINAL_MARKER.len()..].trim().to_string())
}

/// Truncate a string for logging purposes.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let mut idx = max_len;
        while idx > 0 && !s.is_char_boundary(idx) {
            idx -= 1;
        }
        format!("{}... [truncated]", &s[..idx])
    }
}
