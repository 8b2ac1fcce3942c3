//! Prompt templates for the intent gate and the execution loop.

use super::agent_loop::StepRecord;

/// Build the yes/no prompt for the intent gate.
pub fn build_gate_prompt(catalog: &str, user_input: &str) -> String {
    format!(
        r#"You decide whether a user request requires one of the available tools.

Available tools:
{catalog}

User request: {user_input}

Does answering this request require using one of the tools above? Answer Yes or No."#
    )
}

/// Build the loop prompt: tool catalog, calling convention, the user's
/// question, and the (action, observation) history so far.
pub fn build_loop_prompt(catalog: &str, user_input: &str, history: &[StepRecord]) -> String {
    let mut transcript = String::new();
    for step in history {
        transcript.push_str(&format!(
            "Action: {}\nAction Input: {}\nObservation: {}\n",
            step.action.tool_name, step.action.tool_input, step.observation
        ));
    }

    format!(
        r#"Answer the following question. You have access to these tools:
{catalog}

Use the following format:
Question: the input question
Thought: reasoning about what to do
Action: the name of the tool to use
Action Input: the input to pass to the tool
Observation: the result of the tool

Question: {user_input}
{transcript}Thought:"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Action;

    #[test]
    fn test_gate_prompt_embeds_catalog_and_request() {
        let prompt = build_gate_prompt("- **Factorial Calculator**: ...", "Factorial of 5");
        assert!(prompt.contains("Factorial Calculator"));
        assert!(prompt.contains("User request: Factorial of 5"));
        assert!(prompt.contains("Answer Yes or No"));
    }

    #[test]
    fn test_loop_prompt_includes_history() {
        let history = vec![StepRecord {
            action: Action {
                tool_name: "Factorial Calculator".to_string(),
                tool_input: "five".to_string(),
            },
            observation: "Error: Invalid input".to_string(),
        }];
        let prompt = build_loop_prompt("- tools", "Factorial of 5", &history);
        assert!(prompt.contains("Action: Factorial Calculator"));
        assert!(prompt.contains("Action Input: five"));
        assert!(prompt.contains("Observation: Error: Invalid input"));
        assert!(prompt.ends_with("Thought:"));
    }
}
