//! Arithmetic expression tool: computes `a - (b * c)`.

use async_trait::async_trait;

use super::{describe, Tool, TERMINAL_MARKER};

/// Evaluates `a - (b * c)` for three whitespace-separated numbers.
pub struct ComputeExpression {
    description: String,
}

impl ComputeExpression {
    pub fn new() -> Self {
        Self {
            description: describe(
                "Compute Expression",
                "<a> <b> <c>",
                "Compute 10 - 3 * 2",
                "4",
            ),
        }
    }
}

impl Default for ComputeExpression {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ComputeExpression {
    fn name(&self) -> &str {
        "Compute Expression"
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn invoke(&self, input: &str) -> anyhow::Result<String> {
        let (a, b, c) = parse_params(input).map_err(|e| {
            anyhow::anyhow!("Invalid input format. Expected three numbers. {}", e)
        })?;

        let result = a - (b * c);
        Ok(format!("{TERMINAL_MARKER} {result}"))
    }
}

fn parse_params(input: &str) -> Result<(f64, f64, f64), String> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(format!("Got {} value(s)", parts.len()));
    }

    let mut values = [0.0f64; 3];
    for (i, part) in parts.iter().enumerate() {
        values[i] = part
            .parse()
            .map_err(|_| format!("'{}' is not a number", part))?;
    }

    Ok((values[0], values[1], values[2]))
}
