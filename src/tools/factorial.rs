//! Factorial tool.

use async_trait::async_trait;

use super::{describe, Tool, TERMINAL_MARKER};

/// Computes the factorial of a non-negative integer.
pub struct FactorialCalculator {
    description: String,
}

impl FactorialCalculator {
    pub fn new() -> Self {
        Self {
            description: describe(
                "Factorial Calculator",
                "<number>",
                "What is the factorial of 5?",
                "120",
            ),
        }
    }
}

impl Default for FactorialCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FactorialCalculator {
    fn name(&self) -> &str {
        "Factorial Calculator"
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn invoke(&self, input: &str) -> anyhow::Result<String> {
        let n: u32 = input
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid input. Expected a non-negative integer, got '{}'", input.trim()))?;

        let result = factorial(n)
            .ok_or_else(|| anyhow::anyhow!("Input too large. Factorial of {} overflows", n))?;

        Ok(format!("{TERMINAL_MARKER} {result}"))
    }
}

/// Iterative factorial; `None` on u128 overflow (n > 34).
fn factorial(n: u32) -> Option<u128> {
    let mut acc: u128 = 1;
    for i in 2..=n.max(1) as u128 {
        acc = acc.checked_mul(i)?;
    }
    Some(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial_values() {
        assert_eq!(factorial(0), Some(1));
        assert_eq!(factorial(1), Some(1));
        assert_eq!(factorial(5), Some(120));
        assert_eq!(factorial(10), Some(3_628_800));
    }

    #[test]
    fn test_factorial_overflow() {
        assert!(factorial(34).is_some());
        assert!(factorial(35).is_none());
    }

    #[tokio::test]
    async fn test_invoke_emits_terminal_marker() {
        let tool = FactorialCalculator::new();
        let observation = tool.invoke("5").await.unwrap();
        assert_eq!(observation, "Final Answer: 120");
    }

    #[tokio::test]
    async fn test_invoke_rejects_garbage() {
        let tool = FactorialCalculator::new();
        let err = tool.invoke("five").await.unwrap_err();
        assert!(err.to_string().contains("Expected a non-negative integer"));
    }
}
