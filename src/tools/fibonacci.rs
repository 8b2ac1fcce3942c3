//! Fibonacci tool.

use async_trait::async_trait;

use super::{describe, Tool, TERMINAL_MARKER};

/// Computes the n-th Fibonacci number.
pub struct FibonacciCalculator {
    description: String,
}

impl FibonacciCalculator {
    pub fn new() -> Self {
        Self {
            description: describe(
                "Fibonacci Calculator",
                "<number>",
                "What is the 10th Fibonacci number?",
                "55",
            ),
        }
    }
}

impl Default for FibonacciCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FibonacciCalculator {
    fn name(&self) -> &str {
        "Fibonacci Calculator"
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn invoke(&self, input: &str) -> anyhow::Result<String> {
        let n: u32 = input
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid input. Expected a non-negative integer, got '{}'", input.trim()))?;

        let result = fibonacci(n)
            .ok_or_else(|| anyhow::anyhow!("Input too large. Fibonacci of {} overflows", n))?;

        Ok(format!("{TERMINAL_MARKER} {result}"))
    }
}

/// Iterative Fibonacci; `None` on u128 overflow (n > 186).
fn fibonacci(n: u32) -> Option<u128> {
    if n == 0 {
        return Some(0);
    }
    let (mut a, mut b): (u128, u128) = (0, 1);
    for _ in 1..n {
        let next = a.checked_add(b)?;
        a = b;
        b = next;
    }
    Some(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_values() {
        assert_eq!(fibonacci(0), Some(0));
        assert_eq!(fibonacci(1), Some(1));
        assert_eq!(fibonacci(2), Some(1));
        assert_eq!(fibonacci(10), Some(55));
        assert_eq!(fibonacci(50), Some(12_586_269_025));
    }

    #[test]
    fn test_fibonacci_overflow() {
        assert!(fibonacci(186).is_some());
        assert!(fibonacci(187).is_none());
    }

    #[tokio::test]
    async fn test_invoke_emits_terminal_marker() {
        let tool = FibonacciCalculator::new();
        let observation = tool.invoke("10").await.unwrap();
        assert_eq!(observation, "Final Answer: 55");
    }
}
