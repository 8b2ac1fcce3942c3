//! Intent gate: a cheap pre-check asking the model whether the request
//! plausibly needs tool use at all.
//!
//! The gate is fuzzy by construction; it is a cost control, not a
//! correctness guarantee. Classification of the model's yes/no reply is
//! pluggable so the policy can change without touching the loop.

/// Fixed reply for requests the service declines to act on. Used for both
/// low-intent requests and security aborts; the caller cannot tell which.
pub const CLARIFICATION_REPLY: &str = "I'm not sure what you're asking. Can you clarify?";

/// Interprets the model's reply to the intent-gate question.
pub trait ReplyClassifier: Send + Sync {
    /// Whether the reply indicates the request needs a tool.
    fn wants_tool(&self, reply: &str) -> bool;
}

/// Default classifier: the gate closes when the reply's first alphabetic
/// token is a negative ("no" or "none", case-insensitive).
///
/// Deliberately not a bare substring test: "Noah needs a tool" or
/// "Not sure, but yes" must not close the gate on the word fragment alone.
pub struct LeadingNoClassifier;

impl ReplyClassifier for LeadingNoClassifier {
    fn wants_tool(&self, reply: &str) -> bool {
        let first = reply
            .split(|c: char| !c.is_alphabetic())
            .find(|token| !token.is_empty());

        !matches!(
            first.map(|t| t.to_ascii_lowercase()).as_deref(),
            Some("no") | Some("none")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_no_closes_gate() {
        let c = LeadingNoClassifier;
        assert!(!c.wants_tool("No"));
        assert!(!c.wants_tool("no."));
        assert!(!c.wants_tool("No, this does not need a tool."));
        assert!(!c.wants_tool("  None of the tools apply."));
    }

    #[test]
    fn test_affirmative_opens_gate() {
        let c = LeadingNoClassifier;
        assert!(c.wants_tool("Yes"));
        assert!(c.wants_tool("Yes, use the Factorial Calculator."));
    }

    #[test]
    fn test_no_substring_does_not_misfire() {
        let c = LeadingNoClassifier;
        assert!(c.wants_tool("Noah's request needs the calculator, so yes."));
        assert!(c.wants_tool("Probably yes, though Note the caveat."));
    }

    #[test]
    fn test_empty_reply_opens_gate() {
        // An uninterpretable reply falls through to the loop, where the
        // matcher still guards execution.
        assert!(LeadingNoClassifier.wants_tool(""));
    }
}
