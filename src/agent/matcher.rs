//! Action parsing and tool-name resolution.
//!
//! Model output is free text: it may misspell or paraphrase a tool name.
//! Exact-match-only would be brittle, but unconstrained fuzzy matching
//! risks silently routing to the wrong capability, so resolution uses a
//! hard similarity floor and rejects anything below it rather than
//! picking the best guess anyway.

/// An oracle-proposed tool invocation, parsed from one model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub tool_name: String,
    pub tool_input: String,
}

/// Parse the first `Action:` / `Action Input:` pair out of a raw reply.
///
/// Returns `None` when no `Action:` line is present. A missing
/// `Action Input:` line yields an empty input; the tool reports the
/// malformed input itself.
pub fn parse_action(reply: &str) -> Option<Action> {
    let mut tool_name = None;
    let mut tool_input = None;

    for line in reply.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Action Input:") {
            if tool_input.is_none() {
                tool_input = Some(rest.trim().to_string());
            }
        } else if let Some(rest) = line.strip_prefix("Action:") {
            if tool_name.is_none() {
                tool_name = Some(rest.trim().to_string());
            }
        }
    }

    let tool_name = tool_name.filter(|n| !n.is_empty())?;
    Some(Action {
        tool_name,
        tool_input: tool_input.unwrap_or_default(),
    })
}

/// Result of resolving a proposed tool name against the known names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Name found as-is; score 100.
    Exact(String),

    /// Name matched a known name via edit distance at or above the floor.
    Fuzzy { resolved: String, score: u8 },

    /// No known name scored at or above the floor.
    Unresolved { original: String, best_score: u8 },
}

impl Resolution {
    /// The canonical tool name, if resolution succeeded.
    pub fn resolved_name(&self) -> Option<&str> {
        match self {
            Self::Exact(name) => Some(name),
            Self::Fuzzy { resolved, .. } => Some(resolved),
            Self::Unresolved { .. } => None,
        }
    }
}

/// Resolve a raw tool name against the known names.
///
/// Exact match short-circuits with score 100. Otherwise every known name
/// is scored by normalized Levenshtein similarity (0-100) and the best
/// candidate wins; ties break lexicographically (candidates are scanned
/// in sorted order and only a strictly greater score displaces the
/// incumbent). A best score below `threshold` is `Unresolved`.
pub fn resolve(raw: &str, known_names: &[&str], threshold: u8) -> Resolution {
    if known_names.iter().any(|n| *n == raw) {
        return Resolution::Exact(raw.to_string());
    }

    let mut sorted: Vec<&str> = known_names.to_vec();
    sorted.sort_unstable();

    let mut best: Option<(&str, u8)> = None;
    for name in sorted {
        let score = similarity_score(raw, name);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((name, score));
        }
    }

    match best {
        Some((name, score)) if score >= threshold => Resolution::Fuzzy {
            resolved: name.to_string(),
            score,
        },
        Some((_, score)) => Resolution::Unresolved {
            original: raw.to_string(),
            best_score: score,
        },
        None => Resolution::Unresolved {
            original: raw.to_string(),
            best_score: 0,
        },
    }
}

/// Normalized similarity between two strings, scaled to 0-100.
fn similarity_score(a: &str, b: &str) -> u8 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 100;
    }
    let dist = levenshtein(a, b);
    (100.0 * (1.0 - dist as f64 / max_len as f64)).round() as u8
}

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    let m = a_bytes.len();
    let n = b_bytes.len();

    // Single-row DP for O(min(m,n)) space
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a_bytes[i - 1] == b_bytes[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: &[&str] = &[
        "Factorial Calculator",
        "Fibonacci Calculator",
        "Compute Expression",
    ];

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("Factorial Calculator", "Factorial Calculator"), 0);
    }

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn test_exact_match_short_circuits() {
        let resolution = resolve("Factorial Calculator", NAMES, 80);
        assert_eq!(resolution, Resolution::Exact("Factorial Calculator".to_string()));
        assert_eq!(resolution.resolved_name(), Some("Factorial Calculator"));
    }

    #[test]
    fn test_misspelled_name_resolves_above_floor() {
        // "Factoral Calculatro": one deletion plus a swapped pair => distance 3 of 20
        let resolution = resolve("Factoral Calculatro", NAMES, 80);
        match resolution {
            Resolution::Fuzzy { resolved, score } => {
                assert_eq!(resolved, "Factorial Calculator");
                assert_eq!(score, 85);
            }
            other => panic!("expected fuzzy match, got {:?}", other),
        }
    }

    #[test]
    fn test_unrelated_name_is_unresolved() {
        let resolution = resolve("Delete All Files", NAMES, 80);
        match resolution {
            Resolution::Unresolved { original, best_score } => {
                assert_eq!(original, "Delete All Files");
                assert!(best_score < 80);
            }
            other => panic!("expected unresolved, got {:?}", other),
        }
        assert_eq!(resolve("Delete All Files", NAMES, 80).resolved_name(), None);
    }

    #[test]
    fn test_tie_breaks_lexicographically() {
        // Equidistant from both candidates; the lexicographically smaller wins.
        let names = &["tool_b", "tool_c"];
        let resolution = resolve("tool_a", names, 80);
        match resolution {
            Resolution::Fuzzy { resolved, .. } => assert_eq!(resolved, "tool_b"),
            other => panic!("expected fuzzy match, got {:?}", other),
        }
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // "tool_ab" vs "tool_a": distance 1 of 7 => score 86; raising the
        // threshold above it flips acceptance.
        let names = &["tool_a"];
        assert!(matches!(resolve("tool_ab", names, 86), Resolution::Fuzzy { score: 86, .. }));
        assert!(matches!(resolve("tool_ab", names, 87), Resolution::Unresolved { .. }));
    }

    #[test]
    fn test_parse_action_extracts_pair() {
        let reply = "Thought: I should use the Factorial Calculator.\n\
                     Action: Factorial Calculator\n\
                     Action Input: 5";
        let action = parse_action(reply).unwrap();
        assert_eq!(action.tool_name, "Factorial Calculator");
        assert_eq!(action.tool_input, "5");
    }

    #[test]
    fn test_parse_action_missing_input_defaults_empty() {
        let action = parse_action("Action: Fibonacci Calculator").unwrap();
        assert_eq!(action.tool_name, "Fibonacci Calculator");
        assert_eq!(action.tool_input, "");
    }

    #[test]
    fn test_parse_action_none_without_action_line() {
        assert!(parse_action("The answer is 42.").is_none());
        assert!(parse_action("Action:").is_none());
    }

    #[test]
    fn test_parse_action_takes_first_pair() {
        let reply = "Action: Factorial Calculator\nAction Input: 5\n\
                     Action: Fibonacci Calculator\nAction Input: 10";
        let action = parse_action(reply).unwrap();
        assert_eq!(action.tool_name, "Factorial Calculator");
        assert_eq!(action.tool_input, "5");
    }
}
