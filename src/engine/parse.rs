//! Best-effort JSON array extraction from free-form model output.
//!
//! Models are asked for a bare JSON array but routinely wrap it in prose or
//! markdown. The scan takes the FIRST bracketed substring, matched
//! non-greedily up to the first closing bracket, and tries to parse that.
//! When a response contains several bracketed regions, the first one wins.

use std::sync::OnceLock;

use regex::Regex;

/// Non-greedy bracket scan, dot matches newlines
fn array_regex() -> &'static Regex {
    static ARRAY_RE: OnceLock<Regex> = OnceLock::new();
    ARRAY_RE.get_or_init(|| Regex::new(r"(?s)\[.*?\]").expect("static regex"))
}

/// Locate the first bracketed substring in a model response
pub fn first_bracketed(response: &str) -> Option<&str> {
    array_regex().find(response).map(|m| m.as_str())
}

/// Parse the first bracketed substring as a JSON array of values.
///
/// Array elements are accepted as-is: strings are used verbatim, anything
/// else is rendered as its JSON text. Returns `None` when there is no
/// bracket match or the match does not parse, so callers can distinguish
/// "bad response" from "empty array".
pub fn parse_value_array(response: &str) -> Option<Vec<String>> {
    let candidate = first_bracketed(response)?;
    let values = serde_json::from_str::<Vec<serde_json::Value>>(candidate).ok()?;

    Some(
        values
            .into_iter()
            .map(|v| match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
    )
}

/// Parse a model response into a list of task strings.
///
/// Same scan as `parse_value_array`, collapsing the no-array case into an
/// empty vec: callers on the extraction path treat both the same way.
pub fn parse_string_array(response: &str) -> Vec<String> {
    parse_value_array(response).unwrap_or_default()
}

/// Parse a model response into a ranked id list.
///
/// Every array element is kept, including ones that could never name a
/// task: a hallucinated or malformed id still occupies its rank slot, so
/// list length and the positions of the ids around it are preserved.
pub fn parse_ranked_ids(response: &str) -> Option<Vec<String>> {
    parse_value_array(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_plain_array() {
        let tasks = parse_string_array(r#"["buy milk", "call mom"]"#);
        assert_eq!(tasks, vec!["buy milk", "call mom"]);
    }

    #[test]
    fn test_array_with_surrounding_prose() {
        let tasks = parse_string_array(r#"Sure! ["buy milk", "call mom"]"#);
        assert_eq!(tasks, vec!["buy milk", "call mom"]);
    }

    #[test]
    fn test_no_brackets_yields_empty() {
        assert!(parse_string_array("I could not find any tasks.").is_empty());
    }

    #[test]
    fn test_unparseable_brackets_yield_empty() {
        assert!(parse_string_array("[not, valid, json]").is_empty());
    }

    #[test]
    fn test_first_bracket_wins() {
        // Two candidate arrays; the scan must take the first
        let tasks = parse_string_array(r#"["first"] and later ["second"]"#);
        assert_eq!(tasks, vec!["first"]);
    }

    #[test]
    fn test_multiline_array() {
        let tasks = parse_string_array("[\n  \"buy milk\",\n  \"call mom\"\n]");
        assert_eq!(tasks, vec!["buy milk", "call mom"]);
    }

    #[test]
    fn test_non_string_elements_accepted_as_is() {
        let tasks = parse_string_array(r#"["buy milk", 42]"#);
        assert_eq!(tasks, vec!["buy milk".to_string(), "42".to_string()]);
    }

    #[test]
    fn test_ranked_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let response = format!(r#"Ranked: ["{}", "{}"]"#, b, a);

        let ids = parse_ranked_ids(&response).unwrap();
        assert_eq!(ids, vec![b.to_string(), a.to_string()]);
    }

    #[test]
    fn test_ranked_ids_keep_malformed_entries() {
        let a = Uuid::new_v4();
        let response = format!(r#"["{}", "not-a-uuid", 7]"#, a);

        // malformed entries stay in place: the list length and every
        // element's position survive parsing
        let ids = parse_ranked_ids(&response).unwrap();
        assert_eq!(ids, vec![a.to_string(), "not-a-uuid".to_string(), "7".to_string()]);
    }

    #[test]
    fn test_ranked_ids_none_without_brackets() {
        assert!(parse_ranked_ids("no array here").is_none());
        assert!(parse_ranked_ids("[broken").is_none());
    }
}
