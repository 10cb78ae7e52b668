//! Parsing of dispatcher output

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Placeholder for an identifier the dispatcher did not print
pub const UNKNOWN_TOKEN: &str = "unknown";

static ROOM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Room: ([a-zA-Z0-9_-]+)").expect("ROOM_RE should compile"));
static DISPATCH_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ID: ([a-zA-Z0-9_-]+)").expect("DISPATCH_ID_RE should compile"));
static TRUNK_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ID = ([a-zA-Z0-9_-]+)").expect("TRUNK_ID_RE should compile"));

/// Identifiers of a provisioned call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOutcome {
    pub room_name: String,
    pub dispatch_id: String,
}

/// Extract the room and dispatch identifiers from free-form dispatcher output
///
/// A missing token is not an error, it resolves to [`UNKNOWN_TOKEN`].
pub fn parse_dispatch_output(output: &str) -> DispatchOutcome {
    DispatchOutcome {
        room_name: capture(&ROOM_RE, output).unwrap_or_else(|| UNKNOWN_TOKEN.to_string()),
        dispatch_id: capture(&DISPATCH_ID_RE, output)
            .unwrap_or_else(|| UNKNOWN_TOKEN.to_string()),
    }
}

/// Extract the trunk id from the trunk setup output (`... ID = <id>`)
pub fn parse_trunk_id(output: &str) -> Option<String> {
    capture(&TRUNK_ID_RE, output)
}

fn capture(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_tokens() {
        let outcome = parse_dispatch_output("Room: demo-42\nID: disp-7");
        assert_eq!(
            outcome,
            DispatchOutcome {
                room_name: "demo-42".to_string(),
                dispatch_id: "disp-7".to_string(),
            }
        );
    }

    #[test]
    fn test_tokens_inside_noisy_output() {
        let output = "Dispatch created:\n  ID: AD_x1y2z3\n  Room: room_abc-1\n  Agent will call +33612345678\n";
        let outcome = parse_dispatch_output(output);

        assert_eq!(outcome.room_name, "room_abc-1");
        assert_eq!(outcome.dispatch_id, "AD_x1y2z3");
    }

    #[test]
    fn test_missing_tokens_resolve_to_unknown() {
        let only_room = parse_dispatch_output("Room: demo-42");
        assert_eq!(only_room.room_name, "demo-42");
        assert_eq!(only_room.dispatch_id, UNKNOWN_TOKEN);

        let only_id = parse_dispatch_output("ID: disp-7");
        assert_eq!(only_id.room_name, UNKNOWN_TOKEN);
        assert_eq!(only_id.dispatch_id, "disp-7");

        let nothing = parse_dispatch_output("");
        assert_eq!(nothing.room_name, UNKNOWN_TOKEN);
        assert_eq!(nothing.dispatch_id, UNKNOWN_TOKEN);
    }

    #[test]
    fn test_token_stops_at_invalid_char() {
        let outcome = parse_dispatch_output("Room: demo.42\nID: disp 7");
        assert_eq!(outcome.room_name, "demo");
        assert_eq!(outcome.dispatch_id, "disp");
    }

    #[test]
    fn test_trunk_id() {
        assert_eq!(
            parse_trunk_id("Outbound SIP trunk created: ID = ST_abc123\n"),
            Some("ST_abc123".to_string())
        );
        assert_eq!(parse_trunk_id("no trunk here"), None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(parse_dispatch_output("Room: r\nID: d")).unwrap();
        assert_eq!(json["roomName"], "r");
        assert_eq!(json["dispatchId"], "d");
    }
}
