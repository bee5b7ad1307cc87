//! Property-based tests for argument parsing and action routing.

mod common;

use proptest::prelude::*;
use spindle_dispatch::{
    is_base_method, parse_action_arguments, ArgValue, ComponentManager, DispatchError, Request,
    Vars,
};

use common::Fixture;

// Action names the counter fixture declares or routes through a listener
const KNOWN: &[&str] = &[
    "increment", "label", "total", "fail", "on_saved", "reset", "secret", "saved", "cleared",
    "rerender", "ghost", "blank",
];

fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<i64>().prop_map(|n| n.to_string()),
        "[a-z]{1,8}",
        "[a-z]{1,8}".prop_map(|s| format!("'{s}'")),
        "[a-z]{1,8}".prop_map(|s| format!("\"{s}\"")),
        Just(String::new()),
        Just("  ".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_parsed_arguments_are_trimmed_and_unquoted(raw in ".*") {
        for arg in parse_action_arguments(&raw) {
            if let ArgValue::Str(s) = arg {
                prop_assert!(!s.is_empty());
                prop_assert_eq!(s.trim(), s.as_str());
                prop_assert!(!s.contains('"') && !s.contains('\''));
            }
        }
    }

    #[test]
    fn test_argument_count_matches_nonblank_tokens(tokens in prop::collection::vec(token_strategy(), 0..8)) {
        let raw = tokens.join(",");
        let expected = tokens.iter().filter(|t| !t.trim().is_empty()).count();
        prop_assert_eq!(parse_action_arguments(&raw).len(), expected);
    }

    #[test]
    fn test_integers_parse_as_integers(n in any::<i64>()) {
        prop_assert_eq!(parse_action_arguments(&n.to_string()), vec![ArgValue::Int(n)]);
    }

    #[test]
    fn test_unknown_actions_never_dispatch(action in "[a-z_]{1,12}") {
        prop_assume!(!KNOWN.contains(&action.as_str()) && !is_base_method(&action));

        let fixture = Fixture::new();
        let request = Request::post();
        let resolver = fixture.resolver();
        let mut manager = ComponentManager::new(&resolver, &request, "c1", "counter", false).unwrap();

        let result = manager.process(&action, &Vars::new(), &Vars::new());
        let is_method_not_found = matches!(result, Err(DispatchError::ComponentMethodNotFound { .. }));
        prop_assert!(is_method_not_found);
    }
}
