/*!
 * Tests for filter selectors
 */

use mortydex::models::{FilterState, Selector, SelectorKind};

#[test]
fn test_every_all_combination_should_send_no_parameters() {
    // 2^4 combinations of All / concrete; only the All-only one must be empty
    for mask in 0u8..16 {
        let mut filters = FilterState::default();
        for (bit, kind) in SelectorKind::ALL_KINDS.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                filters.set(*kind, Selector::from("x"));
            }
        }
        let pairs = filters.query_pairs();
        assert_eq!(pairs.len(), mask.count_ones() as usize);
        assert!(pairs.iter().all(|(_, value)| value != "All"));
    }
}

#[test]
fn test_selector_all_string_should_parse_to_sentinel() {
    assert_eq!(Selector::from("All"), Selector::All);
    assert_eq!(Selector::from("all"), Selector::Value("all".to_string()));
    assert_eq!(Selector::from(None::<String>), Selector::All);
}

#[test]
fn test_filter_state_should_serialize_with_wire_names() {
    let filters = FilterState {
        kind: Selector::from("Parasite"),
        ..FilterState::default()
    };
    let json = serde_json::to_value(&filters).unwrap();
    assert_eq!(json["type"], "Parasite");
    assert_eq!(json["status"], "All");

    let back: FilterState = serde_json::from_value(json).unwrap();
    assert_eq!(back, filters);
}
