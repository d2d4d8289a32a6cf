use mailparse::ParsedMail;
use mime_select::{NormalizedType, PartHandler, Preference, Result, SelectError, Selector};

// --- NormalizedType ---

#[test]
fn test_parse_simple() {
    let key = NormalizedType::parse("text/html").unwrap();
    assert_eq!(key.as_str(), "text/html");
}

#[test]
fn test_parse_lowercases() {
    let key = NormalizedType::parse("TEXT/HTML").unwrap();
    assert_eq!(key.as_str(), "text/html");
}

#[test]
fn test_parse_strips_parameters() {
    let key = NormalizedType::parse("text/plain; charset=utf-8; format=flowed").unwrap();
    assert_eq!(key.as_str(), "text/plain");
}

#[test]
fn test_parse_trims_whitespace() {
    let key = NormalizedType::parse("  Text/HTML  ").unwrap();
    assert_eq!(key.as_str(), "text/html");
}

#[test]
fn test_parse_rejects_malformed() {
    let cases = [
        "garbage",
        "",
        "/html",
        "text/",
        "text/sub/extra",
        ";charset=utf-8",
        "text/plain extra",
    ];
    for raw in &cases {
        let err = NormalizedType::parse(raw).unwrap_err();
        assert!(
            matches!(err, SelectError::MalformedContentType(_)),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn test_parse_keeps_original_in_error() {
    let err = NormalizedType::parse("bogus").unwrap_err();
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn test_equality_ignores_source_spelling() {
    let a = NormalizedType::parse("Text/Plain; charset=us-ascii").unwrap();
    let b = NormalizedType::parse("text/plain").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_display() {
    let key = NormalizedType::parse("Message/Delivery-Status").unwrap();
    assert_eq!(key.to_string(), "message/delivery-status");
}

#[test]
fn test_serde_round_trip() {
    let key = NormalizedType::parse("text/html").unwrap();
    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, "\"text/html\"");

    let back: NormalizedType = serde_json::from_str(&json).unwrap();
    assert_eq!(back, key);
}

// --- PartHandler ---

fn keep_children<'a>(
    selector: &Selector,
    node: &'a ParsedMail<'a>,
    prefs: Preference<'_>,
) -> Result<Vec<&'a ParsedMail<'a>>> {
    selector.select(&node.subparts, prefs)
}

fn drop_all<'a>(
    _selector: &Selector,
    _node: &'a ParsedMail<'a>,
    _prefs: Preference<'_>,
) -> Result<Vec<&'a ParsedMail<'a>>> {
    Ok(Vec::new())
}

#[test]
fn test_leaf_handlers_are_equal() {
    assert_eq!(PartHandler::Leaf, PartHandler::Leaf);
}

#[test]
fn test_composite_handler_equal_to_itself() {
    assert_eq!(
        PartHandler::Composite(keep_children),
        PartHandler::Composite(keep_children)
    );
}

#[test]
fn test_distinct_handlers_are_not_equal() {
    assert_ne!(PartHandler::Leaf, PartHandler::Composite(keep_children));
    assert_ne!(
        PartHandler::Composite(keep_children),
        PartHandler::Composite(drop_all)
    );
}
