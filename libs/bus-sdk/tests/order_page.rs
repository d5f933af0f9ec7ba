use bus_sdk::{By, Direction, Page};

#[test]
fn order_display_matches_parse_input() {
    let mappings = [("email", "email")];
    let by = By::parse(&mappings, "email,DESC", By::new("email", Direction::Asc)).expect("parse");
    assert_eq!(by.to_string(), "email,DESC");
}

#[test]
fn direction_serializes_uppercase() {
    let json = serde_json::to_string(&Direction::Desc).expect("serialize");
    assert_eq!(json, "\"DESC\"");
}

#[test]
fn page_new_rejects_zero() {
    assert!(Page::new(0, 10).is_err());
    assert!(Page::new(1, 0).is_err());
    let page = Page::new(2, 5).expect("page");
    assert_eq!(page.offset(), 5);
}

#[test]
fn page_default_is_first_page() {
    let page = Page::default();
    assert_eq!(page.number(), 1);
    assert_eq!(page.offset(), 0);
}

#[test]
fn page_deserialize_goes_through_validation() {
    let page: Page = serde_json::from_str(r#"{"number":3,"rows":20}"#).expect("valid page");
    assert_eq!(page.offset(), 40);

    let zero_number = serde_json::from_str::<Page>(r#"{"number":0,"rows":10}"#);
    assert!(zero_number.is_err());

    let zero_rows = serde_json::from_str::<Page>(r#"{"number":1,"rows":0}"#);
    let err = zero_rows.expect_err("zero rows").to_string();
    assert!(err.contains("rows value too small"), "{err}");
}

#[test]
fn page_serializes_number_and_rows() {
    let page = Page::new(2, 5).expect("page");
    let json = serde_json::to_value(page).expect("serialize");
    assert_eq!(json, serde_json::json!({ "number": 2, "rows": 5 }));
}
