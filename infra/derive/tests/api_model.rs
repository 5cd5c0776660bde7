use entitle_derive::api_model;
use serde_json::json;

#[api_model]
pub struct Link {
    pub display_text: String,
    #[serde(rename = "adjustURL", skip_serializing_if = "String::is_empty")]
    pub adjust_link: String,
}

#[api_model(deny_unknown_fields = true)]
pub struct Strict {
    pub value: u32,
}

#[test]
fn camel_case_is_default() {
    let link = Link { display_text: "Upgrade".to_owned(), adjust_link: String::new() };
    assert_eq!(serde_json::to_value(&link).expect("serialize"), json!({ "displayText": "Upgrade" }));
}

#[test]
fn field_renames_take_precedence() {
    let link: Link = serde_json::from_value(json!({ "displayText": "x", "adjustURL": "https://a" }))
        .expect("deserialize");
    assert_eq!(link.adjust_link, "https://a");
}

#[test]
fn unknown_fields_are_accepted_unless_denied() {
    let lenient: Result<Link, _> = serde_json::from_value(json!({ "displayText": "x", "extra": 1 }));
    assert!(lenient.is_ok());

    let strict: Result<Strict, _> = serde_json::from_value(json!({ "value": 1, "extra": 1 }));
    assert!(strict.is_err());
}
