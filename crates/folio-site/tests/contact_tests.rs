//! Contact deep-link tests

use folio_site::{ContactError, ContactField, ContactLink, ContactMessage};
use proptest::prelude::*;

fn link() -> ContactLink {
    ContactLink::new("+1 555 0100").unwrap()
}

#[test]
fn test_link_points_at_recipient() {
    let message = ContactMessage::new("Ada", "ada@example.com", "Hello", "Nice site");
    let url = link().with_recipient("Sam").build(&message).unwrap();

    assert_eq!(url.scheme(), "https");
    assert_eq!(url.host_str(), Some("wa.me"));
    assert_eq!(url.path(), "/15550100");

    let (key, text) = url.query_pairs().next().unwrap();
    assert_eq!(key, "text");
    assert_eq!(text, message.text(Some("Sam")));
}

#[test]
fn test_text_is_percent_encoded_as_a_uri_component() {
    let message = ContactMessage::new("Ada", "ada@example.com", "Hi (again)", "a+b c");
    let url = link().with_recipient("Sam").build(&message).unwrap();
    let query = url.query().unwrap();

    assert!(
        query.starts_with("text=Hi%20Sam!%20%F0%9F%91%8B%0A%0A*Name%3A*%20Ada%0A"),
        "{query}"
    );
    assert!(query.contains("*Subject%3A*%20Hi%20(again)"), "{query}");
    assert!(query.ends_with("a%2Bb%20c"), "{query}");
    assert!(!query.contains('+'));
}

#[test]
fn test_custom_base_url() {
    let message = ContactMessage::new("Ada", "ada@example.com", "Hello", "Hi");
    let url = link()
        .with_base_url("https://chat.example.org/send")
        .unwrap()
        .build(&message)
        .unwrap();
    assert!(url.as_str().starts_with("https://chat.example.org/send/15550100?text="));
}

#[test]
fn test_invalid_submission_builds_no_link() {
    let missing = ContactMessage::new("Ada", "", "Hello", "Hi");
    assert_eq!(
        link().build(&missing).unwrap_err(),
        ContactError::MissingField(ContactField::Email)
    );

    let bad_email = ContactMessage::new("Ada", "not-an-email", "Hello", "Hi");
    assert_eq!(link().build(&bad_email).unwrap_err(), ContactError::InvalidEmail);
}

proptest! {
    #[test]
    fn prop_text_round_trips_through_url(
        name in "[A-Za-z][A-Za-z &?=#%+]{0,20}",
        subject in "[A-Za-z0-9][A-Za-z0-9 &?=/]{0,20}",
        body in "[A-Za-z0-9][A-Za-z0-9 \n&?=#%+é👋]{0,60}",
    ) {
        let message = ContactMessage::new(name, "someone@example.com", subject, body);
        let url = link().build(&message).unwrap();

        let expected = message.validate().unwrap().text(None);
        let decoded: Vec<_> = url.query_pairs().collect();
        prop_assert_eq!(decoded.len(), 1);
        prop_assert_eq!(decoded[0].1.as_ref(), expected.as_str());
    }
}
