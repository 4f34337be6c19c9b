use super::*;

#[test]
fn unreserved_characters_pass_through() {
    assert_eq!(encode_component("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
}

#[test]
fn reserved_characters_are_escaped() {
    assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
    assert_eq!(encode_component("tags.any-of.prod,beta"), "tags.any-of.prod%2Cbeta");
}

#[test]
fn multibyte_input_is_escaped_bytewise() {
    assert_eq!(encode_component("é"), "%C3%A9");
}

#[test]
fn empty_pairs_produce_empty_string() {
    assert_eq!(query_string(&[]), "");
}

#[test]
fn pairs_are_joined_with_ampersands() {
    let qs = query_string(&[("page", "2".to_owned()), ("search", "a b".to_owned())]);
    assert_eq!(qs, "?page=2&search=a%20b");
}
