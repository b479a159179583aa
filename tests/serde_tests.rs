//! Round-trips through serde_json (crate feature `serde`).
#![cfg(feature = "serde")]

use twofold::{just, Either, Optional};

#[test]
fn optional_uses_option_wire_shape() {
    let set = just(7);
    assert_eq!(serde_json::to_string(&set).unwrap(), "7");

    let unset = Optional::<i32>::nothing();
    assert_eq!(serde_json::to_string(&unset).unwrap(), "null");

    let back: Optional<i32> = serde_json::from_str("7").unwrap();
    assert_eq!(back, set);

    let back: Optional<i32> = serde_json::from_str("null").unwrap();
    assert!(!back.is_set());
}

#[test]
fn either_is_externally_tagged() {
    let first = Either::<i32, String>::first(3);
    assert_eq!(serde_json::to_string(&first).unwrap(), r#"{"First":3}"#);

    let second = Either::<i32, String>::second(String::from("x"));
    assert_eq!(serde_json::to_string(&second).unwrap(), r#"{"Second":"x"}"#);

    let back: Either<i32, String> = serde_json::from_str(r#"{"First":3}"#).unwrap();
    assert_eq!(back, first);

    let back: Either<i32, String> = serde_json::from_str(r#"{"Second":"x"}"#).unwrap();
    assert_eq!(back, second);
}

#[test]
fn nested_containers_round_trip() {
    let nested: Optional<Either<i32, String>> = just(Either::second(String::from("deep")));
    let json = serde_json::to_string(&nested).unwrap();
    let back: Optional<Either<i32, String>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, nested);
}
