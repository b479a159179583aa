//! Serde support for the containers (crate feature `serde`).
//!
//! `Optional<X>` uses `Option<X>`'s wire shape; `Either<A, B>` uses the
//! externally tagged variant form (`{"First": ..}` / `{"Second": ..}`).
//! A valueless either has no serializable value and reports an error.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::{Either, Optional};

impl<X: Serialize> Serialize for Optional<X> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_option() {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, X: Deserialize<'de>> Deserialize<'de> for Optional<X> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<X>::deserialize(deserializer).map(Optional::from)
    }
}

#[derive(serde::Serialize)]
#[serde(rename = "Either")]
enum EitherRef<'a, A, B> {
    First(&'a A),
    Second(&'a B),
}

#[derive(serde::Deserialize)]
#[serde(rename = "Either")]
enum EitherRepr<A, B> {
    First(A),
    Second(B),
}

impl<A: Serialize, B: Serialize> Serialize for Either<A, B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(a) = self.get_first() {
            EitherRef::<A, B>::First(a).serialize(serializer)
        } else if let Some(b) = self.get_second() {
            EitherRef::<A, B>::Second(b).serialize(serializer)
        } else {
            Err(serde::ser::Error::custom("cannot serialize a valueless either"))
        }
    }
}

impl<'de, A: Deserialize<'de>, B: Deserialize<'de>> Deserialize<'de> for Either<A, B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match EitherRepr::<A, B>::deserialize(deserializer)? {
            EitherRepr::First(a) => Ok(Either::first(a)),
            EitherRepr::Second(b) => Ok(Either::second(b)),
        }
    }
}
