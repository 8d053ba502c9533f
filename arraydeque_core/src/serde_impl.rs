//! Serde support.
//!
//! A deque serializes as `{ "items": [...], "maxlen": n | null }` and
//! deserializes through the bounded constructor, so an `items` list longer
//! than `maxlen` keeps only its trailing elements.

use crate::deque::Deque;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};

impl<T: Serialize> Serialize for Deque<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Deque", 2)?;
        state.serialize_field("items", &Items(self))?;
        state.serialize_field("maxlen", &self.maxlen())?;
        state.end()
    }
}

/// Serializes the elements in logical order without copying them out.
struct Items<'a, T>(&'a Deque<T>);

impl<T: Serialize> Serialize for Items<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

#[derive(serde::Deserialize)]
#[serde(rename = "Deque")]
struct Repr<T> {
    items: Vec<T>,
    #[serde(default)]
    maxlen: Option<usize>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Deque<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = Repr::<T>::deserialize(deserializer)?;
        Ok(Deque::from_iter_bounded(repr.items, repr.maxlen))
    }
}
