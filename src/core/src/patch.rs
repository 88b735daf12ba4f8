use serde::{Deserialize, Deserializer};

/// Deserializer for doubly-optional patch fields. A plain
/// `Option<Option<T>>` collapses an explicit JSON `null` into the
/// outer `None`; routing it through here keeps the two apart:
/// an absent field stays `None`, `null` becomes `Some(None)`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::deserialize(de).map(Some)
}
