use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serializes a BTreeMap as a list of (key, value) pairs. Formats like JSON only allow string
/// keys, so maps keyed by structs (like time windows) need this.
pub fn serialize_btreemap<S: Serializer, K: Serialize, V: Serialize>(
    map: &BTreeMap<K, V>,
    s: S,
) -> Result<S::Ok, S::Error> {
    map.iter().collect::<Vec<(&K, &V)>>().serialize(s)
}

/// Inverse of `serialize_btreemap`. If a key is repeated, the last value wins.
pub fn deserialize_btreemap<
    'de,
    D: Deserializer<'de>,
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
>(
    d: D,
) -> Result<BTreeMap<K, V>, D::Error> {
    let pairs = <Vec<(K, V)>>::deserialize(d)?;
    Ok(pairs.into_iter().collect())
}
