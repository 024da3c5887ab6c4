use serde::{Deserialize, Deserializer};

/// All primary keys are SQLite `INTEGER PRIMARY KEY AUTOINCREMENT`.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Deserialize a field that must tell "absent" apart from an explicit `null`.
///
/// Pair with `#[serde(default)]`: a missing key stays `None`, `null` becomes
/// `Some(None)` and a value becomes `Some(Some(v))`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
