use serde::{Deserialize, Deserializer, Serialize};

/// A candidate status report from the issue store. Bodies can be null on the
/// wire; a blank body simply never matches the marker phrase.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatusReport {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
