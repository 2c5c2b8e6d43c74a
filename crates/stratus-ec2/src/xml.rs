//! XML response decoding
//!
//! Collections come wrapped as `<fooSet><item>..</item></fooSet>`, so set
//! fields go through [`item_set`] to land as plain `Vec`s.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::Result;

pub(crate) fn from_xml<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let text = String::from_utf8_lossy(body);
    Ok(quick_xml::de::from_str(&text)?)
}

#[derive(Deserialize)]
struct ItemSet<T> {
    #[serde(rename = "item", default = "Vec::new")]
    items: Vec<T>,
}

/// `<fooSet><item/>...</fooSet>` as a `Vec`; missing or empty sets are empty
pub(crate) fn item_set<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let set: Option<ItemSet<T>> = Option::deserialize(deserializer)?;
    Ok(set.map(|set| set.items).unwrap_or_default())
}

#[derive(Deserialize)]
struct TagItem {
    key: String,
    #[serde(default)]
    value: String,
}

/// `<tagSet><item><key/><value/></item></tagSet>` as a map
pub(crate) fn tag_set<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Vec<TagItem> = item_set(deserializer)?;
    Ok(items.into_iter().map(|tag| (tag.key, tag.value)).collect())
}

/// Responses whose only payload is `<return>true</return>`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReturnResponse {
    #[serde(rename = "return", default)]
    pub value: bool,
}

impl From<ReturnResponse> for bool {
    fn from(response: ReturnResponse) -> Self {
        response.value
    }
}
