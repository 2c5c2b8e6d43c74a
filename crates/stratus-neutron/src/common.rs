//! Request helpers shared by every Neutron resource
//!
//! Neutron wraps single resources in a singular key (`{"router": {...}}`) and
//! lists in a plural key, with an optional `<plural>_links` array whose
//! `next` link carries the marker of the following page.

use std::sync::Arc;

use futures::Stream;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use stratus_core::{
    BoolFallback, Error, Fallback, Page, PaginationOptions, RestClient, RestRequest, Result,
    encode_component, paginate,
};

/// A top-level Neutron collection such as `/v2.0/routers`
#[derive(Clone, Copy, Debug)]
pub(crate) struct Collection {
    pub path: &'static str,
    pub singular: &'static str,
    pub plural: &'static str,
}

impl Collection {
    pub const fn new(path: &'static str, singular: &'static str, plural: &'static str) -> Self {
        Self {
            path,
            singular,
            plural,
        }
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, encode_component(id))
    }

    pub async fn create<B, T>(&self, client: &RestClient, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = RestRequest::post(self.path).json(&wrap(self.singular, body)?)?;
        let value: Value = client.execute_json(request).await?;
        unwrap(self.singular, value)
    }

    pub async fn get<T: DeserializeOwned>(&self, client: &RestClient, id: &str) -> Result<Option<T>> {
        let request = RestRequest::get(self.item_path(id));
        let value: Option<Value> = client.execute_json(request).await.or_none_on_not_found()?;
        value.map(|v| unwrap(self.singular, v)).transpose()
    }

    pub async fn update<B, T>(&self, client: &RestClient, id: &str, body: &B) -> Result<Option<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = RestRequest::put(self.item_path(id)).json(&wrap(self.singular, body)?)?;
        let value: Option<Value> = client.execute_json(request).await.or_none_on_not_found()?;
        value.map(|v| unwrap(self.singular, v)).transpose()
    }

    pub async fn delete(&self, client: &RestClient, id: &str) -> Result<bool> {
        client
            .execute(RestRequest::delete(self.item_path(id)))
            .await
            .or_false_on_not_found()
    }

    /// Fetch a single page
    pub async fn list<T: DeserializeOwned>(
        &self,
        client: &RestClient,
        options: &PaginationOptions,
    ) -> Result<Page<T>> {
        let request = RestRequest::get(self.path).query_pairs(options.to_query());
        let value: Option<Value> = client.execute_json(request).await.or_none_on_not_found()?;
        match value {
            Some(value) => parse_page(self.plural, value),
            None => Ok(Page::default()),
        }
    }

    /// Lazily walk every page
    pub fn list_all<T>(
        self,
        client: Arc<RestClient>,
        options: PaginationOptions,
    ) -> impl Stream<Item = Result<T>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        paginate(options, move |opts| {
            let client = client.clone();
            async move { self.list(&client, &opts).await }
        })
    }
}

/// Wrap a request body in its resource key
pub(crate) fn wrap<B: Serialize + ?Sized>(key: &str, body: &B) -> Result<Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), serde_json::to_value(body)?);
    Ok(Value::Object(map))
}

/// Take the resource out of its wrapper key
pub(crate) fn unwrap<T: DeserializeOwned>(key: &str, mut value: Value) -> Result<T> {
    let inner = value
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| Error::Parse(format!("response has no \"{key}\" object")))?;
    Ok(serde_json::from_value(inner)?)
}

/// Action endpoints (`insert_rule`, `add_router_interface`) may answer with
/// either the wrapped or the bare resource
pub(crate) fn unwrap_lenient<T: DeserializeOwned>(key: &str, value: Value) -> Result<T> {
    if value.get(key).is_some() {
        unwrap(key, value)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
    #[serde(default)]
    rel: Option<String>,
}

pub(crate) fn parse_page<T: DeserializeOwned>(plural: &str, mut value: Value) -> Result<Page<T>> {
    let items: Vec<T> = match value.get_mut(plural).map(Value::take) {
        Some(items) => serde_json::from_value(items)?,
        None => Vec::new(),
    };

    let links: Vec<Link> = match value.get_mut(format!("{plural}_links").as_str()) {
        Some(links) => serde_json::from_value(links.take())?,
        None => Vec::new(),
    };
    let next_marker = links
        .iter()
        .find(|link| link.rel.as_deref() == Some("next"))
        .and_then(|link| marker_from_href(&link.href));

    Ok(Page::new(items, next_marker))
}

fn marker_from_href(href: &str) -> Option<String> {
    let url = url::Url::parse(href).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "marker")
        .map(|(_, value)| value.into_owned())
}
