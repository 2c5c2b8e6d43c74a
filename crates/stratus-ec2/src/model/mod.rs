//! EC2 data model
//!
//! Response types deserialize from the camelCase XML EC2 returns; request
//! option types are plain builders turned into form parameters by the APIs.

use std::collections::BTreeMap;

/// Declare a string-backed enum that keeps values it does not know about.
///
/// # Usage
///
/// ```ignore
/// string_enum!(
///     /// Lifecycle state of a VPC
///     VpcState {
///         Pending => "pending",
///         Available => "available",
///     }
/// );
/// ```
macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize)]
        #[serde(from = "String")]
        pub enum $name {
            $($variant,)+
            Unrecognized(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $value,)+
                    $name::Unrecognized(value) => value,
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($value => $name::$variant,)+
                    _ => $name::Unrecognized(value),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod ami;
pub mod internet_gateway;
pub mod monitoring;
pub mod placement_group;
pub mod route_table;
pub mod security_group;
pub mod spot;
pub mod subnet;
pub mod tag;
pub mod vpc;

pub use ami::*;
pub use internet_gateway::*;
pub use monitoring::*;
pub use placement_group::*;
pub use route_table::*;
pub use security_group::*;
pub use spot::*;
pub use subnet::*;
pub use tag::*;
pub use vpc::*;

/// `Describe*` filters, name to accepted values.
///
/// Names are sent in sorted order so requests are reproducible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filters(BTreeMap<String, Vec<String>>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `name` against any of `values`; repeated names accumulate values
    pub fn filter<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .entry(name.to_string())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Shorthand for the `tag:<key>` filter
    pub fn tag(self, key: &str, value: &str) -> Self {
        self.filter(&format!("tag:{}", key), [value])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}
