//! Neutron resource models
//!
//! Resources mirror the Neutron JSON representation. Create/update option
//! structs skip unset fields when serialized.

pub mod extension;
pub mod floating_ip;
pub mod fwaas;
pub mod lbaas;
pub mod router;
pub mod security_group;

pub use extension::*;
pub use floating_ip::*;
pub use fwaas::*;
pub use lbaas::*;
pub use router::*;
pub use security_group::*;

use serde::{Deserialize, Serialize};

/// Generates builder-style setters for `Option` fields
///
/// # Usage
/// ```ignore
/// option_setters!(UpdateRouter { name: String, admin_state_up: bool });
/// ```
macro_rules! option_setters {
    ($ty:ty { $($field:ident : $value:ty),* $(,)? }) => {
        impl $ty {
            $(
                pub fn $field(mut self, value: impl Into<$value>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }
    };
}
pub(crate) use option_setters;

/// Provisioning status shared by Neutron resources
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Active,
    Build,
    Down,
    Error,
    Inactive,
    PendingCreate,
    PendingUpdate,
    PendingDelete,
    #[serde(other)]
    Unrecognized,
}
