//! Query-protocol form encoding
//!
//! EC2 flattens lists and nested structures into numbered keys:
//! `InstanceId.1`, `Filter.1.Name`, `Filter.1.Value.2`,
//! `IpPermissions.1.IpRanges.1.CidrIp`. Indexes start at 1.

use std::collections::BTreeMap;

use crate::model::{Filters, IpPermission};

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct FormParams {
    action: String,
    params: Vec<(String, String)>,
}

impl FormParams {
    pub fn new(action: &str) -> Self {
        Self {
            action: action.to_string(),
            params: Vec::new(),
        }
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn opt_param<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value.to_string()),
            None => self,
        }
    }

    /// `true` only; EC2 treats a missing boolean as false
    pub fn flag(self, key: &str, enabled: bool) -> Self {
        if enabled { self.param(key, "true") } else { self }
    }

    /// `prefix.1`, `prefix.2`, ...
    pub fn list<I, S>(mut self, prefix: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, value) in values.into_iter().enumerate() {
            self.params
                .push((format!("{}.{}", prefix, i + 1), value.as_ref().to_string()));
        }
        self
    }

    /// `Filter.N.Name` and `Filter.N.Value.M`
    pub fn filters(mut self, filters: &Filters) -> Self {
        for (i, (name, values)) in filters.iter().enumerate() {
            let prefix = format!("Filter.{}", i + 1);
            self.params.push((format!("{}.Name", prefix), name.clone()));
            self = self.list(&format!("{}.Value", prefix), values);
        }
        self
    }

    /// `Tag.N.Key` and `Tag.N.Value`; an empty value is sent as a bare key
    pub fn tags(mut self, tags: &BTreeMap<String, String>) -> Self {
        for (i, (key, value)) in tags.iter().enumerate() {
            let prefix = format!("Tag.{}", i + 1);
            self.params.push((format!("{}.Key", prefix), key.clone()));
            if !value.is_empty() {
                self.params.push((format!("{}.Value", prefix), value.clone()));
            }
        }
        self
    }

    /// `IpPermissions.N.*` with nested `IpRanges.M.CidrIp` and `Groups.M.*`
    pub fn ip_permissions(mut self, permissions: &[IpPermission]) -> Self {
        for (i, permission) in permissions.iter().enumerate() {
            let prefix = format!("IpPermissions.{}", i + 1);
            self.params
                .push((format!("{}.IpProtocol", prefix), permission.ip_protocol.clone()));
            if let Some(from_port) = permission.from_port {
                self.params
                    .push((format!("{}.FromPort", prefix), from_port.to_string()));
            }
            if let Some(to_port) = permission.to_port {
                self.params.push((format!("{}.ToPort", prefix), to_port.to_string()));
            }
            for (j, cidr) in permission.ip_ranges.iter().enumerate() {
                self.params
                    .push((format!("{}.IpRanges.{}.CidrIp", prefix, j + 1), cidr.clone()));
            }
            for (j, group) in permission.groups.iter().enumerate() {
                let group_prefix = format!("{}.Groups.{}", prefix, j + 1);
                if let Some(group_id) = &group.group_id {
                    self.params
                        .push((format!("{}.GroupId", group_prefix), group_id.clone()));
                }
                if let Some(user_id) = &group.user_id {
                    self.params
                        .push((format!("{}.UserId", group_prefix), user_id.clone()));
                }
                if let Some(group_name) = &group.group_name {
                    self.params
                        .push((format!("{}.GroupName", group_prefix), group_name.clone()));
                }
            }
        }
        self
    }

    /// All pairs in wire order: `Action`, `Version`, then the parameters
    pub fn into_pairs(self, version: &str) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.params.len() + 2);
        pairs.push(("Action".to_string(), self.action));
        pairs.push(("Version".to_string(), version.to_string()));
        pairs.extend(self.params);
        pairs
    }
}
