//! Machine images

use std::collections::BTreeMap;

use serde::Deserialize;

use super::Filters;
use crate::xml::{item_set, tag_set};

string_enum!(ImageState {
    Available => "available",
    Pending => "pending",
    Invalid => "invalid",
    Deregistered => "deregistered",
    Transient => "transient",
    Failed => "failed",
    Error => "error",
});

string_enum!(Architecture {
    I386 => "i386",
    X86_64 => "x86_64",
    Arm64 => "arm64",
});

string_enum!(ImageType {
    Machine => "machine",
    Kernel => "kernel",
    Ramdisk => "ramdisk",
});

string_enum!(RootDeviceType {
    Ebs => "ebs",
    InstanceStore => "instance-store",
});

string_enum!(VirtualizationType {
    Paravirtual => "paravirtual",
    Hvm => "hvm",
});

string_enum!(Hypervisor {
    Xen => "xen",
    Ovm => "ovm",
    Nitro => "nitro",
});

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EbsBlockDevice {
    pub snapshot_id: Option<String>,
    pub volume_size: Option<u32>,
    pub delete_on_termination: bool,
    pub volume_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlockDeviceMapping {
    pub device_name: String,
    pub virtual_name: Option<String>,
    pub ebs: Option<EbsBlockDevice>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Image {
    pub image_id: String,
    pub image_location: Option<String>,
    pub image_state: Option<ImageState>,
    #[serde(rename = "imageOwnerId")]
    pub owner_id: Option<String>,
    pub image_owner_alias: Option<String>,
    pub is_public: bool,
    pub architecture: Option<Architecture>,
    pub image_type: Option<ImageType>,
    pub kernel_id: Option<String>,
    pub ramdisk_id: Option<String>,
    pub platform: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub root_device_type: Option<RootDeviceType>,
    pub root_device_name: Option<String>,
    #[serde(deserialize_with = "item_set")]
    pub block_device_mapping: Vec<BlockDeviceMapping>,
    pub virtualization_type: Option<VirtualizationType>,
    pub hypervisor: Option<Hypervisor>,
    pub creation_date: Option<String>,
    #[serde(rename = "tagSet", deserialize_with = "tag_set")]
    pub tags: BTreeMap<String, String>,
}

/// Who may launch an image: `all` and/or specific accounts
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Permission {
    pub groups: Vec<String>,
    pub user_ids: Vec<String>,
}

impl Permission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everyone may launch
    pub fn public() -> Self {
        Self::default().group("all")
    }

    pub fn group(mut self, group: &str) -> Self {
        self.groups.push(group.to_string());
        self
    }

    pub fn user_id(mut self, user_id: &str) -> Self {
        self.user_ids.push(user_id.to_string());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.user_ids.is_empty()
    }
}

// ============================================================================
// Options
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DescribeImagesOptions {
    pub image_ids: Vec<String>,
    /// Account ids, or `self`, `amazon`, `aws-marketplace`
    pub owners: Vec<String>,
    pub executable_by: Vec<String>,
    pub filters: Filters,
}

impl DescribeImagesOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image_ids<I: IntoIterator<Item = S>, S: Into<String>>(mut self, ids: I) -> Self {
        self.image_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn owners<I: IntoIterator<Item = S>, S: Into<String>>(mut self, owners: I) -> Self {
        self.owners.extend(owners.into_iter().map(Into::into));
        self
    }

    pub fn executable_by<I: IntoIterator<Item = S>, S: Into<String>>(mut self, accounts: I) -> Self {
        self.executable_by.extend(accounts.into_iter().map(Into::into));
        self
    }

    pub fn filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreateImageOptions {
    pub description: Option<String>,
    /// Skip the instance shutdown; the image may be inconsistent
    pub no_reboot: bool,
}

impl CreateImageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn no_reboot(mut self) -> Self {
        self.no_reboot = true;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterImageOptions {
    pub description: Option<String>,
    pub architecture: Option<Architecture>,
    pub kernel_id: Option<String>,
    pub ramdisk_id: Option<String>,
    pub virtualization_type: Option<VirtualizationType>,
}

impl RegisterImageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = Some(architecture);
        self
    }

    pub fn kernel_id(mut self, kernel_id: &str) -> Self {
        self.kernel_id = Some(kernel_id.to_string());
        self
    }

    pub fn ramdisk_id(mut self, ramdisk_id: &str) -> Self {
        self.ramdisk_id = Some(ramdisk_id.to_string());
        self
    }

    pub fn virtualization_type(mut self, virtualization_type: VirtualizationType) -> Self {
        self.virtualization_type = Some(virtualization_type);
        self
    }
}

/// An extra device mapped into an EBS-backed image
#[derive(Clone, Debug, PartialEq)]
pub enum ExtraBlockDevice {
    /// Instance store volume such as `ephemeral0`
    Ephemeral {
        device_name: String,
        virtual_name: String,
    },
    Ebs {
        device_name: String,
        snapshot_id: Option<String>,
        volume_size: Option<u32>,
        delete_on_termination: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegisterImageBackedByEbsOptions {
    pub base: RegisterImageOptions,
    pub extra_devices: Vec<ExtraBlockDevice>,
}

impl RegisterImageBackedByEbsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: &str) -> Self {
        self.base = self.base.description(description);
        self
    }

    pub fn architecture(mut self, architecture: Architecture) -> Self {
        self.base = self.base.architecture(architecture);
        self
    }

    pub fn kernel_id(mut self, kernel_id: &str) -> Self {
        self.base = self.base.kernel_id(kernel_id);
        self
    }

    pub fn ramdisk_id(mut self, ramdisk_id: &str) -> Self {
        self.base = self.base.ramdisk_id(ramdisk_id);
        self
    }

    pub fn virtualization_type(mut self, virtualization_type: VirtualizationType) -> Self {
        self.base = self.base.virtualization_type(virtualization_type);
        self
    }

    pub fn add_ephemeral_device(mut self, device_name: &str, virtual_name: &str) -> Self {
        self.extra_devices.push(ExtraBlockDevice::Ephemeral {
            device_name: device_name.to_string(),
            virtual_name: virtual_name.to_string(),
        });
        self
    }

    pub fn add_ebs_device_from_snapshot(
        mut self,
        device_name: &str,
        snapshot_id: &str,
        delete_on_termination: bool,
    ) -> Self {
        self.extra_devices.push(ExtraBlockDevice::Ebs {
            device_name: device_name.to_string(),
            snapshot_id: Some(snapshot_id.to_string()),
            volume_size: None,
            delete_on_termination,
        });
        self
    }

    pub fn add_new_ebs_device(mut self, device_name: &str, volume_size: u32, delete_on_termination: bool) -> Self {
        self.extra_devices.push(ExtraBlockDevice::Ebs {
            device_name: device_name.to_string(),
            snapshot_id: None,
            volume_size: Some(volume_size),
            delete_on_termination,
        });
        self
    }
}
