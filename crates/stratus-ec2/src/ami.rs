//! Machine images and launch permissions

use std::sync::Arc;

use serde::Deserialize;

use crate::client::Ec2Client;
use crate::error::{Ec2Fallback, Result};
use crate::form::FormParams;
use crate::model::{
    CreateImageOptions, DescribeImagesOptions, ExtraBlockDevice, Image, Permission,
    RegisterImageBackedByEbsOptions, RegisterImageOptions,
};
use crate::xml::item_set;

const LAUNCH_PERMISSION: &str = "launchPermission";
const ROOT_DEVICE: &str = "/dev/sda1";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescribeImagesResponse {
    #[serde(default, deserialize_with = "item_set")]
    images_set: Vec<Image>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageIdResponse {
    image_id: String,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LaunchPermissionItem {
    group: Option<String>,
    user_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageAttributeResponse {
    #[serde(default, deserialize_with = "item_set")]
    launch_permission: Vec<LaunchPermissionItem>,
}

#[derive(Clone, Debug)]
pub struct AmiApi {
    client: Arc<Ec2Client>,
}

impl AmiApi {
    pub(crate) fn new(client: Arc<Ec2Client>) -> Self {
        Self { client }
    }

    pub async fn describe_images(&self, region: Option<&str>, options: &DescribeImagesOptions) -> Result<Vec<Image>> {
        let params = FormParams::new("DescribeImages")
            .list("ExecutableBy", &options.executable_by)
            .list("ImageId", &options.image_ids)
            .list("Owner", &options.owners)
            .filters(&options.filters);
        self.client
            .call::<DescribeImagesResponse>(region, params)
            .await
            .map(|response| response.images_set)
            .or_empty_on_not_found()
    }

    /// Image an EBS-backed instance; returns the new image id
    pub async fn create_image(
        &self,
        region: Option<&str>,
        name: &str,
        instance_id: &str,
        options: &CreateImageOptions,
    ) -> Result<String> {
        let params = FormParams::new("CreateImage")
            .param("InstanceId", instance_id)
            .param("Name", name)
            .opt_param("Description", options.description.as_deref())
            .flag("NoReboot", options.no_reboot);
        let response: ImageIdResponse = self.client.call(region, params).await?;
        Ok(response.image_id)
    }

    pub async fn deregister_image(&self, region: Option<&str>, image_id: &str) -> Result<bool> {
        let params = FormParams::new("DeregisterImage").param("ImageId", image_id);
        self.client.call_return(region, params).await.or_false_on_not_found()
    }

    /// Register an instance-store image from its S3 manifest
    pub async fn register_image_from_manifest(
        &self,
        region: Option<&str>,
        name: &str,
        manifest_location: &str,
        options: &RegisterImageOptions,
    ) -> Result<String> {
        let params = register_params(name, options).param("ImageLocation", manifest_location);
        let response: ImageIdResponse = self.client.call(region, params).await?;
        Ok(response.image_id)
    }

    /// Register an image whose root volume (`/dev/sda1`) is created from `snapshot_id`
    pub async fn register_unix_image_backed_by_ebs(
        &self,
        region: Option<&str>,
        name: &str,
        snapshot_id: &str,
        options: &RegisterImageBackedByEbsOptions,
    ) -> Result<String> {
        let mut params = register_params(name, &options.base)
            .param("RootDeviceName", ROOT_DEVICE)
            .param("BlockDeviceMapping.1.DeviceName", ROOT_DEVICE)
            .param("BlockDeviceMapping.1.Ebs.SnapshotId", snapshot_id);

        for (i, device) in options.extra_devices.iter().enumerate() {
            let prefix = format!("BlockDeviceMapping.{}", i + 2);
            params = match device {
                ExtraBlockDevice::Ephemeral {
                    device_name,
                    virtual_name,
                } => params
                    .param(format!("{}.DeviceName", prefix), device_name)
                    .param(format!("{}.VirtualName", prefix), virtual_name),
                ExtraBlockDevice::Ebs {
                    device_name,
                    snapshot_id,
                    volume_size,
                    delete_on_termination,
                } => params
                    .param(format!("{}.DeviceName", prefix), device_name)
                    .opt_param(&format!("{}.Ebs.SnapshotId", prefix), snapshot_id.as_deref())
                    .opt_param(&format!("{}.Ebs.VolumeSize", prefix), *volume_size)
                    .param(
                        format!("{}.Ebs.DeleteOnTermination", prefix),
                        delete_on_termination.to_string(),
                    ),
            };
        }

        let response: ImageIdResponse = self.client.call(region, params).await?;
        Ok(response.image_id)
    }

    pub async fn get_launch_permission(&self, region: Option<&str>, image_id: &str) -> Result<Permission> {
        let params = FormParams::new("DescribeImageAttribute")
            .param("ImageId", image_id)
            .param("Attribute", LAUNCH_PERMISSION);
        let response: ImageAttributeResponse = self.client.call(region, params).await?;

        let mut permission = Permission::new();
        for item in response.launch_permission {
            if let Some(group) = item.group {
                permission.groups.push(group);
            }
            if let Some(user_id) = item.user_id {
                permission.user_ids.push(user_id);
            }
        }
        Ok(permission)
    }

    pub async fn add_launch_permissions(&self, region: Option<&str>, image_id: &str, permission: &Permission) -> Result<()> {
        self.modify_launch_permissions(region, image_id, "Add", permission).await
    }

    pub async fn remove_launch_permissions(
        &self,
        region: Option<&str>,
        image_id: &str,
        permission: &Permission,
    ) -> Result<()> {
        self.modify_launch_permissions(region, image_id, "Remove", permission).await
    }

    /// Back to owner-only launch
    pub async fn reset_launch_permissions(&self, region: Option<&str>, image_id: &str) -> Result<()> {
        let params = FormParams::new("ResetImageAttribute")
            .param("ImageId", image_id)
            .param("Attribute", LAUNCH_PERMISSION);
        self.client.call_return(region, params).await?;
        Ok(())
    }

    async fn modify_launch_permissions(
        &self,
        region: Option<&str>,
        image_id: &str,
        operation: &str,
        permission: &Permission,
    ) -> Result<()> {
        let mut params = FormParams::new("ModifyImageAttribute").param("ImageId", image_id);
        let entries = permission
            .groups
            .iter()
            .map(|group| ("Group", group))
            .chain(permission.user_ids.iter().map(|user_id| ("UserId", user_id)));
        for (i, (kind, value)) in entries.enumerate() {
            params = params.param(format!("LaunchPermission.{}.{}.{}", operation, i + 1, kind), value);
        }
        self.client.call_return(region, params).await?;
        Ok(())
    }
}

fn register_params(name: &str, options: &RegisterImageOptions) -> FormParams {
    FormParams::new("RegisterImage")
        .param("Name", name)
        .opt_param("Description", options.description.as_deref())
        .opt_param("Architecture", options.architecture.as_ref())
        .opt_param("KernelId", options.kernel_id.as_deref())
        .opt_param("RamdiskId", options.ramdisk_id.as_deref())
        .opt_param("VirtualizationType", options.virtualization_type.as_ref())
}
