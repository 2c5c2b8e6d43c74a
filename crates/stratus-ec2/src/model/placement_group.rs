//! Placement groups

use serde::Deserialize;

string_enum!(PlacementStrategy {
    Cluster => "cluster",
    Spread => "spread",
    Partition => "partition",
});

string_enum!(PlacementGroupState {
    Pending => "pending",
    Available => "available",
    Deleting => "deleting",
    Deleted => "deleted",
});

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlacementGroup {
    pub group_name: String,
    pub strategy: Option<PlacementStrategy>,
    pub state: Option<PlacementGroupState>,
    pub group_id: Option<String>,
}
