//! Live tests against AWS
//!
//! Configure with `STRATUS_IDENTITY` (access key id), `STRATUS_CREDENTIAL`
//! (secret key) and optionally `STRATUS_REGION`, then run with
//! `cargo test -- --ignored`. The tests create and remove their own VPC.

use std::collections::BTreeMap;

use stratus_core::ProviderSettings;
use stratus_ec2::Ec2Api;
use stratus_ec2::model::{CreateSubnetOptions, CreateVpcOptions, DescribeImagesOptions, Filters};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn ec2() -> anyhow::Result<Ec2Api> {
    init_logging();
    Ok(Ec2Api::from_settings(&ProviderSettings::from_env()?)?)
}

#[tokio::test]
#[ignore]
async fn test_live_vpc_lifecycle() -> anyhow::Result<()> {
    let ec2 = ec2()?;
    let vpc = ec2
        .vpc_api()
        .create_vpc(None, "10.20.0.0/16", &CreateVpcOptions::new())
        .await?;

    ec2.tag_api()
        .create_tags(
            None,
            &[vpc.vpc_id.as_str()],
            &BTreeMap::from([("Name".to_string(), "stratus-live".to_string())]),
        )
        .await?;

    let subnet = ec2
        .subnet_api()
        .create_subnet(None, &vpc.vpc_id, "10.20.1.0/24", &CreateSubnetOptions::new())
        .await?;
    let found = ec2
        .subnet_api()
        .filter(None, &Filters::new().filter("vpc-id", [vpc.vpc_id.as_str()]))
        .await?;
    assert!(found.iter().any(|s| s.subnet_id == subnet.subnet_id));

    assert!(ec2.subnet_api().delete_subnet(None, &subnet.subnet_id).await?);
    assert!(ec2.vpc_api().delete_vpc(None, &vpc.vpc_id).await?);
    assert!(ec2.vpc_api().describe_vpcs(None, &[vpc.vpc_id.as_str()]).await?.is_empty());
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_live_describe_amazon_images() -> anyhow::Result<()> {
    let images = ec2()?
        .ami_api()
        .describe_images(
            None,
            &DescribeImagesOptions::new()
                .owners(["amazon"])
                .filters(Filters::new().filter("name", ["amzn2-ami-hvm-*-x86_64-gp2"])),
        )
        .await?;
    assert!(!images.is_empty());
    Ok(())
}
