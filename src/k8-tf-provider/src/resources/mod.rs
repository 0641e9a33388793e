//! Kinds served by the provider

mod cluster;
mod cluster_resource_set;
mod common;
mod ec2_node_class;
mod machine_deployment;
mod machine_health_check;
mod node_pool;

use k8_metadata_client::MetadataClient;
use k8_types::capi::cluster::ClusterSpec;
use k8_types::capi::cluster_resource_set::ClusterResourceSetSpec;
use k8_types::capi::machine_deployment::MachineDeploymentSpec;
use k8_types::capi::machine_health_check::MachineHealthCheckSpec;
use k8_types::karpenter::ec2_node_class::Ec2NodeClassSpec;
use k8_types::karpenter::node_pool::NodePoolSpec;

use crate::{KindDataSource, KindManifest, Reader, TerraformKind};

pub type Readers<C> = Vec<Box<dyn Reader<C>>>;

/// data source and manifest for every kind
pub fn readers<C>() -> Readers<C>
where
    C: MetadataClient + 'static,
{
    let mut readers = Readers::new();
    register::<C, ClusterSpec>(&mut readers);
    register::<C, MachineDeploymentSpec>(&mut readers);
    register::<C, MachineHealthCheckSpec>(&mut readers);
    register::<C, ClusterResourceSetSpec>(&mut readers);
    register::<C, NodePoolSpec>(&mut readers);
    register::<C, Ec2NodeClassSpec>(&mut readers);
    readers
}

fn register<C, S>(readers: &mut Readers<C>)
where
    C: MetadataClient + 'static,
    S: TerraformKind,
{
    readers.push(Box::new(KindDataSource::<S>::new()));
    readers.push(Box::new(KindManifest::<S>::new()));
}
