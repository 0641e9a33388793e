//! Karpenter kinds (`karpenter.sh` and `karpenter.k8s.aws`), all cluster scoped

pub mod ec2_node_class;
pub mod node_pool;

pub const GROUP: &str = "karpenter.sh";
pub const AWS_GROUP: &str = "karpenter.k8s.aws";
pub const V1BETA1: &str = "v1beta1";
