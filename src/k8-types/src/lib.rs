mod crd;
mod int_or_string;
mod metadata;
mod quantity;
#[cfg(feature = "capi")]
pub mod capi;
#[cfg(feature = "karpenter")]
pub mod karpenter;

pub use self::crd::*;
pub use self::int_or_string::Int32OrString;
pub use self::metadata::*;
pub use self::quantity::Quantity;
pub use self::spec_def::*;

mod spec_def {

    use std::fmt::Debug;

    use serde::de::DeserializeOwned;
    use serde::Deserialize;
    use serde::Serialize;

    use super::Crd;

    pub trait Status:
        Sized + Debug + Clone + Default + Serialize + DeserializeOwned + Send + Sync
    {
    }

    /// Kubernetes Spec
    pub trait Spec:
        Sized + Debug + Clone + Default + Serialize + DeserializeOwned + Send + Sync
    {
        type Status: Status;

        /// if true, spec is namespaced
        const NAME_SPACED: bool = true;

        /// group, version and names of the resource
        fn metadata() -> &'static Crd;

        fn label() -> &'static str {
            Self::metadata().names.kind
        }

        fn api_version() -> String {
            Self::metadata().api_version()
        }

        fn kind() -> String {
            Self::metadata().names.kind.to_owned()
        }
    }

    /// status for kinds whose status is never read
    #[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
    pub struct DefaultStatus {}

    impl Status for DefaultStatus {}
}
