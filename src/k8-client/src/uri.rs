use http::Uri;

use k8_metadata_client::NameSpace;
use k8_types::{Crd, Spec};

use crate::ClientError;

/// uri of a single item of `S`
pub fn item_uri<S>(host: &str, name: &str, namespace: &str) -> Result<Uri, ClientError>
where
    S: Spec,
{
    object_uri(S::metadata(), host, NameSpace::for_spec::<S>(namespace), name)
}

/// uri of a single object addressed by group, version and resource
pub fn object_uri(crd: &Crd, host: &str, ns: NameSpace, name: &str) -> Result<Uri, ClientError> {
    let prefix = prefix_uri(crd, host, ns);
    let uri: Uri = format!("{prefix}/{name}").parse()?;
    Ok(uri)
}

/// generate prefix for given crd
/// if crd group is core then /api is used otherwise /apis + group
pub fn prefix_uri<N>(crd: &Crd, host: &str, ns: N) -> String
where
    N: Into<NameSpace>,
{
    let namespace = ns.into();
    let host = host.trim_end_matches('/');
    let version = crd.version;
    let plural = crd.names.plural;
    let api_prefix = match crd.group {
        "core" => "api".to_owned(),
        group => format!("apis/{group}"),
    };

    if namespace.is_all() {
        format!("{host}/{api_prefix}/{version}/{plural}")
    } else {
        format!(
            "{host}/{api_prefix}/{version}/namespaces/{}/{plural}",
            namespace.named()
        )
    }
}
