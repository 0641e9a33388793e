use std::fs::File;
use std::io::BufReader;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use hyper::client::HttpConnector;
use hyper::Body;
use hyper::Client;
use hyper_rustls::HttpsConnector;
use hyper_rustls::HttpsConnectorBuilder;
use rustls::client::ServerCertVerified;
use rustls::client::ServerCertVerifier;
use rustls::Certificate;
use rustls::ClientConfig;
use rustls::PrivateKey;
use rustls::RootCertStore;
use rustls::ServerName;
use rustls_pemfile::Item;
use tracing::debug;

use crate::cert::{ClientConfigBuilder, ConfigBuilder};
use crate::ClientError;

pub type HyperClient = Client<HttpsConnector<HttpConnector>, Body>;

pub type HyperConfigBuilder = ClientConfigBuilder<HyperClientBuilder>;

/// hyper client over rustls, plain http is allowed for local proxies
pub struct HyperClientBuilder {
    roots: RootCertStore,
    client_auth: Option<(Vec<Certificate>, PrivateKey)>,
    skip_verify: bool,
}

impl HyperClientBuilder {
    fn add_ca_pem(mut self, reader: &mut dyn std::io::BufRead) -> Result<Self, ClientError> {
        let certs = rustls_pemfile::certs(reader)?;
        let (added, ignored) = self.roots.add_parsable_certificates(&certs);
        debug!(added, ignored, "loaded CA certificates");
        if added == 0 {
            return Err(ClientError::Other("no valid CA certificate found".to_owned()));
        }
        Ok(self)
    }

    fn set_client_auth(
        mut self,
        crt: &mut dyn std::io::BufRead,
        key: &mut dyn std::io::BufRead,
    ) -> Result<Self, ClientError> {
        let certs: Vec<Certificate> = rustls_pemfile::certs(crt)?
            .into_iter()
            .map(Certificate)
            .collect();
        if certs.is_empty() {
            return Err(ClientError::Other("no client certificate found".to_owned()));
        }
        let key = private_key(key)?;
        self.client_auth = Some((certs, key));
        Ok(self)
    }
}

fn private_key(reader: &mut dyn std::io::BufRead) -> Result<PrivateKey, ClientError> {
    for item in rustls_pemfile::read_all(reader)? {
        match item {
            Item::RSAKey(key) | Item::PKCS8Key(key) | Item::ECKey(key) => {
                return Ok(PrivateKey(key))
            }
            _ => continue,
        }
    }
    Err(ClientError::Other("no client key found".to_owned()))
}

impl ConfigBuilder for HyperClientBuilder {
    type Client = HyperClient;

    fn new() -> Self {
        Self {
            roots: RootCertStore::empty(),
            client_auth: None,
            skip_verify: false,
        }
    }

    fn build(self) -> Result<Self::Client, ClientError> {
        let builder = ClientConfig::builder().with_safe_defaults();
        let tls = if self.skip_verify {
            let builder = builder.with_custom_certificate_verifier(Arc::new(NoVerifier));
            match self.client_auth {
                Some((certs, key)) => builder.with_client_auth_cert(certs, key)?,
                None => builder.with_no_client_auth(),
            }
        } else {
            let builder = builder.with_root_certificates(self.roots);
            match self.client_auth {
                Some((certs, key)) => builder.with_client_auth_cert(certs, key)?,
                None => builder.with_no_client_auth(),
            }
        };

        let connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls)
            .https_or_http()
            .enable_http1()
            .build();

        Ok(Client::builder().build::<_, Body>(connector))
    }

    fn load_ca_certificate(self, ca_path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let mut reader = BufReader::new(File::open(ca_path)?);
        self.add_ca_pem(&mut reader)
    }

    fn load_ca_cert_with_data(self, ca_data: Vec<u8>) -> Result<Self, ClientError> {
        self.add_ca_pem(&mut Cursor::new(ca_data))
    }

    fn load_client_certificate_with_data(
        self,
        client_crt: Vec<u8>,
        client_key: Vec<u8>,
    ) -> Result<Self, ClientError> {
        self.set_client_auth(&mut Cursor::new(client_crt), &mut Cursor::new(client_key))
    }

    fn load_client_certificate<P: AsRef<Path>>(
        self,
        client_crt_path: P,
        client_key_path: P,
    ) -> Result<Self, ClientError> {
        let mut crt = BufReader::new(File::open(client_crt_path)?);
        let mut key = BufReader::new(File::open(client_key_path)?);
        self.set_client_auth(&mut crt, &mut key)
    }

    fn skip_verify(mut self) -> Self {
        self.skip_verify = true;
        self
    }
}

/// accepts any server certificate, used for `insecure-skip-tls-verify`
struct NoVerifier;

impl ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &Certificate,
        _intermediates: &[Certificate],
        _server_name: &ServerName,
        _scts: &mut dyn Iterator<Item = &[u8]>,
        _ocsp_response: &[u8],
        _now: SystemTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }
}
