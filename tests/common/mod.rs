#![allow(dead_code)]

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use kubercert::domain::KubercertError;
use kubercert::ports::{CommandRequest, CommandRunner};
use rcgen::{BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

pub struct Served {
    pub addr: SocketAddr,
}

pub struct TestChain {
    pub certs: Vec<CertificateDer<'static>>,
    pub key: PrivateKeyDer<'static>,
}

fn params(cn: &str, sans: &[&str], valid_days: i64) -> CertificateParams {
    let mut params = CertificateParams::new(sans.iter().map(|s| s.to_string()).collect::<Vec<_>>()).unwrap();
    params.distinguished_name = DistinguishedName::new();
    params.distinguished_name.push(DnType::CommonName, cn);
    let now = time::OffsetDateTime::now_utc();
    params.not_before = now - time::Duration::days(300);
    params.not_after = now + time::Duration::days(valid_days);
    params
}

pub fn leaf_chain(cn: &str, valid_days: i64) -> TestChain {
    let mut ca_params = params("k3s-server-ca@1700000000", &[], 3650);
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let ca_key = KeyPair::generate().unwrap();
    let ca = ca_params.self_signed(&ca_key).unwrap();

    let leaf_key = KeyPair::generate().unwrap();
    let leaf = params(cn, &["kubernetes", "kubernetes.default", "localhost", "127.0.0.1"], valid_days)
        .signed_by(&leaf_key, &ca, &ca_key)
        .unwrap();

    TestChain {
        certs: vec![CertificateDer::from(leaf.der().to_vec()), CertificateDer::from(ca.der().to_vec())],
        key: PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(leaf_key.serialize_der())),
    }
}

pub fn ca_only_chain() -> TestChain {
    let mut ca_params = params("k3s-server-ca", &["localhost"], 3650);
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let key = KeyPair::generate().unwrap();
    let ca = ca_params.self_signed(&key).unwrap();
    TestChain {
        certs: vec![CertificateDer::from(ca.der().to_vec())],
        key: PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.serialize_der())),
    }
}

pub async fn serve(chain: TestChain) -> Served {
    serve_on(chain, "127.0.0.1:0").await
}

pub async fn serve_on(chain: TestChain, bind: &str) -> Served {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(chain.certs, chain.key)
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));
    let listener = TcpListener::bind(bind).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                if let Ok(mut stream) = acceptor.accept(socket).await {
                    let _ = stream.shutdown().await;
                }
            });
        }
    });

    Served { addr }
}

#[derive(Default)]
pub struct RecordingRunner {
    pub requests: Mutex<Vec<CommandRequest>>,
    pub failing: HashSet<String>,
}

impl RecordingRunner {
    pub fn failing(commands: &[&str]) -> Self {
        Self { failing: commands.iter().map(|c| c.to_string()).collect(), ..Default::default() }
    }

    pub fn commands(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|r| r.command.clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, request: &CommandRequest) -> Result<String, KubercertError> {
        self.requests.lock().unwrap().push(request.clone());
        if request.is_dry_run() {
            return Ok(request.dry_run_response.clone());
        }
        if self.failing.contains(&request.command) {
            return Err(KubercertError::renewal(format!("Job for {} failed", request.command)));
        }
        Ok(String::new())
    }
}
