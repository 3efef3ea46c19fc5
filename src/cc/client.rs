//! Authenticated HTTP client for the cloud controller.
//!
//! # Responsibilities
//! - Inject basic auth credentials into every outbound call
//! - Honor the TLS-verification bypass flag from the config
//! - Share one pooled client between uploader and poller
//!
//! # Design Decisions
//! - No explicit request timeout is configured; a hung controller is
//!   bounded only by the poll budget (see poller.rs)

use reqwest::RequestBuilder;
use url::Url;

use crate::cc::error::CcError;
use crate::config::CloudControllerConfig;

/// Cloneable wrapper around `reqwest::Client` carrying the controller base
/// address and credentials. Safe for concurrent use by many in-flight
/// requests; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CcClient {
    http: reqwest::Client,
    base: Url,
    username: String,
    password: String,
}

impl CcClient {
    /// Build a client from the cloud controller configuration.
    pub fn new(config: &CloudControllerConfig) -> Result<Self, CcError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.skip_cert_verify)
            .build()?;
        let base = Url::parse(&config.address)?;

        Ok(Self {
            http,
            base,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Base address of the cloud controller.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// POST to a path relative to the controller base, authenticated.
    pub fn post(&self, path: &str) -> Result<RequestBuilder, CcError> {
        let url = self.base.join(path)?;
        Ok(self.authenticated(self.http.post(url)))
    }

    /// GET an absolute URL (e.g., a job status URL), authenticated.
    pub fn get(&self, url: Url) -> RequestBuilder {
        self.authenticated(self.http.get(url))
    }

    fn authenticated(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(&self.username, Some(&self.password))
    }
}
