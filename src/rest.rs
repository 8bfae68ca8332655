use crate::catalog::Endpoint;
use crate::client::Config;
use crate::codec::{Entity, Payload, ResponseKind};
use crate::error::{RestError, Result};
use crate::session::{Session, TOKEN_HEADER};
use crate::template::{PathVars, QueryArgs};
use crate::transport::{HttpRequest, Method, ReqwestTransport, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// Client for one DSpace REST service and one login session.
///
/// All calls block until the response is read. A `RestClient` can be shared
/// between threads. Login and logout are serialized against each other, but
/// ordinary requests only take a snapshot of the token when they are built:
/// a request started while another thread logs out may still go out with the
/// old token. Callers that need strict ordering must order their own calls.
pub struct RestClient {
    transport: Arc<dyn Transport>,
    config: Config,
    session: Session,
}

impl RestClient {
    /// Create a client using the default reqwest transport
    pub fn new(config: Config) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client on top of any transport
    pub fn with_transport<T>(config: Config, transport: T) -> Self
    where
        T: Transport + 'static,
    {
        RestClient {
            transport: Arc::new(transport),
            config,
            session: Session::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current session token, if logged in
    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Encode `value` as a request entity in the configured media type
    pub fn entity<T: Serialize>(&self, value: &T) -> Result<Entity> {
        Entity::structured(self.config.media_type(), value)
    }

    /// Execute an endpoint of the catalog and unmarshal the response into `T`
    pub fn apply<T>(
        &self,
        endpoint: &Endpoint,
        vars: &PathVars,
        args: &dyn QueryArgs,
        entity: Entity,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.do_request(endpoint, vars, args, entity)?.decode()
    }

    /// Execute an endpoint of the catalog and return the undecoded payload.
    ///
    /// The URL is resolved first; a missing path variable fails here without
    /// touching the network.
    pub fn do_request(
        &self,
        endpoint: &Endpoint,
        vars: &PathVars,
        args: &dyn QueryArgs,
        entity: Entity,
    ) -> Result<Payload> {
        let url = endpoint.resolve(self.config.base(), vars, args)?;
        self.execute(endpoint.method, url, entity, endpoint.kind)
    }

    /// Send one request and interpret the response as `kind`.
    ///
    /// The session token goes out on [`TOKEN_HEADER`] when one is held.
    /// Any non-2xx status is returned as [`RestError::HttpStatus`] with the
    /// body as received. Nothing is retried.
    pub fn execute(
        &self,
        method: Method,
        url: Url,
        entity: Entity,
        kind: ResponseKind,
    ) -> Result<Payload> {
        let mut headers = Vec::with_capacity(3);
        if let Some(token) = self.session.token() {
            headers.push((TOKEN_HEADER.to_string(), token));
        }
        if let Some(content_type) = entity.content_type() {
            headers.push(("Content-Type".to_string(), content_type));
        }
        headers.push(("Accept".to_string(), kind.accept().to_string()));

        let target = url.to_string();
        let request = HttpRequest {
            method,
            url,
            headers,
            body: entity.into_body(),
        };

        let start = Instant::now();
        let response = match self.transport.execute(request) {
            Ok(response) => response,
            Err(err) => {
                debug!(%method, url = %target, elapsed = ?start.elapsed(), error = %err, "request failed");
                return Err(err);
            }
        };
        debug!(
            %method,
            url = %target,
            status = response.status,
            elapsed = ?start.elapsed(),
            "request completed"
        );

        if !response.is_success() {
            return Err(RestError::http(
                response.status,
                String::from_utf8_lossy(&response.body).into_owned(),
            ));
        }

        Payload::from_response(kind, response, self.config.media_type())
    }
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.config.base_url())
            .field("media_type", &self.config.media_type())
            .field("authenticated", &self.session.is_authenticated())
            .finish_non_exhaustive()
    }
}
