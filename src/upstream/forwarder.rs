//! Issue a forward request through its session proxy and buffer the reply.

use crate::http::request::ForwardRequest;
use crate::http::response::ForwardResponse;
use crate::routing::ProxyEndpoint;
use crate::security::headers;
use crate::upstream::client::ClientFactory;
use crate::upstream::UpstreamError;

#[derive(Debug, Clone)]
pub struct Forwarder {
    clients: ClientFactory,
}

impl Forwarder {
    pub fn new(clients: ClientFactory) -> Self {
        Self { clients }
    }

    /// One outbound exchange. Never retried, never cached.
    pub async fn forward(
        &self,
        request: ForwardRequest,
        endpoint: &ProxyEndpoint,
    ) -> Result<ForwardResponse, UpstreamError> {
        let client = self.clients.build(endpoint)?;

        let mut outbound = client
            .request(request.method.to_method(), request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            outbound = outbound.body(body);
        }

        let response = outbound.send().await.map_err(UpstreamError::from_send)?;

        let status = response.status();
        let headers = headers::flatten(response.headers());
        let body = response.bytes().await.map_err(UpstreamError::from_body)?;

        Ok(ForwardResponse {
            status,
            headers,
            body,
        })
    }
}
