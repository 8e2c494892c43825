//! Shared hyper plumbing for the HTTP client implementations.

use std::sync::Arc;
use std::time::Duration;

use hyper::body::{Bytes, to_bytes};
use hyper::client::HttpConnector;
use hyper::{Body, Client, Request, StatusCode};
use hyper_rustls::HttpsConnector;
use rustls::{ClientConfig, OwnedTrustAnchor, RootCertStore};
use tokio::time::timeout;
use webpki_roots::TLS_SERVER_ROOTS;

use crate::traits::{ClientError, ClientResult};

pub(crate) type SharedClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Builds a client that speaks HTTPS with webpki roots while still allowing
/// plain HTTP, since local Strapi backends run without TLS.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn build_client() -> ClientResult<SharedClient> {
    let mut roots = RootCertStore::empty();
    roots.add_trust_anchors(TLS_SERVER_ROOTS.iter().map(|anchor| {
        OwnedTrustAnchor::from_subject_spki_name_constraints(
            anchor.subject,
            anchor.spki,
            anchor.name_constraints,
        )
    }));

    let config = ClientConfig::builder()
        .with_safe_defaults()
        .with_root_certificates(roots)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.enforce_http(false);

    let connector = HttpsConnector::from((http, Arc::new(config)));

    Ok(Client::builder().build::<_, Body>(connector))
}

/// Sends a request and reads the full response body within the timeout.
pub(crate) async fn dispatch(
    client: &SharedClient,
    request: Request<Body>,
    limit: Duration,
    operation: &'static str,
) -> ClientResult<(StatusCode, Bytes)> {
    let response = timeout(limit, client.request(request))
        .await
        .map_err(|_| ClientError::transport(format!("{operation} timed out")))?
        .map_err(|err| ClientError::transport(format!("{operation} failed: {err}")))?;

    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .map_err(|err| ClientError::transport(format!("failed to read {operation} response: {err}")))?;

    Ok((status, bytes))
}

/// Maps a non-success status onto the shared error taxonomy.
pub(crate) fn error_for_status(
    operation: &'static str,
    status: StatusCode,
    body: &[u8],
) -> ClientError {
    let detail = String::from_utf8_lossy(body);
    let detail = detail.trim();
    let reason = if detail.is_empty() {
        format!("{operation} returned {status}")
    } else {
        format!("{operation} returned {status}: {detail}")
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized { reason },
        _ if status.is_server_error() => ClientError::Server {
            status: status.as_u16(),
            reason,
        },
        _ => ClientError::Rejected { reason },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_statuses_map_to_unauthorized() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = error_for_status("list prompts", status, b"");
            assert!(matches!(err, ClientError::Unauthorized { .. }), "{status}");
        }
    }

    #[test]
    fn server_errors_carry_status() {
        let err = error_for_status("create prompt", StatusCode::BAD_GATEWAY, b"upstream down");
        match err {
            ClientError::Server { status, reason } => {
                assert_eq!(status, 502);
                assert!(reason.contains("upstream down"));
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[test]
    fn other_client_errors_map_to_rejected() {
        let err = error_for_status("register", StatusCode::BAD_REQUEST, b"username taken");
        assert!(matches!(err, ClientError::Rejected { .. }));
    }
}
