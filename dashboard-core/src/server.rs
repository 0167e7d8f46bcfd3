//! HTTP front of the manifest proxy.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use tracing::info;

use crate::proxy::{ManifestProxy, ManifestQuery, ProxyReply};

pub const MANIFEST_PATH: &str = "/api/fetchManifest";

fn json_response(reply: ProxyReply) -> Response<Body> {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = Response::new(Body::from(reply.body.to_string()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

fn plain(status: StatusCode, text: &'static str) -> Response<Body> {
    let mut response = Response::new(Body::from(text));
    *response.status_mut() = status;
    response
}

async fn route(proxy: Arc<ManifestProxy>, req: Request<Body>) -> Result<Response<Body>, Infallible> {
    let response = match (req.method(), req.uri().path()) {
        (&Method::GET, MANIFEST_PATH) => {
            let query = ManifestQuery::from_query_string(req.uri().query());
            json_response(proxy.handle(&query).await)
        }
        (_, MANIFEST_PATH) => plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
        (&Method::GET, "/health") => plain(StatusCode::OK, "OK"),
        _ => plain(StatusCode::NOT_FOUND, "Not Found"),
    };
    Ok(response)
}

/// Bind the proxy server to `addr`.
///
/// Returns the bound address (useful with port 0) and the server future,
/// which resolves once `shutdown` completes and in-flight requests drain.
pub fn bind<F>(
    proxy: Arc<ManifestProxy>,
    addr: SocketAddr,
    shutdown: F,
) -> Result<(SocketAddr, impl Future<Output = Result<(), hyper::Error>>), hyper::Error>
where
    F: Future<Output = ()>,
{
    let make_svc = make_service_fn(move |_conn| {
        let proxy = Arc::clone(&proxy);
        async move {
            Ok::<_, Infallible>(service_fn(move |req| route(Arc::clone(&proxy), req)))
        }
    });

    let server = Server::try_bind(&addr)?.serve(make_svc);
    let local_addr = server.local_addr();

    info!("Manifest proxy listening on http://{}{}", local_addr, MANIFEST_PATH);
    info!("Health check endpoint available at http://{}/health", local_addr);

    Ok((local_addr, server.with_graceful_shutdown(shutdown)))
}
