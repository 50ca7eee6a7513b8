// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Live feed proxy: fetches and normalizes the feed on every request so
//! browsers get the episode document without a cross-origin feed fetch.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use warp::http::StatusCode;
use warp::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use warp::path::FullPath;
use warp::reply::{Response, json, with_header, with_status};
use warp::{Filter, Rejection, Reply};

use crate::error::FeedError;
use crate::feed::FeedNormalizer;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::store::FeedDocument;

/// Body returned when the feed could not be produced
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    error: &'static str,
}

const FETCH_FAILED: ErrorBody = ErrorBody {
    status: "error",
    error: "Failed to fetch RSS feed",
};

/// What the proxy needs to answer a request
pub struct ProxyState<C> {
    pub normalizer: FeedNormalizer<C>,
    pub feed_url: String,
    pub reporter: SharedProgressReporter,
}

/// GET filter serving the normalized feed at exactly `endpoint`
pub fn proxy_route<C: HttpClient + 'static>(
    endpoint: &str,
    state: Arc<ProxyState<C>>,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone + use<C> {
    let endpoint: Arc<str> = Arc::from(endpoint);

    warp::get()
        .and(warp::path::full())
        .and_then(move |path: FullPath| {
            let endpoint = endpoint.clone();
            async move {
                if path.as_str() == &*endpoint {
                    Ok(())
                } else {
                    Err(warp::reject::not_found())
                }
            }
        })
        .untuple_one()
        .and(warp::any().map(move || state.clone()))
        .then(handle_request::<C>)
}

async fn handle_request<C: HttpClient>(state: Arc<ProxyState<C>>) -> Response {
    let result = state
        .normalizer
        .normalize(&state.feed_url, &state.reporter)
        .await;

    proxy_reply(result, &state.reporter)
}

/// Turn a normalization result into the proxy's HTTP response.
///
/// Success is `200` with the document, failure is `500` with a JSON error
/// body. Both allow any origin.
pub fn proxy_reply(
    result: Result<FeedDocument, FeedError>,
    reporter: &SharedProgressReporter,
) -> Response {
    let reply = match result {
        Ok(document) => {
            reporter.report(ProgressEvent::ProxyServed {
                items: document.items.len(),
            });
            with_status(json(&document), StatusCode::OK)
        }
        Err(e) => {
            reporter.report(ProgressEvent::ProxyFailed {
                error: e.to_string(),
            });
            with_status(json(&FETCH_FAILED), StatusCode::INTERNAL_SERVER_ERROR)
        }
    };

    with_header(reply, ACCESS_CONTROL_ALLOW_ORIGIN, "*").into_response()
}

/// Bind the proxy to `addr`.
///
/// Returns the bound address and the server future, which completes after
/// Ctrl-C.
pub fn bind<C: HttpClient + 'static>(
    addr: SocketAddr,
    endpoint: &str,
    state: Arc<ProxyState<C>>,
) -> Result<(SocketAddr, impl Future<Output = ()> + 'static + use<C>), warp::Error> {
    let route = proxy_route(endpoint, state);

    warp::serve(route).try_bind_with_graceful_shutdown(addr, async {
        let _ = tokio::signal::ctrl_c().await;
    })
}
