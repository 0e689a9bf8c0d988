use std::sync::Arc;

use axum::Router;
use docdrop_blob::StorageRouter;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::rest;
use crate::DocDropState;

#[derive(Clone)]
pub struct DocDropApp {
    pub state: DocDropState,
    pub router: Router<()>,
}

impl DocDropApp {
    /// All routes, with request tracing and an `x-request-id` on every response
    pub fn new(storage: Arc<StorageRouter>, max_request_bytes: usize) -> Self {
        let state = DocDropState::new(storage, max_request_bytes);

        let router = rest::routes(state.clone()).layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

        Self { state, router }
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "listening");
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

pub fn docdrop(storage: Arc<StorageRouter>, max_request_bytes: usize) -> DocDropApp {
    DocDropApp::new(storage, max_request_bytes)
}
