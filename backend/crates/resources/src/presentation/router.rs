//! Resources Router

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::domain::entities::{CustomerResource, ItemResource};
use crate::domain::gateway::Gateway;
use crate::domain::resource::Resource;
use crate::infra::postgres::PgGateway;
use crate::presentation::handlers::{self, CrudAppState};

/// Create the API router with the PostgreSQL gateway
pub fn resources_router(gateway: PgGateway) -> Router {
    resources_router_generic(gateway)
}

/// Create the API router for any gateway implementation
///
/// Serves `/itens` and `/cliente`, both backed by the same gateway.
pub fn resources_router_generic<G>(gateway: G) -> Router
where
    G: Gateway + Send + Sync + 'static,
{
    let gateway = Arc::new(gateway);

    Router::new()
        .merge(crud_router::<ItemResource, G>(gateway.clone()))
        .merge(crud_router::<CustomerResource, G>(gateway))
}

/// Routes for a single resource
pub fn crud_router<R, G>(gateway: Arc<G>) -> Router
where
    R: Resource,
    G: Gateway + Send + Sync + 'static,
{
    let state = CrudAppState::<R, G>::new(gateway);

    Router::new()
        .route(
            &format!("/{}", R::PATH),
            get(handlers::list::<R, G>).post(handlers::create::<R, G>),
        )
        .route(
            &format!("/{}/{{id}}", R::PATH),
            get(handlers::get_one::<R, G>)
                .put(handlers::update::<R, G>)
                .delete(handlers::delete::<R, G>),
        )
        .with_state(state)
}
