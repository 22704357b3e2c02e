//! HTTP Handlers
//!
//! Generic over the resource and the gateway; the router instantiates them
//! once per resource.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::application::crud::CrudUseCase;
use crate::domain::gateway::Gateway;
use crate::domain::resource::{Resource, Statements};
use crate::error::CrudResult;

/// Shared state for the handlers of one resource
pub struct CrudAppState<R, G>
where
    R: Resource,
    G: Gateway + Send + Sync + 'static,
{
    pub gateway: Arc<G>,
    pub statements: Arc<Statements>,
    _resource: std::marker::PhantomData<fn() -> R>,
}

impl<R, G> CrudAppState<R, G>
where
    R: Resource,
    G: Gateway + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            statements: Arc::new(Statements::for_resource::<R>()),
            _resource: std::marker::PhantomData,
        }
    }

    fn use_case(&self) -> CrudUseCase<R, G> {
        CrudUseCase::new(self.gateway.clone(), self.statements.clone())
    }
}

impl<R, G> Clone for CrudAppState<R, G>
where
    R: Resource,
    G: Gateway + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            statements: self.statements.clone(),
            _resource: std::marker::PhantomData,
        }
    }
}

/// GET /{resource}
pub async fn list<R, G>(State(state): State<CrudAppState<R, G>>) -> CrudResult<Json<Vec<R::Record>>>
where
    R: Resource,
    G: Gateway + Send + Sync + 'static,
{
    let records = state.use_case().list().await?;
    Ok(Json(records))
}

/// GET /{resource}/{id}
pub async fn get_one<R, G>(
    State(state): State<CrudAppState<R, G>>,
    Path(id): Path<String>,
) -> CrudResult<Json<R::Record>>
where
    R: Resource,
    G: Gateway + Send + Sync + 'static,
{
    let record = state.use_case().get(&id).await?;
    Ok(Json(record))
}

/// POST /{resource}
pub async fn create<R, G>(
    State(state): State<CrudAppState<R, G>>,
    payload: Result<Json<R::Payload>, JsonRejection>,
) -> CrudResult<(StatusCode, Json<R::Record>)>
where
    R: Resource,
    G: Gateway + Send + Sync + 'static,
{
    let Json(payload) = payload?;
    let record = state.use_case().create(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /{resource}/{id}
pub async fn update<R, G>(
    State(state): State<CrudAppState<R, G>>,
    Path(id): Path<String>,
    payload: Result<Json<R::Payload>, JsonRejection>,
) -> CrudResult<Json<R::Record>>
where
    R: Resource,
    G: Gateway + Send + Sync + 'static,
{
    let Json(payload) = payload?;
    let record = state.use_case().update(&id, payload).await?;
    Ok(Json(record))
}

/// DELETE /{resource}/{id}
pub async fn delete<R, G>(
    State(state): State<CrudAppState<R, G>>,
    Path(id): Path<String>,
) -> CrudResult<StatusCode>
where
    R: Resource,
    G: Gateway + Send + Sync + 'static,
{
    state.use_case().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
