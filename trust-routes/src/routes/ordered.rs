//! Request handling shared by the five ordered resources. Each resource module
//! documents its own routes and delegates here.

use super::HandlerResult;
use super::extract::{found, parse_id};
use super::responses::{Reply, ReorderResponse, acknowledge};
use crate::service::OrderedService;
use axum::response::IntoResponse;
use trust_core::ContentEngine;
use trust_core::ordered::{OrderAssignment, OrderedRecord, OrderedStore};

pub(super) async fn list<E, R>(
    service: OrderedService<E>,
    partition: Option<R::Partition>,
) -> HandlerResult
where
    E: ContentEngine + OrderedStore<R>,
    R: OrderedRecord,
{
    let records = service.list::<R>(partition).await?;
    Ok(Reply::ok(records).into_response())
}

pub(super) async fn create<E, R>(service: OrderedService<E>, draft: R::Draft) -> HandlerResult
where
    E: ContentEngine + OrderedStore<R>,
    R: OrderedRecord,
{
    let created = service.create::<R>(draft).await?;
    Ok(Reply::created(created).into_response())
}

pub(super) async fn update<E, R>(
    service: OrderedService<E>,
    id: &str,
    draft: R::UpdateDraft,
) -> HandlerResult
where
    E: ContentEngine + OrderedStore<R>,
    R: OrderedRecord,
{
    let id = parse_id(id, R::KIND)?;
    let updated = found(service.update::<R>(id, draft).await?, R::KIND)?;
    Ok(Reply::ok(updated).into_response())
}

pub(super) async fn delete<E, R>(service: OrderedService<E>, id: &str) -> HandlerResult
where
    E: ContentEngine + OrderedStore<R>,
    R: OrderedRecord,
{
    let id = parse_id(id, R::KIND)?;
    found(service.delete::<R>(id).await?, R::KIND)?;
    Ok(acknowledge(format!("{} deleted successfully", R::KIND)).into_response())
}

/// `label` names the collection in the answer (`"Media order updated successfully"`).
pub(super) async fn reorder<E, R>(
    service: OrderedService<E>,
    label: &str,
    assignments: Vec<OrderAssignment>,
) -> HandlerResult
where
    E: ContentEngine + OrderedStore<R>,
    R: OrderedRecord,
{
    let outcome = service.reorder::<R>(assignments).await;
    Ok(Reply::ok(ReorderResponse::new(label, outcome)).into_response())
}
