use actix_web::HttpResponse;
use actix_web::web;
use arbor_auth::Auth;
use arbor_auth::Fault;
use arbor_core::ID;
use arbor_records::*;
use std::sync::Arc;
use tokio_postgres::Client;

pub async fn create(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    draft: web::Json<EventDraft>,
) -> Result<HttpResponse, Fault> {
    let event = Event::new(draft.into_inner(), auth.user());
    db.create_event(&event).await?;
    Ok(HttpResponse::Ok().json(event))
}

pub async fn list(db: web::Data<Arc<Client>>, auth: Auth) -> Result<HttpResponse, Fault> {
    let events = db.get_events(Scope::of(auth.identity())).await?;
    Ok(HttpResponse::Ok().json(events))
}

pub async fn read(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Fault> {
    let event = db
        .get_event(Scope::of(auth.identity()), ID::from(path.into_inner()))
        .await?
        .ok_or(Fault::NotFound("Event"))?;
    Ok(HttpResponse::Ok().json(event))
}

pub async fn update(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
    patch: web::Json<EventPatch>,
) -> Result<HttpResponse, Fault> {
    if patch.is_empty() {
        return Err(Fault::NoFields);
    }
    let event = db
        .update_event(Scope::of(auth.identity()), ID::from(path.into_inner()), &patch)
        .await?
        .ok_or(Fault::NotFound("Event"))?;
    Ok(HttpResponse::Ok().json(event))
}

pub async fn delete(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Fault> {
    match db
        .delete_event(Scope::of(auth.identity()), ID::from(path.into_inner()))
        .await?
    {
        true => Ok(HttpResponse::Ok()
            .json(serde_json::json!({ "message": "Event deleted successfully" }))),
        false => Err(Fault::NotFound("Event")),
    }
}
