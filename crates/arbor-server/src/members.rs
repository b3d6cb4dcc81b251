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
    draft: web::Json<MemberDraft>,
) -> Result<HttpResponse, Fault> {
    let member = FamilyMember::new(draft.into_inner(), auth.user());
    db.create_member(&member).await?;
    Ok(HttpResponse::Ok().json(member))
}

pub async fn list(db: web::Data<Arc<Client>>, auth: Auth) -> Result<HttpResponse, Fault> {
    let members = db.get_members(Scope::of(auth.identity())).await?;
    Ok(HttpResponse::Ok().json(members))
}

pub async fn read(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Fault> {
    let member = db
        .get_member(Scope::of(auth.identity()), ID::from(path.into_inner()))
        .await?
        .ok_or(Fault::NotFound("Member"))?;
    Ok(HttpResponse::Ok().json(member))
}

pub async fn update(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
    patch: web::Json<MemberPatch>,
) -> Result<HttpResponse, Fault> {
    if patch.is_empty() {
        return Err(Fault::NoFields);
    }
    let member = db
        .update_member(Scope::of(auth.identity()), ID::from(path.into_inner()), &patch)
        .await?
        .ok_or(Fault::NotFound("Member"))?;
    Ok(HttpResponse::Ok().json(member))
}

pub async fn delete(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Fault> {
    match db
        .delete_member(Scope::of(auth.identity()), ID::from(path.into_inner()))
        .await?
    {
        true => Ok(HttpResponse::Ok()
            .json(serde_json::json!({ "message": "Member deleted successfully" }))),
        false => Err(Fault::NotFound("Member")),
    }
}

pub async fn add_photo(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
    draft: web::Json<PhotoDraft>,
) -> Result<HttpResponse, Fault> {
    let photo = Photo::new(draft.into_inner());
    match db
        .add_photo(
            Scope::of(auth.identity()),
            ID::from(path.into_inner()),
            &photo,
        )
        .await?
    {
        true => Ok(HttpResponse::Ok().json(photo)),
        false => Err(Fault::NotFound("Member")),
    }
}

pub async fn photos(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Fault> {
    let photos = db
        .get_photos(Scope::of(auth.identity()), ID::from(path.into_inner()))
        .await?
        .ok_or(Fault::NotFound("Member"))?;
    Ok(HttpResponse::Ok().json(photos))
}

pub async fn remove_photo(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<(uuid::Uuid, uuid::Uuid)>,
) -> Result<HttpResponse, Fault> {
    let (member, photo) = path.into_inner();
    match db
        .remove_photo(Scope::of(auth.identity()), ID::from(member), ID::from(photo))
        .await?
    {
        true => Ok(HttpResponse::Ok()
            .json(serde_json::json!({ "message": "Photo deleted successfully" }))),
        false => Err(Fault::NotFound("Photo")),
    }
}
