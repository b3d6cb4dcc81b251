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
    draft: web::Json<PostDraft>,
) -> Result<HttpResponse, Fault> {
    let post = ForumPost::new(draft.into_inner(), auth.identity());
    db.create_post(&post).await?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn list(db: web::Data<Arc<Client>>, auth: Auth) -> Result<HttpResponse, Fault> {
    let posts = db.get_posts(Scope::of(auth.identity())).await?;
    Ok(HttpResponse::Ok().json(posts))
}

pub async fn read(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Fault> {
    let post = db
        .get_post(Scope::of(auth.identity()), ID::from(path.into_inner()))
        .await?
        .ok_or(Fault::NotFound("Post"))?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn update(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
    patch: web::Json<PostPatch>,
) -> Result<HttpResponse, Fault> {
    if patch.is_empty() {
        return Err(Fault::NoFields);
    }
    let post = db
        .update_post(Scope::of(auth.identity()), ID::from(path.into_inner()), &patch)
        .await?
        .ok_or(Fault::NotFound("Post"))?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn delete(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, Fault> {
    match db
        .delete_post(Scope::of(auth.identity()), ID::from(path.into_inner()))
        .await?
    {
        true => Ok(HttpResponse::Ok()
            .json(serde_json::json!({ "message": "Post deleted successfully" }))),
        false => Err(Fault::NotFound("Post")),
    }
}

/// Posting a reply needs no ownership of the post, only authentication.
pub async fn add_reply(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<uuid::Uuid>,
    draft: web::Json<ReplyDraft>,
) -> Result<HttpResponse, Fault> {
    let reply = Reply::new(draft.into_inner(), auth.identity());
    match db.add_reply(ID::from(path.into_inner()), &reply).await? {
        true => Ok(HttpResponse::Ok().json(reply)),
        false => Err(Fault::NotFound("Post")),
    }
}

/// Deleting a reply is authorized against the reply's own author (or
/// admin), never against the parent post's author.
pub async fn remove_reply(
    db: web::Data<Arc<Client>>,
    auth: Auth,
    path: web::Path<(uuid::Uuid, uuid::Uuid)>,
) -> Result<HttpResponse, Fault> {
    let (post, reply) = path.into_inner();
    match db
        .remove_reply(Scope::of(auth.identity()), ID::from(post), ID::from(reply))
        .await?
    {
        true => Ok(HttpResponse::Ok()
            .json(serde_json::json!({ "message": "Reply deleted successfully" }))),
        false => Err(Fault::NotFound("Reply")),
    }
}
