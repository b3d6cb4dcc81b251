//! Family Tree API Server
//!
//! actix-web application wiring identity resolution and ownership-scoped
//! resource handlers into a single HTTP surface under `/api`.
//!
//! ## Submodules
//!
//! - [`members`] — Family member profiles and embedded photo albums
//! - [`events`] — Calendar events
//! - [`forum`] — Forum posts and embedded replies
//! - [`upload`] — Image upload storage

pub mod events;
pub mod forum;
pub mod members;
pub mod settings;
pub mod upload;

pub use settings::Settings;
pub use upload::Uploads;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;
use arbor_auth::Account;
use arbor_auth::Crypto;
use arbor_pg::PgErr;
use arbor_records::Event;
use arbor_records::FamilyMember;
use arbor_records::ForumPost;
use std::sync::Arc;
use tokio_postgres::Client;

async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "message": "Family Tree API is running" }))
}

async fn health(client: web::Data<Arc<Client>>) -> impl Responder {
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" })),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

/// Applies every collection's DDL. Safe on every startup.
async fn migrate(client: &Client) -> Result<(), PgErr> {
    arbor_pg::prepare::<Account>(client).await?;
    arbor_pg::prepare::<FamilyMember>(client).await?;
    arbor_pg::prepare::<Event>(client).await?;
    arbor_pg::prepare::<ForumPost>(client).await
}

#[rustfmt::skip]
pub async fn run() -> Result<(), std::io::Error> {
    let settings = Settings::from_env();
    let client = arbor_pg::db().await;
    migrate(&client).await.expect("schema migration");
    let crypto = web::Data::new(Crypto::new(settings.secret.as_bytes()));
    let admins = web::Data::new(settings.admins.clone());
    let uploads = web::Data::new(Uploads { dir: settings.uploads.clone() });
    let client = web::Data::new(client);
    log::info!("starting family tree api on {}", settings.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(crypto.clone())
            .app_data(admins.clone())
            .app_data(uploads.clone())
            .app_data(client.clone())
            .app_data(web::PayloadConfig::new(upload::PAYLOAD_CAP))
            .service(
                web::scope("/api")
                    .route("", web::get().to(root))
                    .route("/health", web::get().to(health))
                    .service(
                        web::scope("/auth")
                            .route("/register", web::post().to(arbor_auth::register))
                            .route("/login", web::post().to(arbor_auth::login))
                            .route("/me", web::get().to(arbor_auth::me)),
                    )
                    .service(
                        web::scope("/members")
                            .route("", web::post().to(members::create))
                            .route("", web::get().to(members::list))
                            .route("/{id}", web::get().to(members::read))
                            .route("/{id}", web::put().to(members::update))
                            .route("/{id}", web::delete().to(members::delete))
                            .route("/{id}/photos", web::post().to(members::add_photo))
                            .route("/{id}/photos", web::get().to(members::photos))
                            .route("/{id}/photos/{photo}", web::delete().to(members::remove_photo)),
                    )
                    .service(
                        web::scope("/events")
                            .route("", web::post().to(events::create))
                            .route("", web::get().to(events::list))
                            .route("/{id}", web::get().to(events::read))
                            .route("/{id}", web::put().to(events::update))
                            .route("/{id}", web::delete().to(events::delete)),
                    )
                    .service(
                        web::scope("/forum/posts")
                            .route("", web::post().to(forum::create))
                            .route("", web::get().to(forum::list))
                            .route("/{id}", web::get().to(forum::read))
                            .route("/{id}", web::put().to(forum::update))
                            .route("/{id}", web::delete().to(forum::delete))
                            .route("/{id}/replies", web::post().to(forum::add_reply))
                            .route("/{id}/replies/{reply}", web::delete().to(forum::remove_reply)),
                    )
                    .route("/upload", web::post().to(upload::upload)),
            )
    })
    .bind(&settings.bind)?
    .run()
    .await
}
