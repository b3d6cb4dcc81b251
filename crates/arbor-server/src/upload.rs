use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::web;
use arbor_auth::Auth;
use arbor_auth::Fault;
use arbor_core::UPLOAD_MAX_BYTES;
use std::path::PathBuf;

/// Transport-level body cap. Kept well above the validation threshold so
/// an oversized upload reaches the handler and fails its size check with
/// a 400 detail body instead of tripping the framework's 413.
pub const PAYLOAD_CAP: usize = 4 * UPLOAD_MAX_BYTES;

/// Destination directory for uploaded images, injected at startup.
#[derive(Debug, Clone)]
pub struct Uploads {
    pub dir: PathBuf,
}

fn extension(mime: &str) -> Option<&'static str> {
    match mime {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// Validates content type and size, yielding the file extension to store
/// under. Both rejections are client errors.
fn accept(mime: &str, len: usize) -> Result<&'static str, Fault> {
    let ext = extension(mime).ok_or(Fault::BadUpload("File must be an image"))?;
    match len > UPLOAD_MAX_BYTES {
        true => Err(Fault::BadUpload("File exceeds the 50MB limit")),
        false => Ok(ext),
    }
}

fn mime(req: &HttpRequest) -> &str {
    req.headers()
        .get(actix_web::http::header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
}

/// Accepts a raw image body, stores it under a fresh UUID filename, and
/// returns its URL. Serving the stored files is a reverse-proxy concern.
pub async fn upload(
    _auth: Auth,
    uploads: web::Data<Uploads>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, Fault> {
    let ext = accept(mime(&req), body.len())?;
    let filename = format!("{}.{}", uuid::Uuid::now_v7(), ext);
    tokio::fs::create_dir_all(&uploads.dir).await?;
    tokio::fs::write(uploads.dir.join(&filename), &body).await?;
    log::info!("stored upload {} ({} bytes)", filename, body.len());
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "url": format!("/uploads/{}", filename),
        "filename": filename,
        "size": body.len(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;

    #[test]
    fn image_content_types_map_to_extensions() {
        assert_eq!(extension("image/jpeg"), Some("jpg"));
        assert_eq!(extension("image/png"), Some("png"));
        assert_eq!(extension("image/gif"), Some("gif"));
        assert_eq!(extension("image/webp"), Some("webp"));
    }

    #[test]
    fn non_image_content_types_are_rejected() {
        assert_eq!(extension("application/pdf"), None);
        assert_eq!(extension("text/html"), None);
        assert_eq!(extension(""), None);
    }

    #[test]
    fn bodies_at_the_limit_pass_and_above_it_fail() {
        assert!(accept("image/png", UPLOAD_MAX_BYTES).is_ok());
        assert!(accept("image/png", UPLOAD_MAX_BYTES + 1).is_err());
    }

    /// An oversized body must get the handler's 400 detail response, not
    /// the framework's 413, so the transport cap has to clear the
    /// validation threshold by a wide margin.
    #[actix_web::test]
    async fn oversized_upload_is_bad_request_not_payload_too_large() {
        async fn check(req: HttpRequest, body: web::Bytes) -> Result<HttpResponse, Fault> {
            accept(mime(&req), body.len())?;
            Ok(HttpResponse::Ok().finish())
        }
        let app = actix_test::init_service(
            App::new()
                .app_data(web::PayloadConfig::new(PAYLOAD_CAP))
                .route("/upload", web::post().to(check)),
        )
        .await;
        let req = actix_test::TestRequest::post()
            .uri("/upload")
            .insert_header(("content-type", "image/png"))
            .set_payload(vec![0u8; UPLOAD_MAX_BYTES + 2048])
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
