//! Family Tree API Binary
//!
//! Serves the authenticated record-keeping API on BIND_ADDR
//! (e.g. 0.0.0.0:8080).

#[tokio::main]
async fn main() {
    arbor_core::log();
    arbor_core::kys();
    arbor_server::run().await.unwrap();
}
