use axum::Json;
use portfolio_core::{list_publications, Publication};

pub async fn publications_handler() -> Json<&'static [Publication]> {
    Json(list_publications())
}
