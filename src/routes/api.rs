use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::api::ErrorResponse;
use crate::forms::api::AdvocateSearchForm;
use crate::repository::SharedAdvocateReader;
use crate::services::api as api_service;

#[get("/advocates")]
pub async fn api_advocates(
    params: web::Query<AdvocateSearchForm>,
    repo: web::Data<SharedAdvocateReader>,
) -> impl Responder {
    let query = match params.into_inner().into_query() {
        Ok(query) => query,
        Err(err) => {
            log::warn!("Rejected advocates query: {err}");
            return HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()));
        }
    };

    match api_service::list_advocates(repo.get_ref(), query) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => {
            log::error!("Failed to fetch advocates: {err}");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to fetch advocates"))
        }
    }
}
