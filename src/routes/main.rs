use actix_web::{HttpResponse, Responder, get, web};
use tera::{Context, Tera};

use crate::forms::main::IndexForm;
use crate::models::config::ServerConfig;
use crate::repository::SharedAdvocateReader;
use crate::routes::render_template;
use crate::services::main as main_service;

#[get("/")]
pub async fn show_index(
    params: web::Query<IndexForm>,
    repo: web::Data<SharedAdvocateReader>,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = match params.into_inner().into_query() {
        Ok(query) => query,
        Err(err) => {
            log::warn!("Rejected index query: {err}");
            return HttpResponse::BadRequest().body(err.to_string());
        }
    };

    match main_service::load_index_page(repo.get_ref(), query, server_config.page_size) {
        Ok(data) => {
            let mut context = Context::new();
            context.insert("current_page", "index");
            context.insert("search", &data.search);
            context.insert("advocates", &data.advocates);
            context.insert("expanded", &data.expanded);
            context.insert("show_pagination", &data.show_pagination);
            context.insert("search_debounce_ms", &server_config.search_debounce_ms);

            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load advocates page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
