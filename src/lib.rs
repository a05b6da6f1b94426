use actix_cors::Cors;
use actix_web::middleware::Compress;
use actix_web::{http::header, web, App, HttpServer};
use actix_web_prometheus::PrometheusMetricsBuilder;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod metrics;
pub mod presentation;

pub use crate::config::ServerConfig;
use crate::presentation::handlers::{self, PresentationState};
use crate::presentation::{HttpImageFetcher, MemoryDocumentService};

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            error: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new("NotFound", message)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::new("InternalServerError", message)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::create_presentation,
        crate::presentation::handlers::create_presentation_raw,
        crate::presentation::handlers::get_presentation,
        crate::presentation::handlers::list_slide_kinds
    ),
    components(
        schemas(
            presentation::models::GeneratePresentationRequest,
            presentation::models::GenerationResponse,
            presentation::theme::ThemeOverride,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Presentation Service", description = "Slide generation endpoints.")
    ),
    servers(
        (url = "http://127.0.0.1:8080", description = "Localhost server")
    )
)]
pub struct ApiDoc;

/// Build the document service described by `config`.
pub fn document_service(config: &ServerConfig) -> MemoryDocumentService {
    let fetcher = HttpImageFetcher::new(config.image_fetch_timeout).with_max_bytes(config.image_max_bytes);
    let fetcher = match &config.image_allowed_hosts {
        Some(hosts) => fetcher.with_allowed_hosts(hosts),
        None => fetcher,
    };
    let service = MemoryDocumentService::new(&config.public_base_url, Arc::new(fetcher))
        .with_retention(config.document_capacity, config.document_ttl);
    match &config.output_folders {
        Some(folders) => service.with_allowed_folders(folders.iter().cloned()),
        None => service,
    }
}

pub async fn run() -> std::io::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    let config = ServerConfig::from_env();
    metrics::init();

    let state = web::Data::new(PresentationState::new(Arc::new(document_service(&config))));

    let prometheus = PrometheusMetricsBuilder::new("slide_generator_server")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        let cors = origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(Compress::default())
            .wrap(prometheus.clone())
            .wrap(cors)
            .app_data(state.clone())
            .service(web::scope("/api").configure(handlers::config))
            .service(web::resource("/metrics/generation").route(web::get().to(handlers::generation_metrics)))
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()))
    })
    .backlog(8192)
    .keep_alive(actix_web::http::KeepAlive::Os)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_kinds() {
        assert_eq!(ErrorResponse::not_found("x").error, "NotFound");
        assert_eq!(ErrorResponse::internal_error("x").message, "x");
    }

    #[test]
    fn test_openapi_lists_presentation_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/presentations"));
        assert!(doc.paths.paths.contains_key("/api/presentations/{id}"));
        assert!(doc.paths.paths.contains_key("/api/slide-kinds"));
    }
}
