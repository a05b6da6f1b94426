//! HTTP handlers for slide generation.
//!
//! Generation is a chain of blocking document-service calls, so every run
//! goes through `web::block`.

use actix_web::error::{BlockingError, InternalError, JsonPayloadError};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;

use super::memory::MemoryDocumentService;
use super::models::{GeneratePresentationRequest, GenerationResponse};
use super::orchestrator::{extract_title, GenerateOptions, GenerationReport, PresentationGenerator};
use super::records::parse_deck;
use super::registry;
use super::theme::Theme;
use super::SlideError;
use crate::{metrics, ErrorResponse};

/// Shared state of the presentation routes.
pub struct PresentationState {
    pub service: Arc<MemoryDocumentService>,
    /// Starting theme of every run. Request settings patch a copy.
    pub theme: Theme,
}

impl PresentationState {
    pub fn new(service: Arc<MemoryDocumentService>) -> Self {
        Self {
            service,
            theme: Theme::new(),
        }
    }
}

fn generation_response(result: Result<Result<GenerationReport, SlideError>, BlockingError>) -> HttpResponse {
    match result {
        Ok(Ok(report)) => HttpResponse::Ok().json(GenerationResponse::success(&report)),
        Ok(Err(e)) => {
            metrics::GENERATION_FAILURES.inc();
            log::error!("Slide generation failed: {}", e);
            let body = GenerationResponse::failure(e.user_message());
            if e.is_input_error() {
                HttpResponse::BadRequest().json(body)
            } else {
                HttpResponse::InternalServerError().json(body)
            }
        }
        Err(e) => {
            metrics::GENERATION_FAILURES.inc();
            log::error!("Slide generation worker failed: {}", e);
            HttpResponse::InternalServerError().json(GenerationResponse::failure(format!("Slide generation failed: {}", e)))
        }
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = GenerationResponse::failure(format!("Slide generation failed: {}", err));
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

#[utoipa::path(
    context_path = "/api",
    tag = "Presentation Service",
    post,
    path = "/presentations",
    request_body = GeneratePresentationRequest,
    responses(
        (status = 200, description = "Presentation generated", body = GenerationResponse),
        (status = 400, description = "Malformed slide data", body = GenerationResponse),
        (status = 500, description = "Generation failed", body = GenerationResponse)
    )
)]
pub async fn create_presentation(
    state: web::Data<PresentationState>,
    body: web::Json<GeneratePresentationRequest>,
) -> impl Responder {
    let request = body.into_inner();
    let state = state.into_inner();

    let result = web::block(move || {
        let entries = request.slides.into_entries()?;
        let title = request
            .title
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| extract_title(&entries));
        let options = GenerateOptions {
            title: Some(title),
            settings: request.settings,
            ..Default::default()
        };
        PresentationGenerator::with_theme(state.service.as_ref(), state.theme.clone()).generate(&entries, &options)
    })
    .await;

    generation_response(result)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Presentation Service",
    post,
    path = "/presentations/raw",
    request_body(content = String, description = "JSON array of slide records", content_type = "application/json"),
    responses(
        (status = 200, description = "Presentation generated", body = GenerationResponse),
        (status = 400, description = "Malformed slide data", body = GenerationResponse),
        (status = 500, description = "Generation failed", body = GenerationResponse)
    )
)]
pub async fn create_presentation_raw(state: web::Data<PresentationState>, body: String) -> impl Responder {
    let state = state.into_inner();

    let result = web::block(move || {
        let entries = parse_deck(&body)?;
        PresentationGenerator::with_theme(state.service.as_ref(), state.theme.clone())
            .generate(&entries, &GenerateOptions::default())
    })
    .await;

    generation_response(result)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Presentation Service",
    get,
    path = "/presentations/{id}",
    params(
        ("id" = String, Path, description = "ID of the generated presentation")
    ),
    responses(
        (status = 200, description = "Stored document with pages and elements"),
        (status = 404, description = "Presentation not found", body = ErrorResponse)
    )
)]
pub async fn get_presentation(state: web::Data<PresentationState>, id: web::Path<String>) -> impl Responder {
    match state.service.document(&id) {
        Some(document) => HttpResponse::Ok().json(document),
        None => HttpResponse::NotFound().json(ErrorResponse::not_found(&format!("Presentation {} not found", id))),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Presentation Service",
    get,
    path = "/slide-kinds",
    responses(
        (status = 200, description = "Registered slide kinds in registry order", body = [String])
    )
)]
pub async fn list_slide_kinds() -> impl Responder {
    HttpResponse::Ok().json(registry::kinds())
}

/// Engine counters in Prometheus text format.
pub async fn generation_metrics() -> impl Responder {
    match metrics::encode(&metrics::REGISTRY) {
        Ok(text) => HttpResponse::Ok().content_type("text/plain; version=0.0.4").body(text),
        Err(e) => {
            log::error!("Failed to encode generation metrics: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
    }
}

/// Register the presentation routes. Mount inside the `/api` scope.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/presentations")
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(web::post().to(create_presentation)),
    )
    .service(web::resource("/presentations/raw").route(web::post().to(create_presentation_raw)))
    .service(web::resource("/presentations/{id}").route(web::get().to(get_presentation)))
    .service(web::resource("/slide-kinds").route(web::get().to(list_slide_kinds)));
}
