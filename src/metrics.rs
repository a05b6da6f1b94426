//! Generation counters, served in text format on `/metrics/generation`.
//!
//! Request metrics come from the actix-web-prometheus middleware on `/metrics`.
//! The middleware owns its registry, so the engine's counters live in their own.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref PAGES_RENDERED: IntCounter =
        IntCounter::new("slides_pages_rendered_total", "Pages drawn from slide records")
            .expect("valid counter definition");
    pub static ref RECORDS_SKIPPED: IntCounter =
        IntCounter::new("slides_records_skipped_total", "Records skipped for an unknown kind")
            .expect("valid counter definition");
    pub static ref GENERATION_FAILURES: IntCounter =
        IntCounter::new("slides_generation_failures_total", "Generation runs that returned an error")
            .expect("valid counter definition");
}

/// Register the generation counters on `registry`.
pub fn register(registry: &Registry) -> prometheus::Result<()> {
    registry.register(Box::new(PAGES_RENDERED.clone()))?;
    registry.register(Box::new(RECORDS_SKIPPED.clone()))?;
    registry.register(Box::new(GENERATION_FAILURES.clone()))?;
    Ok(())
}

/// Register on the shared [`REGISTRY`]. Safe to call more than once.
pub fn init() {
    if let Err(e) = register(&REGISTRY) {
        log::debug!("Generation counters already registered: {}", e);
    }
}

/// Text exposition of everything in `registry`.
pub fn encode(registry: &Registry) -> prometheus::Result<String> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_exposes_counters() {
        let registry = Registry::new();
        register(&registry).unwrap();
        let text = encode(&registry).unwrap();
        assert!(text.contains("slides_pages_rendered_total"));
        assert!(text.contains("slides_records_skipped_total"));
        assert!(text.contains("slides_generation_failures_total"));
    }

    #[test]
    fn test_register_twice_fails() {
        let registry = Registry::new();
        register(&registry).unwrap();
        assert!(register(&registry).is_err());
    }

    #[test]
    fn test_init_is_repeatable() {
        init();
        init();
        assert!(encode(&REGISTRY).unwrap().contains("slides_pages_rendered_total"));
    }
}
