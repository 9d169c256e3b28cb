use crate::routes::{ai, health};
use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

#[derive(OpenApi)]
#[openapi(info(
    title = "natureheal-server",
    description = "NatureHeal AI assistant API",
    version = "0.1.0",
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(ai::api_docs());
    if let Some(components) = root.components.as_mut() {
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
    root
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn document_lists_ai_paths_under_api_prefix() {
        let doc = get_docs();
        assert!(doc.paths.paths.contains_key("/api/ai/chat"));
        assert!(doc.paths.paths.contains_key("/api/ai/feedback/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
