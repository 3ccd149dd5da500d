//! Router builder for the libris HTTP server

use axum::{
    extract::{OriginalUri, Request},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use uuid::Uuid;

use libris_kernel::ModuleRegistry;

use crate::error::AppError;

/// Builder for constructing the main HTTP router
///
/// Middleware only wraps the routes registered before it, so mount every
/// route first and add layers last.
pub struct RouterBuilder {
    router: Router,
}

impl RouterBuilder {
    /// Create a new router builder
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    /// Add a route to the router
    pub fn route(mut self, path: &str, route: axum::routing::MethodRouter) -> Self {
        self.router = self.router.route(path, route);
        self
    }

    /// Mount a module's router under `/{module_name}`
    pub fn mount_module(mut self, module_name: &str, module_router: Router) -> Self {
        self.router = self.router.nest(&mount_path(module_name), module_router);
        self
    }

    /// Add tracing middleware
    pub fn with_tracing(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
        );
        self
    }

    /// Add CORS middleware
    pub fn with_cors(mut self) -> Self {
        self.router = self.router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
        self
    }

    /// Assign an `x-request-id` to every request and echo it on the response
    pub fn with_request_id(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));
        self
    }

    /// Answer unmatched paths and unsupported methods with the error body.
    ///
    /// Must run after every route is mounted and before any layer.
    pub fn with_error_fallbacks(mut self) -> Self {
        self.router = self
            .router
            .fallback(route_not_found)
            .method_not_allowed_fallback(method_not_allowed);
        self
    }

    /// Add timeout middleware; an elapsed request answers 408 with the error body
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.router = self
            .router
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_millis(timeout_ms),
            ))
            .layer(map_response(timeout_error_body));
        self
    }

    /// Serve an OpenAPI document merged from every module's fragment
    pub fn with_openapi(mut self, registry: &ModuleRegistry) -> Self {
        let openapi_spec = openapi_document(registry);

        self.router = self.router.route(
            "/docs/openapi.json",
            get(move || async move { axum::Json(openapi_spec.clone()) }),
        );

        self
    }

    /// Build the final router
    pub fn build(self) -> Router {
        self.router
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn mount_path(module_name: &str) -> String {
    format!("/{}", module_name)
}

async fn route_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::not_found(format!("No route for '{}'", uri.path()))
}

async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::method_not_allowed(format!(
        "Method {} is not allowed on '{}'",
        method,
        uri.path()
    ))
}

// The timeout layer answers with a bare status and no body.
async fn timeout_error_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        return AppError::timeout("The request took too long to complete").into_response();
    }
    response
}

/// Build the merged OpenAPI document for all registered modules
pub fn openapi_document(registry: &ModuleRegistry) -> serde_json::Value {
    let mut openapi_spec = serde_json::json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Libris API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Book catalogue service"
        },
        "paths": {},
        "components": {
            "schemas": {}
        }
    });

    openapi_spec["components"]["schemas"]["ErrorResponse"] = serde_json::json!({
        "type": "object",
        "properties": {
            "error": {
                "type": "array",
                "items": { "type": "string" }
            },
            "code": { "type": "string" },
            "status": { "type": "integer" },
            "trace_id": { "type": "string" },
            "timestamp": { "type": "string" }
        },
        "required": ["error", "code", "status", "trace_id", "timestamp"]
    });

    openapi_spec["paths"]["/healthz"] = serde_json::json!({
        "get": {
            "summary": "Health check",
            "responses": {
                "200": {
                    "description": "OK",
                    "content": {
                        "text/plain": {
                            "schema": { "type": "string" }
                        }
                    }
                }
            }
        }
    });

    for module in registry.modules() {
        let Some(module_spec) = module.openapi() else {
            continue;
        };

        if let Some(paths) = module_spec.get("paths").and_then(|p| p.as_object()) {
            for (path, path_item) in paths {
                // "/" is the module root itself
                let suffix = if path == "/" { "" } else { path.as_str() };
                let prefixed_path = format!("{}{}", mount_path(module.name()), suffix);
                openapi_spec["paths"][prefixed_path] = path_item.clone();
            }
        }

        if let Some(schemas) = module_spec
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.as_object())
        {
            for (schema_name, schema_def) in schemas {
                openapi_spec["components"]["schemas"][schema_name] = schema_def.clone();
            }
        }
    }

    openapi_spec
}

/// Request ID generator producing time-ordered UUIDs
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let request_id = Uuid::now_v7().to_string().parse::<HeaderValue>().ok()?;
        Some(RequestId::new(request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest};
    use libris_kernel::Module;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct ShelfModule;

    impl Module for ShelfModule {
        fn name(&self) -> &'static str {
            "shelves"
        }

        fn routes(&self) -> Router {
            Router::new()
                .route("/", get(|| async { "all shelves" }))
                .route("/{id}", get(|| async { "one shelf" }))
        }

        fn openapi(&self) -> Option<serde_json::Value> {
            Some(serde_json::json!({
                "paths": {
                    "/": { "get": { "summary": "List shelves" } },
                    "/{id}": { "get": { "summary": "Get shelf" } }
                },
                "components": {
                    "schemas": { "Shelf": { "type": "object" } }
                }
            }))
        }
    }

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(ShelfModule));
        registry
    }

    async fn text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_module_mounting() {
        let router = RouterBuilder::new()
            .mount_module("shelves", ShelfModule.routes())
            .build();

        let response = router
            .clone()
            .oneshot(HttpRequest::get("/shelves").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(response).await, "all shelves");

        let response = router
            .oneshot(HttpRequest::get("/shelves/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(text(response).await, "one shelf");
    }

    #[tokio::test]
    async fn test_middleware_chain_sets_request_id() {
        let router = RouterBuilder::new()
            .route("/health", get(|| async { "ok" }))
            .with_timeout(5000)
            .with_cors()
            .with_tracing()
            .with_request_id()
            .build();

        let response = router
            .oneshot(HttpRequest::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let request_id = response.headers().get("x-request-id").unwrap();
        assert!(Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_supplied_request_id_is_propagated() {
        let router = RouterBuilder::new()
            .route("/health", get(|| async { "ok" }))
            .with_request_id()
            .build();

        let response = router
            .oneshot(
                HttpRequest::get("/health")
                    .header("x-request-id", "caller-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get("x-request-id").unwrap(), "caller-42");
    }

    async fn json(response: Response) -> serde_json::Value {
        serde_json::from_str(&text(response).await).unwrap()
    }

    fn shelf_router() -> Router {
        RouterBuilder::new()
            .mount_module("shelves", ShelfModule.routes())
            .with_error_fallbacks()
            .with_request_id()
            .build()
    }

    #[tokio::test]
    async fn test_unmatched_path_uses_error_body() {
        let response = shelf_router()
            .oneshot(HttpRequest::get("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key("x-request-id"));
        let body = json(response).await;
        assert_eq!(body["code"], "not_found");
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], serde_json::json!(["No route for '/nowhere'"]));
    }

    #[tokio::test]
    async fn test_unsupported_method_uses_error_body() {
        let response = shelf_router()
            .oneshot(
                HttpRequest::patch("/shelves/7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = json(response).await;
        assert_eq!(body["code"], "method_not_allowed");
        assert_eq!(body["status"], 405);
        assert_eq!(
            body["error"],
            serde_json::json!(["Method PATCH is not allowed on '/shelves/7'"])
        );
    }

    #[tokio::test]
    async fn test_elapsed_request_uses_error_body() {
        let router = RouterBuilder::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    "late"
                }),
            )
            .with_error_fallbacks()
            .with_timeout(10)
            .build();

        let response = router
            .oneshot(HttpRequest::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let body = json(response).await;
        assert_eq!(body["code"], "request_timeout");
        assert_eq!(body["status"], 408);
        assert_eq!(body["error"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_handler_errors_pass_through_timeout_layer() {
        let router = RouterBuilder::new()
            .route(
                "/gone",
                get(|| async { AppError::not_found("nothing here") }),
            )
            .with_timeout(5000)
            .build();

        let response = router
            .oneshot(HttpRequest::get("/gone").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(response).await["error"], serde_json::json!(["nothing here"]));
    }

    #[test]
    fn test_openapi_paths_are_prefixed() {
        let spec = openapi_document(&registry());

        assert!(spec["paths"]["/healthz"].is_object());
        assert_eq!(spec["paths"]["/shelves"]["get"]["summary"], "List shelves");
        assert_eq!(spec["paths"]["/shelves/{id}"]["get"]["summary"], "Get shelf");
        assert!(spec["components"]["schemas"]["Shelf"].is_object());
        assert!(spec["components"]["schemas"]["ErrorResponse"].is_object());
    }
}
