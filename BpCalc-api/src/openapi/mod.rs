use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Reading endpoints
        crate::api::handlers::readings::list_readings,
        crate::api::handlers::readings::get_reading,
        crate::api::handlers::readings::create_reading,
        crate::api::handlers::readings::delete_reading,
    ),
    components(
        schemas(
            crate::entities::reading::CreateReadingRequest,
            crate::entities::reading::ReadingResponse,
            crate::entities::common::StatusMessage,
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentHealthStatus,
            bp_calc_domain::entities::Category,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "readings", description = "Blood pressure reading submission and retrieval")
    ),
    info(
        title = "BpCalc API",
        version = "0.1.0",
        description = "Validates, classifies and stores blood pressure readings",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
