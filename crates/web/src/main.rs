use std::time::Duration;

use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use features::{events, preliminary, scoring};
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        scoring::handlers::calculate_points,
        scoring::handlers::parse_time,
        scoring::handlers::compute_handicap,
        events::handlers::get_handicap,
        events::handlers::create_targets,
        events::handlers::get_targets,
        events::handlers::release_targets,
        events::handlers::generate_seeding,
        events::handlers::get_seeding,
        events::handlers::publish_seeding,
        events::handlers::promote_score,
        events::handlers::list_scores,
        events::handlers::get_score,
        events::handlers::list_pending_scores,
        preliminary::handlers::submit_preliminary_score,
        preliminary::handlers::verify_preliminary_scores,
    ),
    components(
        schemas(
            storage::dto::scoring::CalculatePointsRequest,
            storage::dto::scoring::CalculatePointsResponse,
            storage::dto::scoring::ParseTimeRequest,
            storage::dto::scoring::ParseTimeResponse,
            storage::dto::scoring::HandicapRequest,
            storage::dto::scoring::CreateTargetsRequest,
            storage::dto::scoring::GenerateSeedingRequest,
            storage::dto::scoring::PromoteScoreRequest,
            storage::dto::scoring::PromotedScore,
            storage::dto::scoring::SubmitPreliminaryScoreRequest,
            storage::dto::scoring::BulkVerifyRequest,
            storage::dto::scoring::BulkVerifyReport,
            storage::dto::scoring::VerifiedScore,
            storage::dto::scoring::BulkItemError,
            storage::dto::common::PaginationMeta,
            storage::models::OfficialScore,
            storage::models::PreliminaryScore,
            ::scoring::Discipline,
            ::scoring::Gender,
            ::scoring::Gate,
            ::scoring::HandicapAthleteInput,
            ::scoring::HandicapStart,
            ::scoring::LaserRunTargetConfig,
            ::scoring::TargetAssignment,
            ::scoring::SeedingConfig,
            ::scoring::SeedingHeat,
            ::scoring::SeedingAssignment,
        )
    ),
    tags(
        (name = "scoring", description = "Stateless scoring calculators"),
        (name = "events", description = "Per-event schedules, seeding and official scores"),
        (name = "preliminary-scores", description = "Volunteer submissions and verification"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting pentathlon scoring API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, every write endpoint will answer 401");
    }

    let state = AppState::new(db, config.event_defaults());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", routes::api_routes(api_keys))
        .with_state(state)
        .layer(cors);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}
