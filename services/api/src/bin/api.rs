//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{GeminiArticleAdapter, GeminiPlanAdapter},
    config::Config,
    error::ApiError,
    web::{
        booking_back_handler, coach_availability_handler, confirm_booking_handler,
        create_session_handler, generate_article_handler, generate_plan_handler,
        get_session_handler, list_coaches_handler, list_topics_handler, navigate_handler,
        rest::ApiDoc, select_coach_handler, select_date_handler, select_slot_handler,
        state::AppState,
    },
};
use async_openai::{config::OpenAIConfig, Client};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Model Adapters ---
    let gemini_config = OpenAIConfig::new()
        .with_api_key(
            config
                .gemini_api_key
                .as_ref()
                .ok_or_else(|| ApiError::Internal("GEMINI_API_KEY is required".to_string()))?,
        )
        .with_api_base(&config.gemini_base_url);
    let gemini_client = Client::with_config(gemini_config);

    let plan_adapter = Arc::new(GeminiPlanAdapter::new(
        gemini_client.clone(),
        config.plan_model.clone(),
    ));
    let article_adapter = Arc::new(GeminiArticleAdapter::new(
        gemini_client.clone(),
        config.article_model.clone(),
    ));

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(config.clone(), plan_adapter, article_adapter));

    let cors = CorsLayer::new()
        .allow_origin("http://localhost:5173".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    let api_router = Router::new()
        .route("/sessions", post(create_session_handler))
        .route("/sessions/{id}", get(get_session_handler))
        .route("/sessions/{id}/view", put(navigate_handler))
        .route("/sessions/{id}/plan", post(generate_plan_handler))
        .route(
            "/sessions/{id}/booking",
            axum::routing::delete(booking_back_handler),
        )
        .route("/sessions/{id}/booking/coach", post(select_coach_handler))
        .route("/sessions/{id}/booking/date", post(select_date_handler))
        .route("/sessions/{id}/booking/slot", post(select_slot_handler))
        .route(
            "/sessions/{id}/booking/confirm",
            post(confirm_booking_handler),
        )
        .route("/sessions/{id}/article", post(generate_article_handler))
        .route("/coaches", get(list_coaches_handler))
        .route("/coaches/{id}/availability", get(coach_availability_handler))
        .route("/blog/topics", get(list_topics_handler))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
