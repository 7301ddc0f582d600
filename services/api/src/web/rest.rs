//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::generate::{run_article_generation, run_plan_generation, GenerateError};
use crate::web::state::{AppState, SessionState, View, BOOKING_SUCCESS_REVERT_SECS};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{NaiveDate, Utc};
use nutriflow_core::{
    booking::{self, BookingError, BookingFlow},
    catalog,
    domain::{Booking, Coach, MealPlan, UserProfile},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_session_handler,
        get_session_handler,
        navigate_handler,
        generate_plan_handler,
        list_coaches_handler,
        coach_availability_handler,
        select_coach_handler,
        select_date_handler,
        select_slot_handler,
        confirm_booking_handler,
        booking_back_handler,
        list_topics_handler,
        generate_article_handler,
    ),
    components(
        schemas(
            View,
            CreateSessionResponse,
            NavigateRequest,
            PlanRequest,
            AvailabilityResponse,
            BookingStatus,
            SelectCoachRequest,
            SelectDateRequest,
            SelectSlotRequest,
            ArticleRequest,
            ArticleResponse,
        )
    ),
    tags(
        (name = "NutriFlow API", description = "Meal planning, coach booking, and article generation.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The response payload sent after successfully creating a session.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    session_id: Uuid,
    view: View,
}

#[derive(Deserialize, ToSchema)]
pub struct NavigateRequest {
    view: View,
}

/// The profile submitted to generate a meal plan.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    age: u32,
    gender: String,
    /// Body weight in kilograms.
    weight_kg: f64,
    /// Height in centimeters.
    height_cm: f64,
    goal: String,
    dietary_restrictions: String,
    activity_level: String,
}

impl From<PlanRequest> for UserProfile {
    fn from(req: PlanRequest) -> Self {
        UserProfile {
            age: req.age,
            gender: req.gender,
            weight_kg: req.weight_kg,
            height_cm: req.height_cm,
            goal: req.goal,
            dietary_restrictions: req.dietary_restrictions,
            activity_level: req.activity_level,
        }
    }
}

/// A snapshot of a session's view-local state.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    session_id: Uuid,
    view: View,
    plan_pending: bool,
    article_pending: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<MealPlan>,
    booking: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    article: Option<ArticleResponse>,
}

/// The booking flow flattened for the wire.
#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatus {
    /// One of BROWSING, SELECTING, CONFIRMED.
    step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    coach_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coach_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slot: Option<String>,
    can_confirm: bool,
}

impl From<&BookingFlow> for BookingStatus {
    fn from(flow: &BookingFlow) -> Self {
        match flow {
            BookingFlow::Browsing => BookingStatus {
                step: "BROWSING".to_string(),
                coach_id: None,
                coach_name: None,
                date: None,
                slot: None,
                can_confirm: false,
            },
            BookingFlow::Selecting { coach, date, slot } => BookingStatus {
                step: "SELECTING".to_string(),
                coach_id: Some(coach.id.clone()),
                coach_name: Some(coach.name.clone()),
                date: *date,
                slot: slot.clone(),
                can_confirm: flow.can_confirm(),
            },
            BookingFlow::Confirmed { booking } => BookingStatus {
                step: "CONFIRMED".to_string(),
                coach_id: Some(booking.coach_id.clone()),
                coach_name: Some(booking.coach_name.clone()),
                date: Some(booking.date),
                slot: Some(booking.slot.clone()),
                can_confirm: false,
            },
        }
    }
}

/// The dates and slot labels a coach can be booked for.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    coach_id: String,
    /// Five consecutive days starting tomorrow.
    dates: Vec<NaiveDate>,
    slots: Vec<String>,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectCoachRequest {
    coach_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SelectDateRequest {
    date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct SelectSlotRequest {
    slot: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRequest {
    topic_id: String,
}

/// A generated article, split into display paragraphs.
#[derive(Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    topic_id: String,
    title: String,
    category: String,
    paragraphs: Vec<String>,
}

//=========================================================================================
// Helpers
//=========================================================================================

async fn require_session(
    app_state: &AppState,
    id: Uuid,
) -> Result<Arc<Mutex<SessionState>>, (StatusCode, String)> {
    app_state
        .sessions
        .get(id)
        .await
        .ok_or((StatusCode::NOT_FOUND, "Unknown session".to_string()))
}

fn booking_rejection(err: BookingError) -> (StatusCode, String) {
    let status = match err {
        BookingError::SlotUnavailable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::CONFLICT,
    };
    (status, err.to_string())
}

fn snapshot(session_id: Uuid, state: &SessionState) -> SessionSnapshot {
    SessionSnapshot {
        session_id,
        view: state.view,
        plan_pending: state.plan_pending,
        article_pending: state.article_pending,
        plan: state.plan.clone(),
        booking: BookingStatus::from(&state.booking),
        article: state.active_article.as_ref().map(|a| ArticleResponse {
            topic_id: a.topic.id.clone(),
            title: a.topic.title.clone(),
            category: a.topic.category.clone(),
            paragraphs: a.paragraphs.clone(),
        }),
    }
}

//=========================================================================================
// Session and Navigation Handlers
//=========================================================================================

/// Create a new client session. The session starts on the landing view.
#[utoipa::path(
    post,
    path = "/sessions",
    responses(
        (status = 201, description = "Session created successfully", body = CreateSessionResponse)
    )
)]
pub async fn create_session_handler(
    State(app_state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let session_id = app_state.sessions.create().await;
    info!("Created session {}", session_id);
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            view: View::Home,
        }),
    )
}

/// Fetch a snapshot of the session's current view and state.
#[utoipa::path(
    get,
    path = "/sessions/{id}",
    params(("id" = Uuid, Path, description = "The session id.")),
    responses(
        (status = 200, description = "The current session state"),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn get_session_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = require_session(&app_state, id).await?;
    let state = session.lock().await;
    Ok(Json(snapshot(id, &state)))
}

/// Switch the session to another view.
///
/// Navigation discards the view-local state (generated plan, booking
/// selection, open article) and cancels any in-flight generation so a late
/// reply can never update a view the client has left.
#[utoipa::path(
    put,
    path = "/sessions/{id}/view",
    params(("id" = Uuid, Path, description = "The session id.")),
    request_body = NavigateRequest,
    responses(
        (status = 200, description = "The new active view"),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn navigate_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NavigateRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = require_session(&app_state, id).await?;
    let mut state = session.lock().await;
    state.navigate(payload.view);
    Ok(Json(snapshot(id, &state)))
}

//=========================================================================================
// Meal Plan Handler
//=========================================================================================

/// Generate a personalized meal plan from the submitted profile.
///
/// At most one plan request is in flight per session; a second submission
/// while one is pending is rejected without issuing another model call.
#[utoipa::path(
    post,
    path = "/sessions/{id}/plan",
    params(("id" = Uuid, Path, description = "The session id.")),
    request_body = PlanRequest,
    responses(
        (status = 200, description = "The generated plan"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "A request is already pending, or the session left the meal planner"),
        (status = 502, description = "Plan generation failed")
    )
)]
pub async fn generate_plan_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PlanRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = require_session(&app_state, id).await?;

    match run_plan_generation(session, app_state.plan_adapter.clone(), payload.into()).await {
        Ok(plan) => Ok(Json(plan)),
        Err(err @ (GenerateError::AlreadyPending
        | GenerateError::WrongView(_)
        | GenerateError::Cancelled
        | GenerateError::Superseded)) => Err((StatusCode::CONFLICT, err.to_string())),
        Err(GenerateError::Failed(e)) => {
            error!("Error generating plan: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                "Could not generate plan. Please try again.".to_string(),
            ))
        }
    }
}

//=========================================================================================
// Coaching Handlers
//=========================================================================================

/// List the coach roster.
#[utoipa::path(
    get,
    path = "/coaches",
    responses((status = 200, description = "The static coach catalog"))
)]
pub async fn list_coaches_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<Coach>> {
    Json(app_state.coaches.clone())
}

/// The bookable dates and slots for one coach.
#[utoipa::path(
    get,
    path = "/coaches/{id}/availability",
    params(("id" = String, Path, description = "The coach id.")),
    responses(
        (status = 200, description = "Bookable dates and slot labels", body = AvailabilityResponse),
        (status = 404, description = "Unknown coach")
    )
)]
pub async fn coach_availability_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let coach = catalog::find_coach(&app_state.coaches, &id)
        .ok_or((StatusCode::NOT_FOUND, "Unknown coach".to_string()))?;
    Ok(Json(AvailabilityResponse {
        coach_id: coach.id.clone(),
        dates: booking::upcoming_dates(Utc::now().date_naive()),
        slots: coach.available_slots.clone(),
    }))
}

/// Choose a coach to book, entering the selection step.
#[utoipa::path(
    post,
    path = "/sessions/{id}/booking/coach",
    params(("id" = Uuid, Path, description = "The session id.")),
    request_body = SelectCoachRequest,
    responses(
        (status = 200, description = "The updated booking state", body = BookingStatus),
        (status = 404, description = "Unknown session or coach")
    )
)]
pub async fn select_coach_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SelectCoachRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let coach = catalog::find_coach(&app_state.coaches, &payload.coach_id)
        .cloned()
        .ok_or((StatusCode::NOT_FOUND, "Unknown coach".to_string()))?;

    let session = require_session(&app_state, id).await?;
    let mut state = session.lock().await;
    state.booking.select_coach(coach).map_err(booking_rejection)?;
    Ok(Json(BookingStatus::from(&state.booking)))
}

/// Pick one of the offered booking dates.
#[utoipa::path(
    post,
    path = "/sessions/{id}/booking/date",
    params(("id" = Uuid, Path, description = "The session id.")),
    request_body = SelectDateRequest,
    responses(
        (status = 200, description = "The updated booking state", body = BookingStatus),
        (status = 404, description = "Unknown session"),
        (status = 422, description = "Date is outside the offered window")
    )
)]
pub async fn select_date_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SelectDateRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let offered = booking::upcoming_dates(Utc::now().date_naive());
    if !offered.contains(&payload.date) {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Date {} is not offered for booking", payload.date),
        ));
    }

    let session = require_session(&app_state, id).await?;
    let mut state = session.lock().await;
    state
        .booking
        .select_date(payload.date)
        .map_err(booking_rejection)?;
    Ok(Json(BookingStatus::from(&state.booking)))
}

/// Pick one of the coach's time slots. Requires a date to be chosen first.
#[utoipa::path(
    post,
    path = "/sessions/{id}/booking/slot",
    params(("id" = Uuid, Path, description = "The session id.")),
    request_body = SelectSlotRequest,
    responses(
        (status = 200, description = "The updated booking state", body = BookingStatus),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "No date selected yet"),
        (status = 422, description = "Slot not offered by this coach")
    )
)]
pub async fn select_slot_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SelectSlotRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = require_session(&app_state, id).await?;
    let mut state = session.lock().await;
    state
        .booking
        .select_slot(&payload.slot)
        .map_err(booking_rejection)?;
    Ok(Json(BookingStatus::from(&state.booking)))
}

/// Confirm the booking. Rejected unless both a date and a slot are chosen.
///
/// On success the flow shows the confirmation and automatically reverts to
/// the catalog after a fixed delay, clearing the selection.
#[utoipa::path(
    post,
    path = "/sessions/{id}/booking/confirm",
    params(("id" = Uuid, Path, description = "The session id.")),
    responses(
        (status = 200, description = "The confirmed booking"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Date and slot are not both selected")
    )
)]
pub async fn confirm_booking_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = require_session(&app_state, id).await?;
    let booking: Booking = {
        let mut state = session.lock().await;
        state.booking.confirm().map_err(booking_rejection)?
    };
    info!(
        "Session {} booked {} on {} at {}",
        id, booking.coach_name, booking.date, booking.slot
    );

    // Revert the success display to the catalog after the fixed delay. The
    // timer only clears the booking it confirmed; a newer confirmation made
    // within the window keeps its own timer.
    let revert_session = session.clone();
    let confirmed = booking.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(BOOKING_SUCCESS_REVERT_SECS)).await;
        let mut state = revert_session.lock().await;
        if matches!(&state.booking, BookingFlow::Confirmed { booking } if *booking == confirmed) {
            state.booking.reset();
        }
    });

    Ok(Json(booking))
}

/// Leave the selection step and return to the coach catalog.
#[utoipa::path(
    delete,
    path = "/sessions/{id}/booking",
    params(("id" = Uuid, Path, description = "The session id.")),
    responses(
        (status = 200, description = "The updated booking state", body = BookingStatus),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn booking_back_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = require_session(&app_state, id).await?;
    let mut state = session.lock().await;
    state.booking.back();
    Ok(Json(BookingStatus::from(&state.booking)))
}

//=========================================================================================
// Blog Handlers
//=========================================================================================

/// List the blog topic catalog.
#[utoipa::path(
    get,
    path = "/blog/topics",
    responses((status = 200, description = "The static topic catalog"))
)]
pub async fn list_topics_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<Vec<nutriflow_core::domain::BlogTopic>> {
    Json(app_state.topics.clone())
}

/// Generate an article for a catalog topic.
///
/// Generation failures are logged and answered with 204 No Content; the
/// blog view shows no error state beyond the loading flag clearing.
#[utoipa::path(
    post,
    path = "/sessions/{id}/article",
    params(("id" = Uuid, Path, description = "The session id.")),
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "The generated article", body = ArticleResponse),
        (status = 204, description = "Generation failed or was superseded"),
        (status = 404, description = "Unknown session or topic"),
        (status = 409, description = "A request is already pending")
    )
)]
pub async fn generate_article_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ArticleRequest>,
) -> Result<Response, (StatusCode, String)> {
    let topic = catalog::find_topic(&app_state.topics, &payload.topic_id)
        .cloned()
        .ok_or((StatusCode::NOT_FOUND, "Unknown topic".to_string()))?;
    let session = require_session(&app_state, id).await?;

    match run_article_generation(session, app_state.article_adapter.clone(), topic.clone()).await {
        Ok(paragraphs) => Ok(Json(ArticleResponse {
            topic_id: topic.id,
            title: topic.title,
            category: topic.category,
            paragraphs,
        })
        .into_response()),
        Err(err @ (GenerateError::AlreadyPending | GenerateError::WrongView(_))) => {
            Err((StatusCode::CONFLICT, err.to_string()))
        }
        Err(GenerateError::Failed(e)) => {
            // Logged only; the blog view surfaces no error state.
            error!("Error generating article for '{}': {}", topic.title, e);
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        Err(GenerateError::Cancelled | GenerateError::Superseded) => {
            Ok(StatusCode::NO_CONTENT.into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use async_trait::async_trait;
    use nutriflow_core::ports::{ArticleService, MealPlanService, PortError, PortResult};

    struct StubPlanService;

    #[async_trait]
    impl MealPlanService for StubPlanService {
        async fn generate_plan(&self, _profile: &UserProfile) -> PortResult<MealPlan> {
            Err(PortError::Unexpected("not under test".to_string()))
        }
    }

    struct StubArticleService;

    #[async_trait]
    impl ArticleService for StubArticleService {
        async fn generate_article(&self, _topic_title: &str) -> PortResult<String> {
            Err(PortError::Unexpected("not under test".to_string()))
        }
    }

    fn test_app_state() -> Arc<AppState> {
        let config = Arc::new(Config {
            bind_address: "127.0.0.1:0".parse().unwrap(),
            log_level: tracing::Level::INFO,
            gemini_api_key: None,
            gemini_base_url: "http://localhost".to_string(),
            plan_model: "test-model".to_string(),
            article_model: "test-model".to_string(),
        });
        Arc::new(AppState::new(
            config,
            Arc::new(StubPlanService),
            Arc::new(StubArticleService),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_booking_reverts_after_the_delay() {
        let app_state = test_app_state();
        let id = app_state.sessions.create().await;
        let session = app_state.sessions.get(id).await.unwrap();

        {
            let mut state = session.lock().await;
            state
                .booking
                .select_coach(catalog::coaches().remove(0))
                .unwrap();
            state
                .booking
                .select_date(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
                .unwrap();
            state.booking.select_slot("09:00 AM").unwrap();
        }

        confirm_booking_handler(State(app_state.clone()), Path(id))
            .await
            .unwrap();
        assert!(matches!(
            session.lock().await.booking,
            BookingFlow::Confirmed { .. }
        ));

        tokio::time::sleep(Duration::from_secs(BOOKING_SUCCESS_REVERT_SECS + 1)).await;
        assert_eq!(session.lock().await.booking, BookingFlow::Browsing);
    }

    #[tokio::test(start_paused = true)]
    async fn earlier_timer_leaves_a_newer_confirmation_alone() {
        let app_state = test_app_state();
        let id = app_state.sessions.create().await;
        let session = app_state.sessions.get(id).await.unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

        {
            let mut state = session.lock().await;
            state
                .booking
                .select_coach(catalog::coaches().remove(0))
                .unwrap();
            state.booking.select_date(date).unwrap();
            state.booking.select_slot("09:00 AM").unwrap();
        }
        confirm_booking_handler(State(app_state.clone()), Path(id))
            .await
            .unwrap();

        // One second in, the client books again for a different slot.
        tokio::time::sleep(Duration::from_secs(1)).await;
        {
            let mut state = session.lock().await;
            state.booking.reset();
            state
                .booking
                .select_coach(catalog::coaches().remove(0))
                .unwrap();
            state.booking.select_date(date).unwrap();
            state.booking.select_slot("11:00 AM").unwrap();
        }
        confirm_booking_handler(State(app_state.clone()), Path(id))
            .await
            .unwrap();

        // The first timer has fired by now; the second booking must survive.
        tokio::time::sleep(Duration::from_millis(2500)).await;
        match &session.lock().await.booking {
            BookingFlow::Confirmed { booking } => assert_eq!(booking.slot, "11:00 AM"),
            other => panic!("second confirmation was cleared early: {:?}", other),
        }

        // The second timer clears it on schedule.
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(session.lock().await.booking, BookingFlow::Browsing);
    }

    #[test]
    fn plan_request_maps_onto_the_profile() {
        let request: PlanRequest = serde_json::from_str(
            r#"{
                "age": 30,
                "gender": "Female",
                "weightKg": 70.0,
                "heightCm": 165.0,
                "goal": "Lose Weight",
                "dietaryRestrictions": "Gluten-free",
                "activityLevel": "Moderate"
            }"#,
        )
        .unwrap();

        let profile = UserProfile::from(request);
        assert_eq!(profile.age, 30);
        assert_eq!(profile.weight_kg, 70.0);
        assert_eq!(profile.dietary_restrictions, "Gluten-free");
    }

    #[tokio::test]
    async fn confirm_without_selection_is_rejected() {
        let app_state = test_app_state();
        let id = app_state.sessions.create().await;

        let result = confirm_booking_handler(State(app_state), Path(id)).await;
        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn booking_status_reflects_the_flow() {
        let mut flow = BookingFlow::new();
        assert_eq!(BookingStatus::from(&flow).step, "BROWSING");

        let coach = catalog::coaches().remove(1);
        flow.select_coach(coach).unwrap();
        let status = BookingStatus::from(&flow);
        assert_eq!(status.step, "SELECTING");
        assert_eq!(status.coach_name.as_deref(), Some("Marcus Thorne"));
        assert!(!status.can_confirm);

        flow.select_date(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
            .unwrap();
        flow.select_slot("10:00 AM").unwrap();
        assert!(BookingStatus::from(&flow).can_confirm);

        flow.confirm().unwrap();
        let status = BookingStatus::from(&flow);
        assert_eq!(status.step, "CONFIRMED");
        assert_eq!(status.slot.as_deref(), Some("10:00 AM"));
    }

    #[test]
    fn slot_rejections_are_unprocessable() {
        let (status, _) = booking_rejection(BookingError::SlotUnavailable("x".to_string()));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = booking_rejection(BookingError::Incomplete);
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
