//! services/api/src/web/state.rs
//!
//! Defines the application's shared and session-specific states.

use crate::config::Config;
use nutriflow_core::{
    booking::BookingFlow,
    catalog,
    domain::{BlogTopic, Coach, MealPlan},
    ports::{ArticleService, MealPlanService},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// How long the booking success display stays up before the flow reverts
/// to the catalog.
pub const BOOKING_SUCCESS_REVERT_SECS: u64 = 3;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub plan_adapter: Arc<dyn MealPlanService>,
    pub article_adapter: Arc<dyn ArticleService>,
    pub coaches: Vec<Coach>,
    pub topics: Vec<BlogTopic>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        plan_adapter: Arc<dyn MealPlanService>,
        article_adapter: Arc<dyn ArticleService>,
    ) -> Self {
        Self {
            config,
            plan_adapter,
            article_adapter,
            coaches: catalog::coaches(),
            topics: catalog::blog_topics(),
            sessions: SessionStore::new(),
        }
    }
}

/// In-memory registry of active client sessions. Nothing is persisted;
/// sessions live until the process exits.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Arc<Mutex<SessionState>>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh session on the landing view and returns its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(SessionState::new()));
        self.inner.lock().await.insert(id, session);
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<SessionState>>> {
        self.inner.lock().await.get(&id).cloned()
    }
}

//=========================================================================================
// SessionState (Specific to One Client Session)
//=========================================================================================

/// The four mutually exclusive views of the application. A session is
/// always on exactly one of them; there is no history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    Home,
    MealPlanner,
    Coaching,
    Blog,
}

/// An article currently open in the blog view.
#[derive(Debug, Clone)]
pub struct ActiveArticle {
    pub topic: BlogTopic,
    pub paragraphs: Vec<String>,
}

/// The state for a single client session. Everything here corresponds to
/// view-local state and is discarded when the session navigates away.
pub struct SessionState {
    pub view: View,
    pub booking: BookingFlow,
    pub plan: Option<MealPlan>,
    pub active_article: Option<ActiveArticle>,
    /// Single-flight guards: at most one outstanding model call per feature.
    pub plan_pending: bool,
    pub article_pending: bool,
    /// Bumped on every navigation; a reply whose epoch no longer matches is
    /// discarded instead of updating a view the client has left.
    pub generation_epoch: u64,
    /// Cancels in-flight generation when the session navigates away.
    pub cancellation_token: CancellationToken,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Creates a new session on the landing view with nothing in flight.
    pub fn new() -> Self {
        Self {
            view: View::Home,
            booking: BookingFlow::new(),
            plan: None,
            active_article: None,
            plan_pending: false,
            article_pending: false,
            generation_epoch: 0,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Switches to another view, discarding all view-local state and
    /// cancelling any in-flight generation. Re-selecting the current view
    /// is a no-op (the view never unmounts).
    pub fn navigate(&mut self, view: View) {
        if view == self.view {
            return;
        }

        self.cancellation_token.cancel();
        self.cancellation_token = CancellationToken::new();
        self.generation_epoch += 1;

        self.plan = None;
        self.active_article = None;
        self.booking = BookingFlow::new();
        // The cancelled worker would clear these itself, but it may already
        // have been dropped with its handler; release the guards here.
        self.plan_pending = false;
        self.article_pending = false;
        self.view = view;
    }
}
