//! services/api/src/web/generate.rs
//!
//! The asynchronous "worker" functions for the two model-backed features:
//! meal-plan generation and blog-article generation. Each enforces the
//! session's single-flight guard and only applies its result if the session
//! is still on the view that issued the request.

use crate::web::state::{ActiveArticle, SessionState, View};
use nutriflow_core::{
    domain::{BlogTopic, MealPlan, UserProfile},
    ports::{ArticleService, MealPlanService, PortError},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Why a generation request produced no result for the caller.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A request for the same feature is already in flight on this session.
    #[error("A request is already in progress for this session")]
    AlreadyPending,
    /// The session is not on the view that owns this feature.
    #[error("The session is not on the {0:?} view")]
    WrongView(View),
    /// The session navigated away while the call was in flight.
    #[error("The request was cancelled by navigation")]
    Cancelled,
    /// The reply arrived after the owning view was left; it was discarded.
    #[error("The reply arrived after navigation and was discarded")]
    Superseded,
    /// The model call itself failed.
    #[error(transparent)]
    Failed(#[from] PortError),
}

/// The single-flight flag a worker holds while its call is in flight.
#[derive(Clone, Copy)]
enum PendingFlag {
    Plan,
    Article,
}

impl PendingFlag {
    fn clear(self, state: &mut SessionState) {
        match self {
            PendingFlag::Plan => state.plan_pending = false,
            PendingFlag::Article => state.article_pending = false,
        }
    }
}

/// Releases a session's single-flight flag when the worker finishes.
///
/// A disconnecting client drops the handler future mid-await; without this
/// guard the flag would stay set and the session would reject every later
/// request as already pending.
struct PendingGuard {
    session: Arc<Mutex<SessionState>>,
    flag: PendingFlag,
    armed: bool,
}

impl PendingGuard {
    fn new(session: Arc<Mutex<SessionState>>, flag: PendingFlag) -> Self {
        Self {
            session,
            flag,
            armed: true,
        }
    }

    /// Clears the flag under the lock the worker already holds.
    fn release(mut self, state: &mut SessionState) {
        self.flag.clear(state);
        self.armed = false;
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let session = self.session.clone();
        let flag = self.flag;
        tokio::spawn(async move {
            flag.clear(&mut *session.lock().await);
        });
    }
}

/// Runs one guarded plan generation for a session.
///
/// The pending flag blocks a second submission while one is outstanding.
/// Navigation away cancels the call; a reply that outlives its epoch is
/// discarded rather than applied to a view the client already left.
pub async fn run_plan_generation(
    session: Arc<Mutex<SessionState>>,
    adapter: Arc<dyn MealPlanService>,
    profile: UserProfile,
) -> Result<MealPlan, GenerateError> {
    let (token, epoch) = {
        let mut state = session.lock().await;
        if state.view != View::MealPlanner {
            return Err(GenerateError::WrongView(View::MealPlanner));
        }
        if state.plan_pending {
            return Err(GenerateError::AlreadyPending);
        }
        state.plan_pending = true;
        (state.cancellation_token.clone(), state.generation_epoch)
    };
    let guard = PendingGuard::new(session.clone(), PendingFlag::Plan);

    let outcome = tokio::select! {
        biased;
        result = adapter.generate_plan(&profile) => result.map_err(GenerateError::from),
        _ = token.cancelled() => Err(GenerateError::Cancelled),
    };

    let mut state = session.lock().await;
    guard.release(&mut state);

    let plan = outcome?;
    if state.generation_epoch != epoch || state.view != View::MealPlanner {
        info!("Discarding meal plan that arrived after navigation.");
        return Err(GenerateError::Superseded);
    }
    state.plan = Some(plan.clone());
    Ok(plan)
}

/// Runs one guarded article generation for a session's blog view.
/// The returned paragraphs are also stored on the session as the open article.
pub async fn run_article_generation(
    session: Arc<Mutex<SessionState>>,
    adapter: Arc<dyn ArticleService>,
    topic: BlogTopic,
) -> Result<Vec<String>, GenerateError> {
    let (token, epoch) = {
        let mut state = session.lock().await;
        if state.view != View::Blog {
            return Err(GenerateError::WrongView(View::Blog));
        }
        if state.article_pending {
            return Err(GenerateError::AlreadyPending);
        }
        state.article_pending = true;
        (state.cancellation_token.clone(), state.generation_epoch)
    };
    let guard = PendingGuard::new(session.clone(), PendingFlag::Article);

    let outcome = tokio::select! {
        biased;
        result = adapter.generate_article(&topic.title) => result.map_err(GenerateError::from),
        _ = token.cancelled() => Err(GenerateError::Cancelled),
    };

    let mut state = session.lock().await;
    guard.release(&mut state);

    let content = outcome?;
    if state.generation_epoch != epoch || state.view != View::Blog {
        info!("Discarding article that arrived after navigation.");
        return Err(GenerateError::Superseded);
    }

    let paragraphs = split_paragraphs(&content);
    state.active_article = Some(ActiveArticle {
        topic,
        paragraphs: paragraphs.clone(),
    });
    Ok(paragraphs)
}

/// Splits generated article text on blank lines into display paragraphs.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
