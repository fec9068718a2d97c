use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::db::{Cache, ProfileStore};
use crate::models::CatalogItem;
use crate::services::{RecommendationProvider, RecommendationService, SubscriptionService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommendations: Arc<RecommendationService>,
    pub subscriptions: Arc<SubscriptionService>,
    pub store: Arc<dyn ProfileStore>,
    board: Arc<RwLock<RecommendationBoard>>,
    next_token: Arc<AtomicU64>,
}

/// The current recommendation list and the token of the generation that
/// produced it
///
/// Replaced wholesale by each committed generation; concurrent generations
/// race only through [`AppState::commit_generation`], which discards stale
/// results instead of letting a slow response clobber a fresher one.
#[derive(Debug, Clone, Default)]
pub struct RecommendationBoard {
    pub token: u64,
    pub items: Vec<CatalogItem>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        provider: Arc<dyn RecommendationProvider>,
        cache: Cache,
    ) -> Self {
        let subscriptions = SubscriptionService::new(store.clone(), cache);
        let recommendations =
            RecommendationService::new(provider, store.clone(), subscriptions.clone());

        Self {
            recommendations: Arc::new(recommendations),
            subscriptions: Arc::new(subscriptions),
            store,
            board: Arc::new(RwLock::new(RecommendationBoard::default())),
            next_token: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Reserves a monotonically increasing token for a generation that is
    /// about to start
    pub fn begin_generation(&self) -> u64 {
        self.next_token.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Commits a completed generation unless a newer one already committed
    ///
    /// Returns false when the result was stale and discarded.
    pub async fn commit_generation(&self, token: u64, items: Vec<CatalogItem>) -> bool {
        let mut board = self.board.write().await;
        if token <= board.token {
            return false;
        }
        board.token = token;
        board.items = items;
        true
    }

    pub async fn current_board(&self) -> RecommendationBoard {
        self.board.read().await.clone()
    }
}
