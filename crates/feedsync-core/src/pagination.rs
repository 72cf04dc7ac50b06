//! Page cursor bookkeeping over any paged, online-first source.
//!
//! At most one pagination operation runs per controller. A `refresh` supersedes
//! whatever is in flight: it bumps the generation, the running operation sees
//! the change, abandons its fetch and leaves items and cursor untouched. A
//! `load_more` that finds another operation in flight is rejected with
//! [`LoadOutcome::Busy`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, watch};

use crate::domain::PostPage;
use crate::error::SyncError;
use crate::sync::{Freshness, Synced};

/// One page of entities plus the cached metadata for it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub meta: Option<PostPage>,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Whether another page can be requested. False without metadata.
    pub fn has_more(&self) -> bool {
        self.meta.as_ref().is_some_and(PostPage::has_next)
    }
}

/// Anything that can serve pages of entities.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Clone + Send + Sync + 'static;

    async fn read_page(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Synced<Page<Self::Item>>, SyncError>;
}

/// Observable pagination state.
#[derive(Debug, Clone)]
pub struct PagerState<T> {
    pub current_page: u32,
    /// Entities in fetch order.
    pub items: Vec<T>,
    pub has_more_to_load: bool,
    pub refreshing: bool,
    pub loading_more: bool,
    /// Freshness of the last page that landed.
    pub last_source: Option<Freshness>,
}

impl<T> Default for PagerState<T> {
    fn default() -> Self {
        Self {
            current_page: 0,
            items: Vec::new(),
            has_more_to_load: false,
            refreshing: false,
            loading_more: false,
            last_source: None,
        }
    }
}

/// What a `refresh` or `load_more` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page landed; `added` entities were placed in the list.
    Loaded { added: usize, source: Freshness },
    /// `load_more` with nothing left to load. State untouched.
    NoMore,
    /// Another operation was in flight. State untouched.
    Busy,
    /// A newer `refresh` took over before this one finished. State untouched.
    Superseded,
}

/// Tracks cursor, accumulated entities and "more available" over a [`PageSource`].
pub struct PaginationController<S: PageSource> {
    source: Arc<S>,
    page_size: u32,
    state: watch::Sender<PagerState<S::Item>>,
    generation: watch::Sender<u64>,
    flight: Mutex<()>,
}

impl<S: PageSource> PaginationController<S> {
    pub fn new(source: Arc<S>, page_size: u32) -> Self {
        Self {
            source,
            page_size,
            state: watch::channel(PagerState::default()).0,
            generation: watch::channel(0).0,
            flight: Mutex::new(()),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PagerState<S::Item> {
        self.state.borrow().clone()
    }

    /// Receive every state change.
    pub fn subscribe(&self) -> watch::Receiver<PagerState<S::Item>> {
        self.state.subscribe()
    }

    /// Reload from page 0, replacing the accumulated list.
    ///
    /// Cursor and items change only once the page lands, so dropping the
    /// returned future leaves the previous list fully usable.
    pub async fn refresh(&self) -> Result<LoadOutcome, SyncError> {
        let mut generation = 0;
        self.generation.send_modify(|g| {
            *g += 1;
            generation = *g;
        });

        let _flight = self.flight.lock().await;
        let latest = *self.generation.borrow();
        if latest != generation {
            return Ok(LoadOutcome::Superseded);
        }

        let _busy = BusyFlag::raise(&self.state, Busy::Refreshing);
        let Some(fetched) = self.fetch(0, generation).await else {
            return Ok(LoadOutcome::Superseded);
        };
        let synced = fetched?;

        let has_more = synced.value.has_more();
        let added = synced.value.items.len();
        let source = synced.source;
        tracing::debug!(added, has_more, "Refreshed");

        self.state.send_modify(|s| {
            s.current_page = 0;
            s.items = synced.value.items;
            s.has_more_to_load = has_more;
            s.refreshing = false;
            s.last_source = Some(source.clone());
        });
        Ok(LoadOutcome::Loaded { added, source })
    }

    /// Fetch the next page and append it. A no-op when nothing is left.
    pub async fn load_more(&self) -> Result<LoadOutcome, SyncError> {
        let Ok(_flight) = self.flight.try_lock() else {
            return Ok(LoadOutcome::Busy);
        };

        let (next_page, has_more) = {
            let state = self.state.borrow();
            (state.current_page + 1, state.has_more_to_load)
        };
        if !has_more {
            return Ok(LoadOutcome::NoMore);
        }
        let generation = *self.generation.borrow();

        let _busy = BusyFlag::raise(&self.state, Busy::LoadingMore);
        let Some(fetched) = self.fetch(next_page, generation).await else {
            return Ok(LoadOutcome::Superseded);
        };
        let synced = fetched?;

        let has_more = synced.value.has_more();
        let added = synced.value.items.len();
        let source = synced.source;
        tracing::debug!(page = next_page, added, has_more, "Loaded more");

        self.state.send_modify(|s| {
            s.current_page = next_page;
            s.items.extend(synced.value.items);
            s.has_more_to_load = has_more;
            s.loading_more = false;
            s.last_source = Some(source.clone());
        });
        Ok(LoadOutcome::Loaded { added, source })
    }

    /// Read a page unless the generation moves on first. `None` when superseded.
    async fn fetch(
        &self,
        page: u32,
        generation: u64,
    ) -> Option<Result<Synced<Page<S::Item>>, SyncError>> {
        let mut changes = self.generation.subscribe();

        tokio::select! {
            result = self.source.read_page(page, self.page_size) => Some(result),
            _ = changes.wait_for(|g| *g != generation) => {
                tracing::debug!(page, "Page fetch superseded");
                None
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Busy {
    Refreshing,
    LoadingMore,
}

impl Busy {
    fn flag<T>(self, state: &mut PagerState<T>) -> &mut bool {
        match self {
            Self::Refreshing => &mut state.refreshing,
            Self::LoadingMore => &mut state.loading_more,
        }
    }
}

/// Raised busy flag, lowered on drop. Covers early returns, errors and a
/// caller dropping the operation mid-fetch.
struct BusyFlag<'a, T> {
    state: &'a watch::Sender<PagerState<T>>,
    busy: Busy,
}

impl<'a, T> BusyFlag<'a, T> {
    fn raise(state: &'a watch::Sender<PagerState<T>>, busy: Busy) -> Self {
        state.send_modify(|s| *busy.flag(s) = true);
        Self { state, busy }
    }
}

impl<T> Drop for BusyFlag<'_, T> {
    fn drop(&mut self) {
        let busy = self.busy;
        self.state.send_if_modified(|s| std::mem::replace(busy.flag(s), false));
    }
}
