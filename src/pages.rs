use crate::favorites::FavoritesStore;
use crate::tmdb::{MovieDetail, MoviePage, MovieSummary, TmdbApi};
use anyhow::Result;
use futures::future::try_join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

/// How many titles each home rail shows.
pub const HOME_RAIL: usize = 4;
/// How many titles the detail view's recommendations rail shows.
pub const RELATED_RAIL: usize = 8;

/// The observable state of one view slot. Loading is the initial state;
/// Loaded and Error are terminal until the view is re-activated.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    Error(String),
    Loaded(T),
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, PageState::Loaded(_))
    }
}

/// A spawned fetch publishing `PageState` transitions through a watch
/// channel. Dropping the handle aborts the task, so a torn-down view can
/// never be written to.
pub struct PageTask<T> {
    rx: watch::Receiver<PageState<T>>,
    task: JoinHandle<()>,
}

impl<T: Send + Sync + 'static> PageTask<T> {
    pub fn spawn<F>(error_message: &str, fut: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(PageState::Loading);
        let error_message = error_message.to_string();
        let task = tokio::spawn(async move {
            let state = match fut.await {
                Ok(data) => PageState::Loaded(data),
                Err(err) => {
                    warn!("{} {:#}", error_message, err);
                    PageState::Error(error_message)
                }
            };
            let _ = tx.send(state);
        });
        Self { rx, task }
    }

    pub fn state(&self) -> PageState<T>
    where
        T: Clone,
    {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PageState<T>> {
        self.rx.clone()
    }

    /// Resolves once per published transition; pends forever after the task
    /// has published its terminal state, so it is safe inside a select loop.
    pub async fn changed(&mut self) {
        if self.rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    /// Waits until the slot leaves Loading and returns the terminal state.
    pub async fn settled(&mut self) -> PageState<T>
    where
        T: Clone,
    {
        loop {
            if !self.rx.borrow().is_loading() {
                return self.rx.borrow().clone();
            }
            if self.rx.changed().await.is_err() {
                return self.rx.borrow().clone();
            }
        }
    }
}

impl<T> Drop for PageTask<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    NowPlaying,
    Popular,
    TopRated,
}

impl ListingKind {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::NowPlaying => "Now Playing",
            Self::Popular => "Popular",
            Self::TopRated => "Top Rated",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Self::NowPlaying => "Could not load now playing movies.",
            Self::Popular => "Could not load popular movies.",
            Self::TopRated => "Could not load top rated movies.",
        }
    }

    async fn fetch(&self, tmdb: &dyn TmdbApi) -> Result<MoviePage> {
        match self {
            Self::NowPlaying => tmdb.fetch_now_playing().await,
            Self::Popular => tmdb.fetch_popular().await,
            Self::TopRated => tmdb.fetch_top_rated().await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeData {
    pub now_playing: Vec<MovieSummary>,
    pub popular: Vec<MovieSummary>,
    pub top_rated: Vec<MovieSummary>,
}

/// Home view: three concurrent listing fetches joined together, each rail
/// trimmed for display. Any failure fails the whole view.
pub fn home(tmdb: Arc<dyn TmdbApi>) -> PageTask<HomeData> {
    PageTask::spawn("Could not load movies.", async move {
        let (now_playing, popular, top_rated) = tokio::try_join!(
            tmdb.fetch_now_playing(),
            tmdb.fetch_popular(),
            tmdb.fetch_top_rated(),
        )?;
        Ok(HomeData {
            now_playing: rail(now_playing.results, HOME_RAIL),
            popular: rail(popular.results, HOME_RAIL),
            top_rated: rail(top_rated.results, HOME_RAIL),
        })
    })
}

/// One listing view. An empty result list is a loaded state, never an error.
pub fn listing(tmdb: Arc<dyn TmdbApi>, kind: ListingKind) -> PageTask<Vec<MovieSummary>> {
    PageTask::spawn(kind.error_message(), async move {
        Ok(kind.fetch(tmdb.as_ref()).await?.results)
    })
}

/// The detail view's two independent slots. Failure of one never blocks or
/// fails the other.
pub struct DetailView {
    pub movie: PageTask<MovieDetail>,
    pub related: PageTask<Vec<MovieSummary>>,
}

pub fn detail(tmdb: Arc<dyn TmdbApi>, id: u64) -> DetailView {
    let movie = {
        let tmdb = tmdb.clone();
        PageTask::spawn("Could not load movie.", async move {
            tmdb.fetch_movie(id).await
        })
    };
    let related = PageTask::spawn("Could not load top rated movies.", async move {
        Ok(rail(tmdb.fetch_top_rated().await?.results, RELATED_RAIL))
    });
    DetailView { movie, related }
}

/// Favorites view: one concurrent fetch per saved id, joined in store
/// order. An empty store loads immediately without touching the network.
pub fn favorites(
    tmdb: Arc<dyn TmdbApi>,
    store: &dyn FavoritesStore,
) -> PageTask<Vec<MovieDetail>> {
    let ids = store.favorites();
    PageTask::spawn("Could not load favorites.", async move {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let fetches = ids.into_iter().map(|id| {
            let tmdb = tmdb.clone();
            async move { tmdb.fetch_movie(id).await }
        });
        try_join_all(fetches).await
    })
}

fn rail(mut results: Vec<MovieSummary>, len: usize) -> Vec<MovieSummary> {
    results.truncate(len);
    results
}
