use crate::favorites::FavoritesStore;
use crate::pages::{self, DetailView, HomeData, ListingKind, PageTask};
use crate::render;
use crate::routes::{Provenance, Route};
use crate::tmdb::{parse_movie_id, MovieDetail, MovieSummary, TmdbApi};
use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

enum ActiveView {
    Home(PageTask<HomeData>),
    Listing(ListingKind, PageTask<Vec<MovieSummary>>),
    Detail {
        id: u64,
        from: Option<Provenance>,
        view: DetailView,
    },
    Favorites(PageTask<Vec<MovieDetail>>),
}

impl ActiveView {
    async fn changed(&mut self) {
        match self {
            ActiveView::Home(task) => task.changed().await,
            ActiveView::Listing(_, task) => task.changed().await,
            ActiveView::Detail { view, .. } => tokio::select! {
                _ = view.movie.changed() => {}
                _ = view.related.changed() => {}
            },
            ActiveView::Favorites(task) => task.changed().await,
        }
    }
}

enum Event {
    Line(Option<String>),
    ViewChanged,
    Shutdown,
}

/// The interactive session: one active view at a time. Navigating replaces
/// the view's controller, which aborts its in-flight fetches.
pub struct Session {
    tmdb: Arc<dyn TmdbApi>,
    store: Arc<dyn FavoritesStore>,
    color: bool,
    route: Route,
    view: ActiveView,
}

impl Session {
    pub fn new(tmdb: Arc<dyn TmdbApi>, store: Arc<dyn FavoritesStore>, color: bool) -> Self {
        let view = spawn_view(&tmdb, store.as_ref(), Route::Home);
        Self {
            tmdb,
            store,
            color,
            route: Route::Home,
            view,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!("cineshelf - type 'help' for commands");
        println!("{}", self.render());
        loop {
            let event = tokio::select! {
                line = lines.next_line() => Event::Line(line?),
                _ = self.view.changed() => Event::ViewChanged,
                _ = tokio::signal::ctrl_c() => Event::Shutdown,
            };
            match event {
                Event::Line(Some(line)) => {
                    if !self.handle_command(line.trim()) {
                        break;
                    }
                }
                Event::Line(None) => break,
                Event::ViewChanged => println!("{}", self.render()),
                Event::Shutdown => {
                    info!("Shutdown signal received (Ctrl+C)");
                    break;
                }
            }
        }
        Ok(())
    }

    fn activate(&mut self, route: Route) {
        self.view = spawn_view(&self.tmdb, self.store.as_ref(), route);
        self.route = route;
        println!("{}", self.render());
    }

    fn render(&self) -> String {
        match &self.view {
            ActiveView::Home(task) => render::home_page(&task.state(), self.color),
            ActiveView::Listing(kind, task) => {
                render::listing_page(kind.heading(), &task.state(), self.color)
            }
            ActiveView::Detail { id, from, view } => render::detail_page(
                &view.movie.state(),
                &view.related.state(),
                self.store.is_favorite(*id),
                *from,
                self.color,
            ),
            ActiveView::Favorites(task) => render::favorites_page(&task.state(), self.color),
        }
    }

    fn current_movie_id(&self) -> Option<u64> {
        match &self.view {
            ActiveView::Detail { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Returns false when the session should end.
    fn handle_command(&mut self, line: &str) -> bool {
        if line.is_empty() {
            return true;
        }
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or_default();
        match command {
            "quit" | "exit" | "q" => return false,
            "help" | "?" => println!("{HELP}"),
            "refresh" | "r" => self.activate(self.route),
            "fav" => self.toggle_favorite(parts.next(), true),
            "unfav" => self.toggle_favorite(parts.next(), false),
            "movie" => match parts.next().and_then(parse_movie_id) {
                Some(id) => self.activate(Route::Movie { id, from: None }),
                None => println!("usage: movie <id>"),
            },
            _ => match Route::parse(line) {
                Some(route) => self.activate(route),
                None => println!("Unknown command '{line}'. Type 'help' for commands."),
            },
        }
        true
    }

    fn toggle_favorite(&mut self, arg: Option<&str>, add: bool) {
        let id = arg.and_then(parse_movie_id).or_else(|| self.current_movie_id());
        let Some(id) = id else {
            println!("No movie id given and no detail view is active.");
            return;
        };
        let result = if add {
            self.store.add_favorite(id)
        } else {
            self.store.remove_favorite(id)
        };
        match result {
            Ok(()) => {
                if add {
                    println!("Added {id} to favorites.");
                } else {
                    println!("Removed {id} from favorites.");
                }
                // The favorites view re-fetches so the list reflects the store;
                // a detail view re-renders its favorite marker.
                if matches!(self.view, ActiveView::Favorites(_)) {
                    self.activate(Route::Favorites);
                } else if matches!(self.view, ActiveView::Detail { .. }) {
                    println!("{}", self.render());
                }
            }
            Err(err) => println!("Favorites update failed: {err:#}"),
        }
    }
}

fn spawn_view(tmdb: &Arc<dyn TmdbApi>, store: &dyn FavoritesStore, route: Route) -> ActiveView {
    match route {
        Route::Home => ActiveView::Home(pages::home(tmdb.clone())),
        Route::NowPlaying => ActiveView::Listing(
            ListingKind::NowPlaying,
            pages::listing(tmdb.clone(), ListingKind::NowPlaying),
        ),
        Route::Popular => ActiveView::Listing(
            ListingKind::Popular,
            pages::listing(tmdb.clone(), ListingKind::Popular),
        ),
        Route::TopRated => ActiveView::Listing(
            ListingKind::TopRated,
            pages::listing(tmdb.clone(), ListingKind::TopRated),
        ),
        Route::Favorites => ActiveView::Favorites(pages::favorites(tmdb.clone(), store)),
        Route::Movie { id, from } => ActiveView::Detail {
            id,
            from,
            view: pages::detail(tmdb.clone(), id),
        },
    }
}

/// Render one view to stdout and report whether its primary content loaded.
pub async fn run_route(
    tmdb: Arc<dyn TmdbApi>,
    store: Arc<dyn FavoritesStore>,
    route: Route,
    color: bool,
) -> Result<bool> {
    let ok = match route {
        Route::Home => {
            let mut task = pages::home(tmdb);
            let state = task.settled().await;
            println!("{}", render::home_page(&state, color));
            state.is_loaded()
        }
        Route::NowPlaying | Route::Popular | Route::TopRated => {
            let kind = match route {
                Route::NowPlaying => ListingKind::NowPlaying,
                Route::Popular => ListingKind::Popular,
                _ => ListingKind::TopRated,
            };
            let mut task = pages::listing(tmdb, kind);
            let state = task.settled().await;
            println!("{}", render::listing_page(kind.heading(), &state, color));
            state.is_loaded()
        }
        Route::Favorites => {
            let mut task = pages::favorites(tmdb, store.as_ref());
            let state = task.settled().await;
            println!("{}", render::favorites_page(&state, color));
            state.is_loaded()
        }
        Route::Movie { id, from } => {
            let mut view = pages::detail(tmdb, id);
            let movie = view.movie.settled().await;
            let related = view.related.settled().await;
            let is_favorite = store.is_favorite(id);
            println!(
                "{}",
                render::detail_page(&movie, &related, is_favorite, from, color)
            );
            movie.is_loaded()
        }
    };
    Ok(ok)
}

const HELP: &str = "\
commands:
  home | now-playing | popular | top-rated | favorites
  movie <id>            open a movie's detail view
  /movie/<id>?from=...  path form of the same navigation
  fav [id]              add a movie to favorites (defaults to the open movie)
  unfav [id]            remove a movie from favorites
  refresh               re-activate the current view
  quit                  leave";
