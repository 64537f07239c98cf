use crate::tmdb::parse_movie_id;

/// Display-only tag naming the listing a detail view was reached from.
/// Never branches behavior; unknown values are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    NowPlaying,
    Popular,
    TopRated,
}

impl Provenance {
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "now-playing" => Some(Self::NowPlaying),
            "popular" => Some(Self::Popular),
            "top-rated" => Some(Self::TopRated),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NowPlaying => "now-playing",
            Self::Popular => "popular",
            Self::TopRated => "top-rated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    NowPlaying,
    Popular,
    TopRated,
    Favorites,
    Movie { id: u64, from: Option<Provenance> },
}

impl Route {
    /// Accepts both bare view names (`popular`) and the path form
    /// (`/movie/27205?from=popular`).
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let path = trimmed.strip_prefix('/').unwrap_or(trimmed);
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        match path {
            "" | "home" => Some(Route::Home),
            "now-playing" => Some(Route::NowPlaying),
            "popular" => Some(Route::Popular),
            "top-rated" => Some(Route::TopRated),
            "favorites" | "my-favorites" => Some(Route::Favorites),
            _ => {
                let id = path.strip_prefix("movie/").and_then(parse_movie_id)?;
                let from = query.and_then(from_query);
                Some(Route::Movie { id, from })
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::NowPlaying => "/now-playing".to_string(),
            Route::Popular => "/popular".to_string(),
            Route::TopRated => "/top-rated".to_string(),
            Route::Favorites => "/favorites".to_string(),
            Route::Movie { id, from } => match from {
                Some(from) => format!("/movie/{id}?from={}", from.as_str()),
                None => format!("/movie/{id}"),
            },
        }
    }
}

fn from_query(query: &str) -> Option<Provenance> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "from")
        .and_then(|(_, value)| Provenance::parse(value))
}
