use crate::pages::{HomeData, PageState};
use crate::routes::Provenance;
use crate::tmdb::{MovieDetail, MovieSummary, POSTER_BASE};
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;
use std::fmt::Write;

const OVERVIEW_SNIPPET: usize = 120;

/// Year component of a TMDB release date. Absent, empty, and malformed
/// dates all yield no year.
pub fn release_year(date: Option<&str>) -> Option<i32> {
    let date = date?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

pub fn poster_url(path: &str) -> String {
    format!("{POSTER_BASE}{path}")
}

pub fn vote_badge(vote: f64) -> String {
    format!("{vote:.1}")
}

pub fn summary_line(movie: &MovieSummary, color: bool) -> String {
    let year = release_year(movie.release_date.as_deref())
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());
    let title = if color {
        movie.title.bold().to_string()
    } else {
        movie.title.clone()
    };
    format!(
        "{:>8}  {}  ({})  * {}",
        movie.id,
        title,
        year,
        vote_badge(movie.vote_average)
    )
}

pub fn movie_list(heading: &str, movies: &[MovieSummary], color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", heading_line(heading, color));
    if movies.is_empty() {
        let _ = writeln!(out, "  No movies to show.");
        return out;
    }
    for movie in movies {
        let _ = writeln!(out, "{}", summary_line(movie, color));
        let snippet = truncate(&movie.overview, OVERVIEW_SNIPPET);
        if !snippet.is_empty() {
            let _ = writeln!(out, "          {snippet}");
        }
    }
    out
}

pub fn detail_block(
    movie: &MovieDetail,
    is_favorite: bool,
    from: Option<Provenance>,
    color: bool,
) -> String {
    let mut out = String::new();
    let title = if color {
        movie.title.bold().to_string()
    } else {
        movie.title.clone()
    };
    let marker = if is_favorite { "  [favorite]" } else { "" };
    let _ = writeln!(out, "{title}{marker}");

    let year = release_year(movie.release_date.as_deref())
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());
    let mut facts = format!("{year}  * {}", vote_badge(movie.vote_average));
    if let Some(runtime) = movie.runtime {
        let _ = write!(facts, "  {runtime} min");
    }
    let _ = write!(facts, "  {}", movie.original_language.to_uppercase());
    let _ = writeln!(out, "{facts}");

    if !movie.genres.is_empty() {
        let names: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
        let _ = writeln!(out, "{}", names.join(", "));
    }
    if !movie.overview.is_empty() {
        let _ = writeln!(out, "\n{}", movie.overview);
    }
    if let Some(path) = movie.poster_path.as_deref() {
        let _ = writeln!(out, "\nPoster: {}", poster_url(path));
    }
    if let Some(from) = from {
        let _ = writeln!(out, "Navigated from: {}", from.as_str());
    }
    out
}

pub fn home_page(state: &PageState<HomeData>, color: bool) -> String {
    match state {
        PageState::Loading => loading_line("Home"),
        PageState::Error(message) => error_line(message, color),
        PageState::Loaded(data) => {
            let mut out = String::new();
            out.push_str(&movie_list("Now Playing", &data.now_playing, color));
            out.push('\n');
            out.push_str(&movie_list("Popular", &data.popular, color));
            out.push('\n');
            out.push_str(&movie_list("Top Rated", &data.top_rated, color));
            out
        }
    }
}

pub fn listing_page(heading: &str, state: &PageState<Vec<MovieSummary>>, color: bool) -> String {
    match state {
        PageState::Loading => loading_line(heading),
        PageState::Error(message) => error_line(message, color),
        PageState::Loaded(movies) => movie_list(heading, movies, color),
    }
}

pub fn detail_page(
    movie: &PageState<MovieDetail>,
    related: &PageState<Vec<MovieSummary>>,
    is_favorite: bool,
    from: Option<Provenance>,
    color: bool,
) -> String {
    let mut out = match movie {
        PageState::Loading => loading_line("Movie"),
        PageState::Error(message) => error_line(message, color),
        PageState::Loaded(detail) => detail_block(detail, is_favorite, from, color),
    };
    match related {
        PageState::Loading => {}
        PageState::Error(message) => {
            out.push('\n');
            out.push_str(&error_line(message, color));
        }
        PageState::Loaded(movies) if movies.is_empty() => {}
        PageState::Loaded(movies) => {
            out.push('\n');
            out.push_str(&movie_list("Top Rated Movies", movies, color));
        }
    }
    out
}

pub fn favorites_page(state: &PageState<Vec<MovieDetail>>, color: bool) -> String {
    match state {
        PageState::Loading => loading_line("My Favorites"),
        PageState::Error(message) => error_line(message, color),
        PageState::Loaded(movies) => {
            let mut out = String::new();
            let _ = writeln!(out, "{}", heading_line("My Favorites", color));
            if movies.is_empty() {
                let _ = writeln!(out, "  No favorites yet.");
                return out;
            }
            for movie in movies {
                let summary = MovieSummary {
                    id: movie.id,
                    title: movie.title.clone(),
                    overview: movie.overview.clone(),
                    poster_path: movie.poster_path.clone(),
                    vote_average: movie.vote_average,
                    release_date: movie.release_date.clone(),
                };
                let _ = writeln!(out, "{}", summary_line(&summary, color));
            }
            out
        }
    }
}

pub fn loading_line(heading: &str) -> String {
    format!("{heading}\n  loading...\n")
}

pub fn error_line(message: &str, color: bool) -> String {
    if color {
        format!("{}\n", message.red())
    } else {
        format!("{message}\n")
    }
}

fn heading_line(heading: &str, color: bool) -> String {
    if color {
        format!("== {} ==", heading.bold())
    } else {
        format!("== {heading} ==")
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}
