use cineshelf::routes::{Provenance, Route};

#[test]
fn parses_bare_view_names() {
    assert_eq!(Route::parse("home"), Some(Route::Home));
    assert_eq!(Route::parse("now-playing"), Some(Route::NowPlaying));
    assert_eq!(Route::parse("popular"), Some(Route::Popular));
    assert_eq!(Route::parse("top-rated"), Some(Route::TopRated));
    assert_eq!(Route::parse("favorites"), Some(Route::Favorites));
}

#[test]
fn parses_path_forms() {
    assert_eq!(Route::parse("/"), Some(Route::Home));
    assert_eq!(Route::parse("/popular"), Some(Route::Popular));
    assert_eq!(Route::parse("/my-favorites"), Some(Route::Favorites));
    assert_eq!(
        Route::parse("/movie/27205"),
        Some(Route::Movie {
            id: 27205,
            from: None
        })
    );
}

#[test]
fn parses_provenance_query() {
    assert_eq!(
        Route::parse("/movie/27205?from=popular"),
        Some(Route::Movie {
            id: 27205,
            from: Some(Provenance::Popular)
        })
    );
    assert_eq!(
        Route::parse("/movie/550?from=now-playing"),
        Some(Route::Movie {
            id: 550,
            from: Some(Provenance::NowPlaying)
        })
    );
}

#[test]
fn unknown_provenance_parses_to_none() {
    assert_eq!(
        Route::parse("/movie/27205?from=elsewhere"),
        Some(Route::Movie {
            id: 27205,
            from: None
        })
    );
}

#[test]
fn other_query_keys_are_ignored() {
    assert_eq!(
        Route::parse("/movie/27205?lang=en&from=top-rated"),
        Some(Route::Movie {
            id: 27205,
            from: Some(Provenance::TopRated)
        })
    );
}

#[test]
fn rejects_garbage() {
    assert_eq!(Route::parse("movies"), None);
    assert_eq!(Route::parse("/movie/abc"), None);
    assert_eq!(Route::parse("/movie/"), None);
    assert_eq!(Route::parse("/unknown"), None);
}

#[test]
fn path_round_trips() {
    let routes = [
        Route::Home,
        Route::NowPlaying,
        Route::Popular,
        Route::TopRated,
        Route::Favorites,
        Route::Movie {
            id: 27205,
            from: None,
        },
        Route::Movie {
            id: 27205,
            from: Some(Provenance::Popular),
        },
    ];
    for route in routes {
        assert_eq!(Route::parse(&route.path()), Some(route));
    }
}
