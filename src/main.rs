use anyhow::Result;
use cineshelf::app::{self, Session};
use cineshelf::cli::{Cli, Commands, FavoritesCommands};
use cineshelf::favorites::{resolve_data_dir, FavoritesStore, JsonFavoritesStore};
use cineshelf::routes::{Provenance, Route};
use cineshelf::tmdb::{TmdbApi, TmdbClient};
use clap::Parser;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Logs go to stderr so they never interleave with rendered views.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let dotenv_result = dotenv();
    init_tracing();
    match dotenv_result {
        Ok(path) => debug!("Loaded environment from {:?}", path),
        Err(e) => debug!("No .env file loaded ({}) - relying on environment", e),
    }

    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    let store: Arc<dyn FavoritesStore> = Arc::new(JsonFavoritesStore::open(&data_dir)?);
    let color = std::io::stdout().is_terminal();

    let command = cli.command.unwrap_or(Commands::Browse);
    if let Commands::Favorites { command } = command {
        run_favorites(store.as_ref(), command)?;
        return Ok(ExitCode::SUCCESS);
    }

    let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::from_env()?);
    let route = match command {
        Commands::Browse => {
            Session::new(tmdb, store, color).run().await?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Home => Route::Home,
        Commands::NowPlaying => Route::NowPlaying,
        Commands::Popular => Route::Popular,
        Commands::TopRated => Route::TopRated,
        Commands::Movie { id, from } => Route::Movie {
            id,
            from: from.as_deref().and_then(Provenance::parse),
        },
        Commands::Favorites { .. } => unreachable!("handled above"),
    };

    let ok = app::run_route(tmdb, store, route, color).await?;
    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_favorites(store: &dyn FavoritesStore, command: Option<FavoritesCommands>) -> Result<()> {
    match command.unwrap_or(FavoritesCommands::List) {
        FavoritesCommands::List => {
            for id in store.favorites() {
                println!("{id}");
            }
        }
        FavoritesCommands::Add { id } => {
            store.add_favorite(id)?;
            println!("Added {id} to favorites.");
        }
        FavoritesCommands::Remove { id } => {
            store.remove_favorite(id)?;
            println!("Removed {id} from favorites.");
        }
    }
    Ok(())
}
