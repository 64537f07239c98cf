use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cineshelf", version, about = "Terminal movie catalog over the TMDB API")]
pub struct Cli {
    #[arg(long, global = true, help = "Directory holding the favorites file")]
    pub data_dir: Option<String>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive browsing session (the default)
    Browse,
    /// Print the home view and exit
    Home,
    /// Print the now playing listing and exit
    NowPlaying,
    /// Print the popular listing and exit
    Popular,
    /// Print the top rated listing and exit
    TopRated,
    /// Print one movie's detail view and exit
    Movie {
        id: u64,
        #[arg(long, help = "Listing this movie was reached from (display only)")]
        from: Option<String>,
    },
    /// Manage saved favorites without touching the network
    Favorites {
        #[command(subcommand)]
        command: Option<FavoritesCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommands {
    /// Print saved movie ids in insertion order
    List,
    Add { id: u64 },
    Remove { id: u64 },
}
