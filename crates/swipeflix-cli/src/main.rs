use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use commands::{browse, clear, config, details, explore, news, search, swipe, watchlist};
use std::path::PathBuf;
use swipeflix_config::PathManager;
use swipeflix_models::{MovieCategory, ShowCategory};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "swipeflix")]
#[command(about = "SwipeFlix - Swipe through movies and shows, keep the ones you like")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr
    /// (defaults to the data directory when PATH is omitted)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List movies from a category
    #[command(long_about = "Fetch several pages of a movie category concurrently, merge them without duplicates and print the result. Order is shuffled unless --no-shuffle is given.")]
    Movies {
        /// Category: top-rated, popular or latest (defaults to the configured one)
        #[arg(long, value_parser = parse_movie_category)]
        category: Option<MovieCategory>,

        #[command(flatten)]
        list: ListArgs,
    },
    /// List TV shows from a category
    Shows {
        /// Category: popular or top-rated (defaults to the configured one)
        #[arg(long, value_parser = parse_show_category)]
        category: Option<ShowCategory>,

        #[command(flatten)]
        list: ListArgs,
    },
    /// Top-rated titles and one row per genre
    Explore,
    /// Search movies and shows
    Search {
        /// Search text
        query: String,
    },
    /// Latest headlines from the configured news feeds
    News {
        /// Only fetch these feeds this time (repeatable, case-insensitive)
        #[arg(long = "source", value_name = "NAME")]
        sources: Vec<String>,

        #[command(subcommand)]
        cmd: Option<NewsCommands>,
    },
    /// Budget, revenue, cast, trailer and logo of one title
    Details {
        #[arg(long, value_name = "ID", conflicts_with = "show", required_unless_present = "show")]
        movie: Option<u64>,

        #[arg(long, value_name = "ID")]
        show: Option<u64>,
    },
    /// Swipe through a card stack; liked cards go to the watchlist
    #[command(long_about = "Load a card stack and decide on each card interactively. Liking a movie or show saves it to the watchlist. Ad cards are interleaved unless ads are removed in the configuration.")]
    Swipe {
        #[arg(long, value_enum, default_value = "movies")]
        kind: SwipeKind,

        /// Category of the chosen kind (defaults to the configured one)
        #[arg(long)]
        category: Option<String>,
    },
    /// Show or edit the saved watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear stored data
    #[command(long_about = "Clear the saved watchlist, the stored credentials, or both.")]
    Clear {
        /// Clear watchlist and credentials
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear the saved watchlist
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        /// Clear stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Args, Clone, Copy)]
pub struct ListArgs {
    /// Number of pages to fetch (defaults to the configured value)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10))]
    pages: Option<u32>,

    /// Keep page order instead of shuffling
    #[arg(long, action = ArgAction::SetTrue)]
    no_shuffle: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SwipeKind {
    Movies,
    Shows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Movie,
    Show,
}

#[derive(Subcommand)]
pub enum NewsCommands {
    /// Show or change which feeds are fetched by default
    Sources {
        #[command(subcommand)]
        cmd: Option<SourcesCommands>,
    },
}

#[derive(Subcommand)]
pub enum SourcesCommands {
    /// List configured feeds and the saved selection
    List,
    /// Fetch only these feeds from now on
    Set {
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,
    },
    /// Fetch every configured feed again
    Reset,
}

#[derive(Subcommand)]
pub enum WatchlistCommands {
    /// List saved movies and shows
    List,
    /// Search and save the first matching title
    Add {
        query: String,

        /// Restrict the match to movies or shows
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Remove a saved title by id
    Remove {
        #[arg(long, value_name = "ID", conflicts_with = "show", required_unless_present = "show")]
        movie: Option<u64>,

        #[arg(long, value_name = "ID")]
        show: Option<u64>,
    },
    /// Remove everything from the watchlist
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store the TMDB API key in the credentials file
    SetApiKey {
        /// API key (if not provided, will prompt)
        #[arg(long)]
        key: Option<String>,
    },
}

fn parse_movie_category(s: &str) -> Result<MovieCategory, String> {
    s.parse()
}

fn parse_show_category(s: &str) -> Result<ShowCategory, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = logging::resolve_log_file(cli.log_file.clone(), &PathManager::default());
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Movies { category, list } => browse::run_movies(category, list, &output).await,
        Commands::Shows { category, list } => browse::run_shows(category, list, &output).await,
        Commands::Explore => explore::run_explore(&output).await,
        Commands::Search { query } => search::run_search(&query, &output).await,
        Commands::News { sources, cmd } => match cmd {
            Some(NewsCommands::Sources { cmd }) => {
                news::run_sources(cmd.unwrap_or(SourcesCommands::List), &output)
            }
            None => news::run_news(&sources, &output).await,
        },
        Commands::Details { movie, show } => details::run_details(movie, show, &output).await,
        Commands::Swipe { kind, category } => swipe::run_swipe(kind, category, &output).await,
        Commands::Watchlist { cmd } => {
            let cmd = cmd.unwrap_or(WatchlistCommands::List);
            watchlist::run_watchlist(cmd, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(cmd, &output).await
        }
        Commands::Clear { all, watchlist, credentials } => {
            clear::run_clear(all, watchlist, credentials, &output).await
        }
    }
}
