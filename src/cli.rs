//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for scatch using the `clap`
//! crate.
//!
//! # Commands
//!
//! - **browse**: Full-screen gallery with infinite scroll (default)
//! - **search** / **curated**: Print pages of results
//! - **show**: Print one photo
//! - **proxy**: Forward one proxy query and print the JSON answer
//! - **history**: Recent searches
//! - **album** / **favorite**: Local library
//! - **layout**: Print the column assignment for a width
//! - **config**: Read and write settings
//! - **completions**: Generate shell completion scripts
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use scatch::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["scatch", "search", "mountain lake", "-o", "portrait"]);
//! assert!(matches!(cli.get_command(), Commands::Search { .. }));
//! ```

use crate::api::{FeedQuery, Orientation};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "scatch")]
#[command(about = "Search stock photos and browse them in a column gallery", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the gallery (default)
    #[command(visible_alias = "b")]
    Browse {
        /// Search query; curated photos when omitted
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Orientation filter
        #[arg(short = 'o', long = "orientation", default_value = "all")]
        orientation: Orientation,
    },

    /// Search photos and print the results
    #[command(visible_alias = "s")]
    Search {
        /// Search query
        #[arg(value_name = "QUERY")]
        query: String,

        /// Orientation filter
        #[arg(short = 'o', long = "orientation", default_value = "all")]
        orientation: Orientation,

        /// Number of pages to fetch
        #[arg(short = 'p', long = "pages", default_value_t = 1)]
        pages: u32,
    },

    /// Print curated photos
    Curated {
        /// Orientation filter
        #[arg(short = 'o', long = "orientation", default_value = "all")]
        orientation: Orientation,

        /// Number of pages to fetch
        #[arg(short = 'p', long = "pages", default_value_t = 1)]
        pages: u32,
    },

    /// Show one photo by id
    Show {
        /// Photo id
        id: u64,

        /// Open the full-size image in the default viewer
        #[arg(long = "open")]
        open: bool,
    },

    /// Forward one query through the image proxy and print the response
    Proxy {
        /// Endpoint name (curated, search, photos/<id>)
        #[arg(short = 'e', long = "endpoint", value_name = "NAME")]
        endpoint: Option<String>,

        /// Page number
        #[arg(short = 'p', long = "page", value_name = "N")]
        page: Option<String>,

        /// Search query
        #[arg(short = 'Q', long = "query", value_name = "TEXT")]
        query: Option<String>,

        /// Orientation filter
        #[arg(short = 'o', long = "orientation", value_name = "ORIENTATION")]
        orientation: Option<String>,
    },

    /// Recent searches
    History {
        #[command(subcommand)]
        command: Option<HistoryCommands>,
    },

    /// Manage albums
    Album {
        #[command(subcommand)]
        command: AlbumCommands,
    },

    /// Manage favorites
    #[command(visible_alias = "fav")]
    Favorite {
        #[command(subcommand)]
        command: FavoriteCommands,
    },

    /// Print the column assignment for a container width
    Layout {
        /// Container width
        #[arg(short = 'w', long = "width")]
        width: u32,

        /// Number of images
        #[arg(short = 'n', long = "count")]
        count: usize,

        /// Minimum column width (overrides config)
        #[arg(short = 'm', long = "min-column-width")]
        min_column_width: Option<u32>,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Search history subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryCommands {
    /// List recent searches, newest first (default)
    #[command(visible_alias = "ls")]
    List,

    /// Forget all recent searches
    Clear,
}

/// Album subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AlbumCommands {
    /// List albums with their image counts
    #[command(visible_alias = "ls")]
    List,

    /// Print one page of an album
    Show {
        /// Album name
        name: String,

        /// Page number
        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page: u32,
    },

    /// Save a photo to an album (fetched by id)
    Save {
        /// Album name
        name: String,

        /// Photo id
        id: u64,
    },

    /// Remove a photo from an album
    #[command(visible_alias = "rm")]
    Remove {
        /// Album name
        name: String,

        /// Photo id
        id: u64,
    },

    /// Delete an album
    Delete {
        /// Album name
        name: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },
}

/// Favorite subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum FavoriteCommands {
    /// Print one page of favorites
    #[command(visible_alias = "ls")]
    List {
        /// Page number
        #[arg(short = 'p', long = "page", default_value_t = 1)]
        page: u32,
    },

    /// Mark a photo as favorite (fetched by id)
    Add {
        /// Photo id
        id: u64,
    },

    /// Unmark a favorite
    #[command(visible_alias = "rm")]
    Remove {
        /// Photo id
        id: u64,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., ui.card_height=8)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value, or all values when no key is given
    Get {
        /// Configuration key to retrieve (e.g., api_endpoint)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },

    /// Print the config file location
    Path,
}

impl Commands {
    /// Feed a browse/search/curated command pages through
    #[must_use]
    pub fn feed_query(&self) -> Option<FeedQuery> {
        match self {
            Self::Browse {
                query: Some(query),
                orientation,
            }
            | Self::Search {
                query, orientation, ..
            } if !query.trim().is_empty() => Some(FeedQuery::Search {
                query: query.trim().to_string(),
                orientation: *orientation,
            }),
            Self::Browse { orientation, .. } | Self::Curated { orientation, .. } => {
                Some(FeedQuery::Curated {
                    orientation: *orientation,
                })
            }
            _ => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command, defaulting to Browse if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse {
            query: None,
            orientation: Orientation::All,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_browse() {
        let cli = Cli::parse_from(["scatch"]);
        assert!(matches!(
            cli.get_command(),
            Commands::Browse {
                query: None,
                orientation: Orientation::All
            }
        ));
    }

    #[test]
    fn test_search_with_orientation() {
        let cli = Cli::parse_from(["scatch", "search", "cats", "-o", "landscape", "--pages", "3"]);
        match cli.get_command() {
            Commands::Search {
                query,
                orientation,
                pages,
            } => {
                assert_eq!(query, "cats");
                assert_eq!(orientation, Orientation::Landscape);
                assert_eq!(pages, 3);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_orientation_is_rejected() {
        assert!(Cli::try_parse_from(["scatch", "search", "cats", "-o", "diagonal"]).is_err());
    }

    #[test]
    fn test_feed_query() {
        let search = Cli::parse_from(["scatch", "s", "  sea  "]).get_command();
        assert_eq!(search.feed_query(), Some(FeedQuery::search("sea")));

        let browse = Cli::parse_from(["scatch", "browse", "-o", "square"]).get_command();
        assert_eq!(
            browse.feed_query(),
            Some(FeedQuery::Curated {
                orientation: Orientation::Square
            })
        );

        let blank = Cli::parse_from(["scatch", "browse", " "]).get_command();
        assert_eq!(blank.feed_query(), Some(FeedQuery::curated()));

        let layout = Cli::parse_from(["scatch", "layout", "-w", "900", "-n", "5"]).get_command();
        assert_eq!(layout.feed_query(), None);
    }

    #[test]
    fn test_proxy_args_are_raw() {
        let cli = Cli::parse_from(["scatch", "proxy", "-e", "search", "-p", "2", "-Q", "owl"]);
        match cli.get_command() {
            Commands::Proxy {
                endpoint,
                page,
                query,
                orientation,
            } => {
                assert_eq!(endpoint.as_deref(), Some("search"));
                assert_eq!(page.as_deref(), Some("2"));
                assert_eq!(query.as_deref(), Some("owl"));
                assert_eq!(orientation, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_history_defaults_to_none() {
        let cli = Cli::parse_from(["scatch", "history"]);
        assert!(matches!(cli.command, Some(Commands::History { command: None })));
    }

    #[test]
    fn test_album_save() {
        let cli = Cli::parse_from(["scatch", "album", "save", "trips", "42"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Album {
                command: AlbumCommands::Save { ref name, id: 42 }
            }) if name == "trips"
        ));
    }

    #[test]
    fn test_quiet_is_global() {
        let cli = Cli::parse_from(["scatch", "album", "list", "-q"]);
        assert!(cli.quiet);
    }
}
