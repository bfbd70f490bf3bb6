//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use library_client::BorrowEndpointMode;

/// Command-line client for the online library management service.
///
/// Sign in once with `login`; the session is kept in the per-user config
/// directory and restored (and re-verified) on every later invocation.
#[derive(Parser, Debug)]
#[command(name = "library-client")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// API base URL (overrides config file and LIBRARY_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Endpoint family for return/renew: by-id or legacy
    #[arg(long, global = true, value_name = "MODE")]
    pub borrow_endpoints: Option<BorrowEndpointMode>,

    /// Config file path (default: ~/.config/library-client/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Session file path (default: ~/.config/library-client/session.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in and store the session
    Login {
        /// Username or email
        identifier: String,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Create an account
    Register {
        username: String,
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Change the password of the signed-in user
    Passwd {
        /// Current password (read from stdin when omitted)
        #[arg(long)]
        old_password: Option<String>,
        /// New password (read from stdin when omitted)
        #[arg(long)]
        new_password: Option<String>,
    },
    /// Browse the catalog
    Books {
        #[command(subcommand)]
        command: BooksCommand,
    },
    /// Borrow a copy, or the first available copy of a book
    Borrow(BorrowTarget),
    /// Return a loan by borrow id
    Return { borrow_id: i64 },
    /// Renew a loan by borrow id
    Renew { borrow_id: i64 },
    /// List current loans
    Loans(PageArgs),
    /// List borrow history
    History(PageArgs),
    /// Fees
    Fees {
        #[command(subcommand)]
        command: FeesCommand,
    },
    /// Favorites
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },
    /// Reservations
    Reservations {
        #[command(subcommand)]
        command: ReservationsCommand,
    },
    /// Load the statistics dashboard (sections fail independently)
    Dashboard,
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

impl Command {
    /// Commands that work without a restored session.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        matches!(
            self,
            Self::Login { .. }
                | Self::Logout
                | Self::Register { .. }
                | Self::Books { .. }
                | Self::Config { .. }
        )
    }
}

#[derive(ClapArgs, Debug, Clone, PartialEq, Eq)]
pub struct PageArgs {
    /// Zero-based page index
    #[arg(long, default_value_t = 0)]
    pub page: u32,

    /// Page size
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub size: u32,
}

#[derive(ClapArgs, Debug, Clone, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct BorrowTarget {
    /// Copy id to borrow
    #[arg(long)]
    pub copy: Option<i64>,

    /// Book id; the first available copy is borrowed
    #[arg(long)]
    pub book: Option<i64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BooksCommand {
    /// Search the catalog
    Search {
        /// Free-text keyword
        keyword: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        language: Option<String>,
        /// Only titles with an available copy
        #[arg(long)]
        available: bool,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one book
    Show { book_id: i64 },
    /// List copies of a book
    Copies { book_id: i64 },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FeesCommand {
    /// List my fees
    List(PageArgs),
    /// Pay a fee
    Pay { fee_id: i64 },
    /// Show the backend's fee estimate for a loan
    Calculate { borrow_id: i64 },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum FavoritesCommand {
    /// List my favorites
    List(PageArgs),
    /// Add a book to favorites
    Add { book_id: i64 },
    /// Remove a book from favorites
    Remove { book_id: i64 },
    /// Check whether a book is a favorite
    Check { book_id: i64 },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ReservationsCommand {
    /// List my reservations
    List(PageArgs),
    /// Reserve a book
    Create { book_id: i64 },
    /// Cancel a reservation
    Cancel { reservation_id: i64 },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_login_parses_identifier() {
        let args = Args::try_parse_from(["library-client", "login", "alice"]).unwrap();
        assert_eq!(
            args.command,
            Command::Login {
                identifier: "alice".to_string(),
                password: None
            }
        );
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["library-client", "-v", "whoami"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["library-client", "whoami", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["library-client", "--quiet", "logout"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_borrow_requires_exactly_one_target() {
        let args = Args::try_parse_from(["library-client", "borrow", "--book", "3"]).unwrap();
        assert_eq!(
            args.command,
            Command::Borrow(BorrowTarget {
                copy: None,
                book: Some(3)
            })
        );

        let err = Args::try_parse_from(["library-client", "borrow"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let err = Args::try_parse_from(["library-client", "borrow", "--copy", "1", "--book", "2"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_cli_loans_paging_defaults_and_bounds() {
        let args = Args::try_parse_from(["library-client", "loans"]).unwrap();
        assert_eq!(args.command, Command::Loans(PageArgs { page: 0, size: 10 }));

        let err = Args::try_parse_from(["library-client", "loans", "--size", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_borrow_endpoints_flag() {
        let args = Args::try_parse_from([
            "library-client",
            "--borrow-endpoints",
            "legacy",
            "return",
            "42",
        ])
        .unwrap();
        assert_eq!(args.borrow_endpoints, Some(BorrowEndpointMode::Legacy));
        assert_eq!(args.command, Command::Return { borrow_id: 42 });

        let err = Args::try_parse_from(["library-client", "--borrow-endpoints", "x", "logout"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_books_search_flags() {
        let args = Args::try_parse_from([
            "library-client",
            "books",
            "search",
            "dune",
            "--available",
            "--size",
            "5",
        ])
        .unwrap();
        let Command::Books {
            command: BooksCommand::Search {
                keyword,
                available,
                page,
                ..
            },
        } = args.command
        else {
            panic!("expected books search");
        };
        assert_eq!(keyword.as_deref(), Some("dune"));
        assert!(available);
        assert_eq!(page.size, 5);
    }

    #[test]
    fn test_cli_anonymous_commands() {
        assert!(Command::Logout.is_anonymous());
        assert!(!Command::Whoami.is_anonymous());
        assert!(!Command::Dashboard.is_anonymous());
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["library-client", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_missing_subcommand_is_error() {
        let result = Args::try_parse_from(["library-client"]);
        assert!(result.is_err());
    }
}
