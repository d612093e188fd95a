//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for tagtree using the `clap` crate.
//!
//! # Commands
//!
//! - **add**: Create a tag under an existing parent
//! - **delete**: Remove a tag and its subtree
//! - **move**: Move a tag (and its subtree) to a new path
//! - **collapse**: Collapse or expand a tag
//! - **show**: Print the tree, honouring collapsed tags
//! - **infer**: Print which tag a note would select
//! - **config**: Read or change configuration values

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::session::{PseudoTag, TaggedNote};

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "tagtree")]
#[command(about = "A hierarchical tag tree for notes", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database directory to use (overrides config)
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Config file to read instead of the default one
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a tag; its parent must already exist
    Add {
        /// Full tag path (e.g., work/clients/acme)
        path: String,

        /// Notes to file under the tag (can specify multiple: -n a.md -n b.md)
        #[arg(short = 'n', long = "note", value_name = "NOTE")]
        notes: Vec<String>,
    },

    /// Remove a tag together with its subtree
    #[command(visible_alias = "rm")]
    Delete {
        /// Tag path to remove
        path: String,
    },

    /// Move a tag and its subtree to a new path
    #[command(visible_alias = "mv")]
    Move {
        /// Current tag path
        from: String,

        /// New tag path; its parent must exist
        to: String,
    },

    /// Collapse a tag (or expand it with --expand)
    Collapse {
        /// Tag path
        path: String,

        /// Expand instead of collapsing
        #[arg(short = 'e', long = "expand")]
        expand: bool,
    },

    /// Print the tag tree
    #[command(visible_alias = "ls")]
    Show {
        /// Only print the subtree below this tag
        path: Option<String>,
    },

    /// Print the selection a note with the given properties would produce
    Infer {
        /// Tags carried by the note
        #[arg(value_name = "TAG")]
        tags: Vec<String>,

        /// The note is favorited
        #[arg(long = "favorite")]
        favorite: bool,

        /// The note is in the trash
        #[arg(long = "deleted")]
        deleted: bool,

        /// Selection before the note was picked
        #[arg(long = "active", value_name = "TAG", default_value = PseudoTag::Default.as_str())]
        active: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., templates=Templates)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., notebooks)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// A note described on the command line
#[derive(Debug, Clone, Default)]
pub struct CliNote {
    pub tags: Vec<String>,
    pub favorite: bool,
    pub deleted: bool,
}

impl TaggedNote for CliNote {
    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn is_favorited(&self) -> bool {
        self.favorite
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_notes() {
        let cli = Cli::try_parse_from(["tagtree", "add", "work/acme", "-n", "a.md", "-n", "b.md"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Add {
                path: "work/acme".to_string(),
                notes: vec!["a.md".to_string(), "b.md".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["tagtree", "rm", "work", "--db", "/tmp/db", "-q"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/db")));
        assert_eq!(cli.command, Commands::Delete { path: "work".to_string() });
    }

    #[test]
    fn test_parse_infer_defaults() {
        let cli = Cli::try_parse_from(["tagtree", "infer", "templates/x", "--favorite"]).unwrap();
        match cli.command {
            Commands::Infer { tags, favorite, deleted, active } => {
                assert_eq!(tags, vec!["templates/x".to_string()]);
                assert!(favorite);
                assert!(!deleted);
                assert_eq!(active, "DEFAULT");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_collapse_expand() {
        let cli = Cli::try_parse_from(["tagtree", "collapse", "work", "--expand"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Collapse { path: "work".to_string(), expand: true }
        );
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from(["tagtree", "config", "set", "quiet=true"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Set { setting: "quiet=true".to_string() },
            }
        );
    }

    #[test]
    fn test_cli_note() {
        let note = CliNote {
            tags: vec!["a".to_string()],
            favorite: true,
            deleted: false,
        };
        assert!(note.is_favorited());
        assert!(!note.is_deleted());
        assert_eq!(note.tags_in_scope("a"), vec!["a"]);
    }
}
