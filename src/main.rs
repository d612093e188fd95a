//! Tagtree CLI application entry point
//!
//! A command-line front end over a sled-backed tag tree.
//!
//! # Usage
//!
//! ```bash
//! # Build a small hierarchy
//! tagtree add work
//! tagtree add work/clients -n kickoff.md
//!
//! # Collapse and print it
//! tagtree collapse work
//! tagtree show
//!
//! # Ask which tag a note would select
//! tagtree infer notebooks/journal --favorite --active TRASH
//!
//! # Point notebook inference at a different root tag
//! tagtree config set notebooks=Notebooks
//! ```
//!
//! # Configuration
//!
//! Configuration is read from the user's config directory
//! (`~/.config/tagtree/config.toml` on Linux). Set `RUST_LOG=debug` to trace
//! tree mutations.

use std::io::{self, Write};
use std::path::Path;

use tagtree::{
    MutationOutcome, TagNode, TagSession, TagTree, TagtreeError,
    cli::{Cli, CliNote, Commands, ConfigCommands},
    config::TagtreeConfig,
    path,
    store::{SledStore, TreeStore},
};

type Result<T> = std::result::Result<T, TagtreeError>;

/// Report a mutation outcome to the user
fn report(outcome: MutationOutcome, action: &str, tag: &str, quiet: bool) {
    match outcome {
        MutationOutcome::Applied if !quiet => println!("{action}: {tag}"),
        MutationOutcome::Applied => {}
        MutationOutcome::ParentMissing => eprintln!("Parent of '{tag}' does not exist, nothing changed"),
        MutationOutcome::Unchanged => eprintln!("'{tag}' not found, nothing changed"),
    }
}

/// Handle the move command
///
/// The target parent is checked up front: `replace` deletes before adding, so
/// a missing target parent would otherwise drop the subtree.
///
/// # Errors
///
/// Returns `TagtreeError` if the source is missing, the target is empty,
/// already exists or lies inside the source, the target parent is missing,
/// or the store fails.
fn handle_move<S: TreeStore>(session: &TagSession<S>, from: &str, to: &str, quiet: bool) -> Result<()> {
    let tree = session.tree()?;
    let node = tree
        .get(from)
        .ok_or_else(|| TagtreeError::InvalidInput(format!("Tag '{from}' does not exist")))?;

    if path::name(to).is_empty() {
        return Err(TagtreeError::InvalidInput(format!("Invalid target tag '{to}'")));
    }
    if to == from || path::is_descendant(to, from) {
        return Err(TagtreeError::InvalidInput(format!("Cannot move '{from}' into itself")));
    }
    if tree.contains(to) {
        return Err(TagtreeError::InvalidInput(format!("Tag '{to}' already exists")));
    }
    if !tree.contains(path::parent(to).unwrap_or_default()) {
        return Err(TagtreeError::InvalidInput(format!("Parent of '{to}' does not exist")));
    }

    let outcome = session.replace(node, node.rebased(to))?;
    report(outcome, "Moved", to, quiet);
    Ok(())
}

/// Render the subtree below `root` as an indented list, skipping children of collapsed tags
fn render(tree: &TagTree, root: &str) -> Vec<String> {
    fn walk(tags: &tagtree::tree::Tags, depth: usize, lines: &mut Vec<String>) {
        for node in tags.values() {
            let marker = match (node.has_children(), node.collapsed) {
                (false, _) => " ",
                (true, true) => "▸",
                (true, false) => "▾",
            };
            let notes = if node.notes.is_empty() {
                String::new()
            } else {
                format!(" ({})", node.notes.len())
            };
            lines.push(format!("{}{marker} {}{notes}", "  ".repeat(depth), node.name));

            if !node.collapsed {
                walk(&node.tags, depth + 1, lines);
            }
        }
    }

    let mut lines = Vec::new();
    if let Some(tags) = tree.tags(root) {
        walk(tags, 0, &mut lines);
    }
    lines
}

/// Print rendered lines to stdout
///
/// # Errors
///
/// Returns `TagtreeError::IoError` if stdout cannot be written (e.g. a closed pipe).
fn print_lines(lines: &[String]) -> Result<()> {
    let mut out = io::stdout().lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

/// Handle the config command
///
/// Changes are written to `path`, or to the default config file.
///
/// # Errors
///
/// Returns `TagtreeError` if the key or value is invalid, or the file cannot be saved.
fn handle_config_command(
    mut config: TagtreeConfig,
    path: Option<&Path>,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = setting.split_once('=').ok_or_else(|| {
                TagtreeError::InvalidInput("Invalid format. Use: tagtree config set key=value".into())
            })?;
            let (key, value) = (key.trim(), value.trim());

            config.set(key, value)?;
            match path {
                Some(path) => config.save_to(path)?,
                None => config.save()?,
            }
            tracing::debug!(key, value, "config saved");
            if !quiet {
                println!("Set {key} = {value}");
            }
        }
        ConfigCommands::Get { key } => println!("{}", config.get(key)?),
    }
    Ok(())
}

/// Handle the infer command
///
/// # Errors
///
/// Returns `TagtreeError` if the store fails.
fn handle_infer<S: TreeStore>(session: &mut TagSession<S>, note: &CliNote, active: &str) -> Result<()> {
    session.set_active(active)?;
    if !session.infer_for_note(Some(note))? {
        tracing::debug!("selection kept");
    }
    println!("{}", session.active());
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => TagtreeConfig::load_from(path)?,
        None => TagtreeConfig::load()?,
    };
    let quiet = cli.quiet || config.quiet;

    if let Commands::Config { command } = &cli.command {
        return handle_config_command(config, cli.config.as_deref(), command, quiet);
    }

    let db_path = match cli.db {
        Some(path) => path,
        None => config.database_path()?,
    };
    let store = SledStore::open(&db_path)?;
    tracing::debug!(db = %db_path.display(), "store opened");

    let mut session = TagSession::new(store).with_scopes(config.scopes);

    match cli.command {
        Commands::Add { path, notes } => {
            let outcome = session.add(TagNode::new(path.as_str()).with_notes(notes))?;
            report(outcome, "Added", &path, quiet);
        }
        Commands::Delete { path } => {
            let outcome = session.delete(&TagNode::new(path.as_str()))?;
            report(outcome, "Deleted", &path, quiet);
        }
        Commands::Move { from, to } => handle_move(&session, &from, &to, quiet)?,
        Commands::Collapse { path, expand } => {
            if path.is_empty() || !session.tree()?.contains(&path) {
                return Err(TagtreeError::InvalidInput(format!("Tag '{path}' does not exist")));
            }
            let outcome = session.toggle_collapse(&path, Some(!expand))?;
            report(outcome, if expand { "Expanded" } else { "Collapsed" }, &path, quiet);
        }
        Commands::Show { path } => {
            let root = path.unwrap_or_default();
            let tree = session.tree()?;
            if !tree.contains(&root) {
                return Err(TagtreeError::InvalidInput(format!("Tag '{root}' does not exist")));
            }
            let lines = render(&tree, &root);
            if lines.is_empty() && !quiet {
                println!("No tags");
            }
            print_lines(&lines)?;
        }
        Commands::Infer { tags, favorite, deleted, active } => {
            let note = CliNote { tags, favorite, deleted };
            handle_infer(&mut session, &note, &active)?;
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_args();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
