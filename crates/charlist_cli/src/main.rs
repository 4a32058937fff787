//! Command-line driver for the charlist core.
//!
//! # Responsibility
//! - Wire a SQLite-backed session from config and flags.
//! - Expose overlay mutations and the derived list view as subcommands.
//! - Stand in for the remote catalog with a JSON file.

use anyhow::{bail, Context, Result};
use charlist_core::storage::open_store;
use charlist_core::{
    init_logging, CharacterView, CoreConfig, EmptyState, ParameterState, Session,
    SqliteKeyValueStore, SqliteSlot, StaticCatalog, ViewOutcome,
};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "charlist")]
#[command(about = "Browse a character catalog with local favorites, hides and comments", long_about = None)]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    /// SQLite file holding overlay data.
    #[arg(long)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Toggle favorite membership of a character
    Favorite { id: String },
    /// Hide a character from every list
    Hide { id: String },
    /// Show a previously hidden character again
    Unhide { id: String },
    /// Manage a character's comment thread
    Comment {
        #[command(subcommand)]
        action: CommentAction,
    },
    /// Print the derived list for a catalog file and query string
    List {
        /// JSON array of characters, in provider order.
        #[arg(long)]
        catalog: PathBuf,
        /// Query string such as `name=smith&filter=starred&sort=asc`.
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Show or dismiss the introductory message
    Welcome {
        #[arg(long)]
        dismiss: bool,
    },
    /// Remove all favorites, hides and comments
    Reset,
}

#[derive(Subcommand)]
enum CommentAction {
    Add { id: String, text: String },
    Edit { id: String, comment_id: String, text: String },
    Delete { id: String, comment_id: String },
    List { id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            bail!("failed to initialize logging: {err}");
        }
    }

    let conn = open_store(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let kv = SqliteKeyValueStore::new(&conn);

    let query = match &cli.command {
        Commands::List { query, .. } => query.as_str(),
        _ => "",
    };
    let mut session: Session<SqliteSlot<'_>> = Session::new(&config, query);
    session.open(kv.slot(&config.overlay_key)?, kv.slot(&config.welcome_key)?);
    info!("event=cli_start module=cli status=ok");

    match cli.command {
        Commands::Favorite { id } => {
            let favorite = session.overlay_mut().toggle_favorite(&id);
            println!("{id} favorite={favorite}");
        }
        Commands::Hide { id } => {
            session.overlay_mut().hide_character(&id);
            println!("{id} hidden");
        }
        Commands::Unhide { id } => {
            if session.overlay_mut().unhide_character(&id) {
                println!("{id} visible");
            } else {
                println!("{id} was not hidden");
            }
        }
        Commands::Comment { action } => run_comment(&mut session, action)?,
        Commands::List { catalog, .. } => {
            let raw = std::fs::read_to_string(&catalog)
                .with_context(|| format!("failed to read `{}`", catalog.display()))?;
            let catalog = StaticCatalog::from_json(&raw)?;
            session.refresh(&catalog);
            print_view(&session)?;
        }
        Commands::Welcome { dismiss } => {
            if dismiss {
                session.welcome().dismiss();
            }
            println!("show_welcome={}", session.welcome().should_show());
        }
        Commands::Reset => {
            session.overlay_mut().reset();
            println!("overlay cleared");
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config = match &cli.config {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn run_comment(session: &mut Session<SqliteSlot<'_>>, action: CommentAction) -> Result<()> {
    let overlay = session.overlay_mut();
    match action {
        CommentAction::Add { id, text } => match overlay.add_comment(&id, &text) {
            Some(comment_id) => println!("{comment_id}"),
            None => bail!("comment text must not be blank"),
        },
        CommentAction::Edit {
            id,
            comment_id,
            text,
        } => {
            if !overlay.edit_comment(&id, &comment_id, &text) {
                bail!("no comment `{comment_id}` on {id}, or the new text is blank");
            }
            println!("{comment_id} updated");
        }
        CommentAction::Delete { id, comment_id } => {
            if !overlay.delete_comment(&id, &comment_id) {
                bail!("no comment `{comment_id}` on {id}");
            }
            println!("{comment_id} deleted");
        }
        CommentAction::List { id } => {
            for comment in overlay.comments_for(&id) {
                println!(
                    "{}\t{}\t{}",
                    comment.id,
                    comment.created_at.to_rfc3339(),
                    comment.text
                );
            }
        }
    }
    Ok(())
}

fn print_view(session: &Session<SqliteSlot<'_>>) -> Result<()> {
    let params = session.params().state();
    match session.view() {
        ViewOutcome::Pending => println!("loading"),
        ViewOutcome::Failed(message) => bail!("error loading characters: {message}"),
        ViewOutcome::Ready(view) => print_ready(session, &view, params),
    }
    Ok(())
}

fn print_ready(
    session: &Session<SqliteSlot<'_>>,
    view: &CharacterView<'_>,
    params: &ParameterState,
) {
    match view.empty_state(params) {
        Some(EmptyState::NoCharacters) => {
            println!("No characters found");
            return;
        }
        Some(EmptyState::NoMatches) => {
            println!("0 Results");
            println!("No matches found for this filter.");
            return;
        }
        None => {}
    }

    if params.has_active_filters() {
        println!("{} Results", view.total());
        let active = params.active_filter_count();
        if active > 0 {
            println!("{active} Filter");
        }
    }

    let overlay = session.overlay();
    for (title, group) in [("Starred", &view.starred), ("Characters", &view.others)] {
        if group.is_empty() {
            continue;
        }
        println!("{title} ({})", group.len());
        for character in group {
            println!(
                "  {}\t{}\t{}\t{}\tcomments={}",
                character.id,
                character.name,
                character.species,
                character.status,
                overlay.comment_count(&character.id)
            );
        }
    }
}
