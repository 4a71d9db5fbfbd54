//! Command dispatch

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::{generate, Generator};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{Document, ProjectSummary};
use crate::cli::args::{Cli, Commands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::NodeRef;
use crate::infrastructure::{DocumentLoader, RealFileSystem};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.skip_blank_lines {
        settings.parser.skip_blank_lines = true;
    }
    debug!(?settings, "effective settings");
    let loader = DocumentLoader::new(Arc::new(RealFileSystem), settings.parser.clone());

    match &cli.command {
        Some(Commands::Tree {
            file,
            depth,
            no_values,
        }) => _tree(&loader, &settings, file, *depth, *no_values),
        Some(Commands::Query {
            file,
            node_type,
            name,
            recursive,
            first,
            last,
        }) => _query(
            &loader,
            file,
            node_type,
            name.as_deref(),
            *recursive,
            *first,
            *last,
        ),
        Some(Commands::Get { file, path }) => _get(&loader, file, path),
        Some(Commands::Media { file, missing }) => _media(&loader, file, *missing),
        Some(Commands::Info { files }) => _info(&loader, files),
        Some(Commands::Config) => _config(&settings),
        Some(Commands::Completion { shell }) => {
            print_completions(*shell, &mut Cli::command());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

fn print_completions<G: Generator>(gen: G, cmd: &mut clap::Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

#[instrument(skip(loader, settings))]
fn _tree(
    loader: &DocumentLoader,
    settings: &Settings,
    file: &Path,
    depth: Option<usize>,
    no_values: bool,
) -> CliResult<()> {
    let doc = loader.load(file)?;
    let max_depth = depth.or(settings.display.max_depth);
    let show_values = settings.display.show_values && !no_values;
    output::info(&output::render_tree(&doc.root(), max_depth, show_values));
    warn_if_unbalanced(&doc);
    Ok(())
}

/// Select nodes for the `query` command.
///
/// Without `name` or `recursive`, `first`/`last` pick a direct child of the
/// root. Otherwise they keep the first or last match of the wider search.
pub fn select_nodes<'a>(
    root: &NodeRef<'a>,
    node_type: &str,
    name: Option<&str>,
    recursive: bool,
    first: bool,
    last: bool,
) -> Vec<NodeRef<'a>> {
    let mut found = match (name, first, last) {
        (Some(name), true, _) if recursive => {
            return root.find_by_type_and_name(node_type, name).into_iter().collect()
        }
        (None, true, _) if !recursive => {
            return root.first_child_of_type(node_type).into_iter().collect()
        }
        (None, _, true) if !recursive => {
            return root.last_child_of_type(node_type).into_iter().collect()
        }
        (Some(name), _, _) => root.children_of_type_and_name(node_type, name, recursive),
        (None, _, _) => root.all_children_of_type(node_type, recursive),
    };
    if first {
        found.truncate(1);
    } else if last {
        found = found.pop().into_iter().collect();
    }
    found
}

#[instrument(skip(loader))]
fn _query(
    loader: &DocumentLoader,
    file: &Path,
    node_type: &str,
    name: Option<&str>,
    recursive: bool,
    first: bool,
    last: bool,
) -> CliResult<()> {
    let doc = loader.load(file)?;
    let root = doc.root();
    let found = select_nodes(&root, node_type, name, recursive, first, last);
    if found.is_empty() {
        return Err(CliError::NotFound(match name {
            Some(name) => format!("{} named {:?}", node_type, name),
            None => node_type.to_string(),
        }));
    }
    for node in found {
        let path = std::iter::successors(Some(node), |n| n.parent())
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .map(|n| n.node_type())
            .join("/");
        output::info(&format!("{}: {}", path, output::node_label(&node, true)));
    }
    Ok(())
}

#[instrument(skip(loader))]
fn _get(loader: &DocumentLoader, file: &Path, path: &str) -> CliResult<()> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return Err(CliError::InvalidArgs(format!("empty type path: {:?}", path)));
    }
    let doc = loader.load(file)?;
    let node = doc
        .root()
        .path(&segments)
        .ok_or_else(|| CliError::NotFound(path.to_string()))?;
    output::info(&node.values().join(" "));
    Ok(())
}

#[instrument(skip(loader))]
fn _media(loader: &DocumentLoader, file: &Path, missing: bool) -> CliResult<()> {
    let doc = loader.load(file)?;
    for media in doc.media_references() {
        let exists = media.resolved.is_file();
        if missing && exists {
            continue;
        }
        let label = format!(
            "{} / {}: {}",
            media.track.as_deref().unwrap_or("-"),
            media.item.as_deref().unwrap_or("-"),
            media.resolved.display()
        );
        if exists {
            output::success_detail(&label);
        } else {
            output::failure(&label);
        }
    }
    Ok(())
}

#[instrument(skip(loader))]
fn _info(loader: &DocumentLoader, files: &[std::path::PathBuf]) -> CliResult<()> {
    let mut first_error = None;
    for (file, result) in files.iter().zip(loader.load_all(files)) {
        match result {
            Ok(doc) => print_summary(file, &doc),
            Err(e) => {
                output::error(&format!("{}: {}", file.display(), e));
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }
    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

fn print_summary(file: &Path, doc: &Document) {
    let summary = ProjectSummary::from_document(doc);
    output::header(&file.display());
    if let Some(cursor) = summary.cursor {
        output::detail(&format!("cursor: {}", cursor));
    }
    if let Some(tempo) = summary.tempo {
        match (tempo.numerator, tempo.denominator) {
            (Some(num), Some(den)) => {
                output::detail(&format!("tempo: {} bpm, {}/{}", tempo.bpm, num, den))
            }
            _ => output::detail(&format!("tempo: {} bpm", tempo.bpm)),
        }
    }
    output::detail(&format!(
        "tracks: {}, items: {}",
        summary.tracks.len(),
        summary.item_count()
    ));
    for track in &summary.tracks {
        let names = track
            .items
            .iter()
            .map(|i| i.name.as_deref().unwrap_or("-"))
            .join(", ");
        output::detail(&format!(
            "  {} [{}]",
            track.name.as_deref().unwrap_or("-"),
            names
        ));
    }
    warn_if_unbalanced(doc);
}

fn _config(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn warn_if_unbalanced(doc: &Document) {
    let stats = doc.stats();
    if !stats.is_balanced() {
        output::warning(&format!(
            "unbalanced blocks: {} opened, {} closed",
            stats.opened, stats.closed
        ));
    }
}
