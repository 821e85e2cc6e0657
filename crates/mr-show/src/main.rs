use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use mr_client::{comments_from_discussions, load_changes, load_discussions};
use mr_config::AppConfig;
use mr_diff_render::{
    parse_unified_diff, render_diff, CommentIndex, DiffView, FileDiff, RenderOptions,
};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

mod logger;

#[derive(Parser, Debug)]
#[command(name = "mr-show")]
#[command(about = "Print a merge request diff with its review discussions inline")]
#[command(version)]
#[command(group(ArgGroup::new("input").required(true).args(["diff", "changes"])))]
struct Args {
    /// Commit SHA printed above each file (defaults to the SHA in --changes)
    #[arg(long, required_unless_present = "changes")]
    commit: Option<String>,

    /// Unified diff to render, or "-" for stdin
    #[arg(long, value_name = "FILE")]
    diff: Option<PathBuf>,

    /// Merge request changes as exported JSON
    #[arg(long, value_name = "FILE")]
    changes: Option<PathBuf>,

    /// Discussions as exported JSON
    #[arg(long, value_name = "FILE")]
    discussions: Option<PathBuf>,

    /// Only print the lines leading up to each thread, N rows of context
    #[arg(long, value_name = "N", num_args = 0..=1)]
    excerpts: Option<Option<usize>>,

    /// Print the author on "commented at" lines
    #[arg(long)]
    show_author: bool,

    /// Config file to use instead of .mr-show.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    logger::init();
    let args = Args::parse();

    log::info!("Starting mr-show");

    let output = run(&args)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("Failed to write output")?;
    stdout.flush()?;

    Ok(())
}

fn run(args: &Args) -> Result<String> {
    let config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    let options = render_options(&config, args);
    if !options.has_valid_timestamp_format() {
        bail!("Invalid timestamp_format: {:?}", options.timestamp_format);
    }

    let (commit, files) = load_files(args)?;

    let comments = match &args.discussions {
        Some(path) => comments_from_discussions(&load_discussions(path)?),
        None => Vec::new(),
    };
    let index = CommentIndex::build(comments);

    for (anchor, thread) in index.orphaned(&files) {
        log::debug!(
            "{} comment(s) at {}:{}:{} are outside the diff",
            thread.len(),
            anchor.path,
            anchor.side.as_str(),
            anchor.line
        );
    }

    Ok(render_diff(&commit, &files, &index, &options))
}

/// Config values with command-line flags applied on top
fn render_options(config: &AppConfig, args: &Args) -> RenderOptions {
    let mut options = config.render_options();

    if let Some(context) = args.excerpts {
        options.view = DiffView::Excerpts {
            context: context.unwrap_or(config.excerpt_context),
        };
    }
    if args.show_author {
        options.show_author = true;
    }

    options
}

/// Commit SHA and parsed files from either --diff or --changes
fn load_files(args: &Args) -> Result<(String, Vec<FileDiff>)> {
    if let Some(path) = &args.changes {
        let changes = load_changes(path)?;
        let files = changes.file_diffs()?;
        let commit = args.commit.clone().unwrap_or(changes.sha);
        return Ok((commit, files));
    }

    let (Some(path), Some(commit)) = (&args.diff, &args.commit) else {
        bail!("Either --changes or both --diff and --commit are required");
    };
    let text = read_diff(path)?;
    let files = parse_unified_diff(&text)
        .with_context(|| format!("Failed to parse diff: {}", path.display()))?;
    log::info!("Parsed {} file(s) from {}", files.len(), path.display());

    Ok((commit.clone(), files))
}

fn read_diff(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read diff from stdin")?;
        return Ok(text);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read diff file: {}", path.display()))
}
