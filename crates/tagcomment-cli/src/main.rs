mod config;

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use tagcomment_core::{
    ActionOutcome, EditorAction, EditorDocument, EditorRope, PlainEditor, Position, TagSpan,
    UndoableBuffer, execute_action, locate_comment, locate_tag,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::Config;

#[derive(Parser)]
#[command(version, about = "Comment out or restore the HTML/XML tag at a cursor position", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a KDL config file
    #[arg(long, global = true, env = "TAGCOMMENT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Uncomment the commented tag at the cursor, or comment out the live one
    Toggle(Target),
    /// Comment out the tag at the cursor
    Comment(Target),
    /// Restore the commented-out tag at the cursor
    Uncomment(Target),
    /// Print the tag spans found at the cursor without editing
    Locate(Target),
}

#[derive(Args)]
struct Target {
    /// HTML or XML file to edit
    file: PathBuf,

    /// Cursor line (1-based)
    #[arg(long, short)]
    line: NonZeroUsize,

    /// Cursor column in characters (1-based)
    #[arg(long, short)]
    column: NonZeroUsize,

    /// Write the result back to the file
    #[arg(long, conflicts_with = "stdout")]
    in_place: bool,

    /// Print the result to stdout, even if the config says in-place
    #[arg(long)]
    stdout: bool,
}

impl Target {
    fn position(&self) -> Position {
        Position::new(self.line.get() - 1, self.column.get() - 1)
    }

    fn in_place(&self, config: &Config) -> bool {
        if self.stdout {
            false
        } else {
            self.in_place || config.in_place
        }
    }
}

fn main() -> Result<()> {
    init_miette();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    init_tracing(&config.log_level);

    let (action, target) = match &cli.command {
        Commands::Toggle(target) => (EditorAction::ToggleTagComment, target),
        Commands::Comment(target) => (EditorAction::CommentTag, target),
        Commands::Uncomment(target) => (EditorAction::UncommentTag, target),
        Commands::Locate(target) => return locate(target),
    };

    let source = std::fs::read_to_string(&target.file).into_diagnostic()?;
    let buffer = UndoableBuffer::new(EditorRope::from(source), 1);
    let mut editor = PlainEditor::with_cursor(buffer, target.position());

    let outcome = execute_action(&mut editor, &action)?;
    report(&outcome);

    if target.in_place(&config) {
        write_back(&target.file, &editor.content_string())?;
    } else {
        print!("{}", editor.content_string());
    }

    Ok(())
}

fn locate(target: &Target) -> Result<()> {
    let source = std::fs::read_to_string(&target.file).into_diagnostic()?;
    let rope = EditorRope::from(source);
    let position = target.position();

    if let Some(comment) = locate_comment(&rope, position) {
        println!("commented <{}>", comment.tag_name);
        for c in comment.spans() {
            println!("  {}  {}", format_span(&c.span), c.inner);
        }
        return Ok(());
    }

    let tag = locate_tag(&rope, position)?.ok_or(tagcomment_core::ToggleError::NoTagAtCursor)?;
    let kind = if tag.is_self_closing() {
        "self-closing"
    } else {
        "live"
    };
    println!("{kind} <{}>", tag.tag_name);
    for span in tag.spans() {
        println!("  {}", format_span(span));
    }
    Ok(())
}

/// 1-based `line:col-col`, the way editors display it.
fn format_span(span: &TagSpan) -> String {
    format!(
        "{}:{}-{}",
        span.line + 1,
        span.start_char + 1,
        span.end_char + 1
    )
}

fn summary(outcome: &ActionOutcome) -> Option<String> {
    match outcome {
        ActionOutcome::Commented { tag_name, edits, .. } => Some(format!(
            "Commented out <{tag_name}> ({} edit(s))",
            edits.len()
        )),
        ActionOutcome::Uncommented { tag_name, edits, .. } => {
            Some(format!("Restored <{tag_name}> ({} edit(s))", edits.len()))
        }
        ActionOutcome::CursorMoved(_) | ActionOutcome::History(_) => None,
    }
}

fn report(outcome: &ActionOutcome) {
    if let Some(line) = summary(outcome) {
        eprintln!("{line}");
    }
    for edit in outcome.edits() {
        tracing::debug!(%edit, "edit");
    }
}

fn write_back(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).into_diagnostic()?;
    tracing::info!(path = %path.display(), "wrote file");
    Ok(())
}

fn init_tracing(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .with_filter(env_filter);

    tracing_subscriber::registry().with(console_layer).init();
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}
