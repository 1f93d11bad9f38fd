use anyhow::{Context, Result};
use clap::Parser;
use hypermark::app::{App, OutputConfig};
use hypermark::bytemark;
use hypermark::hackernews::{self, Article};
use hypermark::output::{self, OutputError, OutputTarget};
use hypermark::selection;
use hypermark::services::clipboard::Clipboard;
use hypermark::services::tracing_setup;
use hypermark::{hyperpaths, urlmode};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Save HackerNews articles as markdown-table bytemarks
#[derive(Parser, Debug)]
#[command(name = "hypermark")]
#[command(about = "Save HackerNews articles and ad-hoc URLs as bytemarks", long_about = None)]
#[command(version)]
struct Args {
    /// Output file (default: hyperpath[0] from the ./hyperpaths registry)
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Save articles with this keyword in the title, without prompting
    #[arg(short, long, value_name = "KEYWORD", conflicts_with = "show")]
    keyword: Option<String>,

    /// Overwrite the target file instead of appending to the end
    #[arg(short, long)]
    overwrite: bool,

    /// Show all articles and exit
    #[arg(short, long)]
    show: bool,

    /// Write output to stdout instead of a file
    #[arg(short = 'p', long = "stdout")]
    to_stdout: bool,

    /// Write output to the system clipboard
    #[arg(short, long)]
    clipboard: bool,

    /// Create a bytemark from the URL on the system clipboard
    #[arg(short, long)]
    url_mode: bool,

    /// Open the interactive menu
    #[arg(short, long)]
    interactive: bool,

    /// Path to log file for diagnostics (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args
        .log_file
        .clone()
        .unwrap_or_else(tracing_setup::default_log_path);
    tracing_setup::init_global(&log_path);

    match run(args) {
        Ok(()) => Ok(()),
        // Declining a confirmation is a clean exit, not a failure.
        Err(e) if is_abort(&e) => Ok(()),
        Err(e) => Err(e),
    }
}

fn is_abort(e: &anyhow::Error) -> bool {
    matches!(e.downcast_ref::<OutputError>(), Some(OutputError::Aborted))
}

fn run(args: Args) -> Result<()> {
    let registry = PathBuf::from(hyperpaths::REGISTRY_PATH);
    let mut clipboard = Clipboard::new();

    // Show mode never writes, so skip target resolution (and its prompts).
    if args.show {
        let articles = hackernews::scrape_front_page()?;
        show_articles(&articles);
        return Ok(());
    }

    let target = resolve_target(&args, &registry)?;

    if args.interactive {
        return run_menu(args, registry, target, clipboard);
    }

    if args.url_mode {
        let record = urlmode::capture_from_clipboard(&mut clipboard)?;
        let written_to = output::write(&target, &record.to_table(), &mut clipboard)?;
        println!("Saved '{}' to {}.", record.title, written_to);
        return Ok(());
    }

    let articles = hackernews::scrape_front_page()?;

    if let Some(keyword) = &args.keyword {
        save_by_keyword(&articles, keyword, &target, &mut clipboard)
    } else {
        prompt_and_save(&articles, &target, &mut clipboard)
    }
}

/// Resolve where output goes, running the first-run hyperpath[0] setup
/// when the registry default is about to be used.
fn resolve_target(args: &Args, registry: &Path) -> Result<OutputTarget> {
    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout();

    if args.file.is_none() && !args.to_stdout && !args.clipboard {
        ensure_main_hyperpath(registry, &mut stdin, &mut stdout)?;
    }
    Ok(output::choose_output(
        args.file.as_deref(),
        args.overwrite,
        args.to_stdout,
        args.clipboard,
        registry,
        &mut stdin,
        &mut stdout,
    )?)
}

/// Make sure hyperpath[0] exists, prompting for it on first run.
fn ensure_main_hyperpath(
    registry: &Path,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    hyperpaths::ensure_registry(registry)?;
    match hyperpaths::load(registry) {
        Ok(paths) if !paths.is_empty() => return Ok(()),
        Ok(_) => {}
        Err(hyperpaths::HyperpathError::NoHyperpaths) => {}
        Err(e) => return Err(e.into()),
    }

    writeln!(out, "No hyperpath[0] specified.")?;
    write!(out, "Would you like to set it now? Y/n: ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    if answer.trim().eq_ignore_ascii_case("n") {
        writeln!(out, "Exiting program.")?;
        return Err(OutputError::Aborted.into());
    }

    loop {
        write!(out, "Enter hyperpath[0]: ")?;
        out.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        let path = hyperpaths::expand_tilde(line.trim());
        if Path::new(&path).is_file() {
            hyperpaths::change_nth(registry, &path, 0)?;
            return Ok(());
        }
        writeln!(out, "\nInvalid file path: {path}")?;
    }
}

fn run_menu(
    args: Args,
    registry: PathBuf,
    target: OutputTarget,
    clipboard: Clipboard,
) -> Result<()> {
    let output = OutputConfig {
        explicit: args.file,
        to_stdout: args.to_stdout,
        to_clipboard: args.clipboard,
        registry,
    };
    let mut app = App::new(output, target, clipboard);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}

fn comment_line(article: &Article) -> String {
    match &article.comment_url {
        Some(url) => format!("Comments: {url}"),
        None => "No comments.".to_string(),
    }
}

fn show_articles(articles: &[Article]) {
    for (i, article) in articles.iter().enumerate() {
        println!(
            "{}. {}\n{}\n{}\n",
            i + 1,
            article.title,
            article.story_url,
            comment_line(article),
        );
    }
}

/// Convert all articles to records and keep those whose title matches.
fn keyword_records(articles: &[Article], keyword: &str) -> Vec<bytemark::Bytemark> {
    articles
        .iter()
        .map(hackernews::article_to_bytemark)
        .filter(|b| b.title_contains(keyword))
        .collect()
}

fn save_by_keyword(
    articles: &[Article],
    keyword: &str,
    target: &OutputTarget,
    clipboard: &mut Clipboard,
) -> Result<()> {
    println!("Searching for articles with '{keyword}' in the title.");

    let records = keyword_records(articles, keyword);
    let written_to = output::write(target, &bytemark::bytemarks_to_tables(&records), clipboard)?;
    println!("{} articles found. Writing output to {}.", records.len(), written_to);
    Ok(())
}

/// The scripted default: list titles, read a selection line, save.
fn prompt_and_save(
    articles: &[Article],
    target: &OutputTarget,
    clipboard: &mut Clipboard,
) -> Result<()> {
    for (i, article) in articles.iter().enumerate() {
        println!("{} {}", i + 1, article.title);
    }
    println!("\nArticles to save: (eg: 1 2 3, 1-3)");

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading selection")?;

    let selections = selection::parse_selections(line.trim_end_matches('\n'), articles.len())?;
    let records: Vec<_> = selections
        .iter()
        .filter_map(|&sel| articles.get(sel - 1))
        .map(hackernews::article_to_bytemark)
        .collect();

    let written_to = output::write(target, &bytemark::bytemarks_to_tables(&records), clipboard)?;
    println!("{} articles written to {}.", records.len(), written_to);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            story_url: format!("https://example.com/{title}"),
            comment_url: None,
        }
    }

    #[test]
    fn test_keyword_records_filters_case_insensitively() {
        let articles = vec![article("Rust 1.90 released"), article("Go generics")];
        let records = keyword_records(&articles, "RUST");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Rust 1.90 released");
        assert_eq!(records[0].rows, vec!["No comments."]);
    }

    #[test]
    fn test_keyword_records_no_match_is_empty() {
        let articles = vec![article("Go generics")];
        assert!(keyword_records(&articles, "rust").is_empty());
    }
}
