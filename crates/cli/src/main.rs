mod echo;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use blogmerge_core::{Aggregator, EscapeMode, JsConfig, PipelineConfig, ScriptTarget, dump_pages};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

use crate::echo::{format_size, print_banner, print_info, print_step, print_success, print_summary, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Merge a Blogger Atom export and a folder of Medium posts into one dataset file
#[derive(Parser, Debug)]
#[command(name = "blogmerge")]
#[command(author = "Blogmerge Contributors")]
#[command(version)]
#[command(about = "Merge blog exports into one front-end dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract feed and folder posts into a single `{title, content, link}` dataset
    Export(ExportArgs),
    /// Dump the whole visible text of every page in a folder
    Pages(PagesArgs),
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Atom feed export
    #[arg(long, default_value = "blogger_export.xml", value_name = "FILE")]
    feed: PathBuf,

    /// Folder of exported HTML posts
    #[arg(long, default_value = "posts", value_name = "DIR")]
    posts: PathBuf,

    /// Output file
    #[arg(short, long, default_value = "blogger_export.js", value_name = "FILE")]
    output: PathBuf,

    /// Identifier the dataset is assigned to
    #[arg(long = "var", default_value = "postsData", value_name = "NAME")]
    variable: String,

    /// Permalink prefix feed entries must match
    #[arg(long, default_value = blogmerge_core::feed::DEFAULT_FEED_PREFIX, value_name = "URL")]
    feed_prefix: String,

    /// Permalink prefix folder posts must carry in their footer
    #[arg(long, default_value = blogmerge_core::folder::DEFAULT_LINK_PREFIX, value_name = "URL")]
    link_prefix: String,

    /// Target script (hant, tw, hk, none)
    #[arg(long, default_value = "hant", value_name = "SCRIPT")]
    script: ScriptTarget,

    /// Do not read the feed export
    #[arg(long)]
    skip_feed: bool,

    /// Do not report feed titles without a year
    #[arg(long)]
    no_year_check: bool,

    /// Escape non-ASCII characters in the output
    #[arg(long)]
    ascii: bool,
}

#[derive(Args, Debug)]
struct PagesArgs {
    /// Folder of HTML pages
    #[arg(long, default_value = "posts", value_name = "DIR")]
    posts: PathBuf,

    /// Output file
    #[arg(short, long, default_value = "posts_data.js", value_name = "FILE")]
    output: PathBuf,

    /// Identifier the dataset is assigned to
    #[arg(long = "var", default_value = "postsData", value_name = "NAME")]
    variable: String,

    /// Keep non-ASCII characters unescaped
    #[arg(long)]
    unicode: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_export(args: ExportArgs, verbose: bool) -> anyhow::Result<()> {
    let config = PipelineConfig::builder()
        .feed_path(args.feed)
        .posts_dir(args.posts)
        .output_path(args.output)
        .variable(args.variable)
        .feed_prefix(args.feed_prefix)
        .link_prefix(args.link_prefix)
        .script(args.script)
        .include_feed(!args.skip_feed)
        .check_title_year(!args.no_year_check)
        .escape(if args.ascii { EscapeMode::Ascii } else { EscapeMode::Preserve })
        .build();

    let aggregator = Aggregator::new(config).context("Invalid export configuration")?;
    let config = aggregator.config();

    if verbose {
        if config.include_feed {
            print_step(1, 3, &format!("Reading feed {}", config.feed_path.display().bright_white()));
        } else {
            print_warning("Feed source disabled");
        }
        print_step(2, 3, &format!("Scanning folder {}", config.posts_dir.display().bright_white()));
        eprintln!("  {} {}", "Script:".dimmed(), config.script.to_string().bright_white());
        print_step(3, 3, &format!("Writing {}", config.output_path.display().bright_white()));
        eprintln!();
    }

    let summary = aggregator
        .run()
        .with_context(|| format!("Failed to write output file: {}", config.output_path.display()))?;

    if verbose && let Ok(meta) = fs::metadata(&summary.output) {
        eprintln!("  {} {}", "Size:".dimmed(), format_size(meta.len()).bright_white());
    }

    print_summary(&summary);
    Ok(())
}

fn run_pages(args: PagesArgs, verbose: bool) -> anyhow::Result<()> {
    let js = JsConfig {
        variable: args.variable,
        escape: if args.unicode { EscapeMode::Preserve } else { EscapeMode::Ascii },
    };

    if verbose {
        print_step(1, 1, &format!("Dumping pages from {}", args.posts.display().bright_white()));
    }

    let extraction = dump_pages(&args.posts, &args.output, &js)
        .with_context(|| format!("Failed to dump pages from {}", args.posts.display()))?;

    print_success(&format!(
        "Generated {} with {} posts",
        args.output.display().bright_white(),
        extraction.len()
    ));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    match cli.command {
        Commands::Export(args) => run_export(args, cli.verbose),
        Commands::Pages(args) => run_pages(args, cli.verbose),
    }
}
