use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use imgschema_core::config::{RunConfig, load_config};
use imgschema_core::export::ExportCache;
use imgschema_core::generate::{
    GenerateOptions, GenerateProgressCallback, build_page_schema, execute_generation,
};
use imgschema_core::input::{UrlSource, collect_urls};
use imgschema_core::report::generate_summary_report;
use imgschema_scanner::ImageExtractor;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` directives win; otherwise `warn`, or `debug` with `-v`.
pub fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

pub fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), verbose))
        .with_writer(io::stderr)
        .init();
}

/// Pick the URL source from the `generate` flags. `None` means read stdin.
pub fn url_source_from_args(
    csv: Option<&PathBuf>,
    text: Option<&PathBuf>,
    urls: Vec<String>,
) -> Option<UrlSource> {
    if let Some(path) = csv {
        Some(UrlSource::Csv(path.clone()))
    } else if let Some(path) = text {
        Some(UrlSource::TextFile(path.clone()))
    } else if !urls.is_empty() {
        Some(UrlSource::List(urls))
    } else {
        None
    }
}

/// Config file first, then command-line flags on top.
pub fn build_run_config(args: &ArgMatches) -> Result<RunConfig> {
    let mut config = match args.get_one::<String>("config") {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };

    if let Some(scope) = args.get_one::<String>("scope") {
        config.scope = Some(scope.clone());
    }
    if let Some(deny) = args.get_many::<String>("deny") {
        config.deny_substrings = Some(deny.cloned().collect());
    }
    if args.get_flag("no-alt-prefix") {
        config.alt_prefix = Some(String::new());
    } else if let Some(prefix) = args.get_one::<String>("alt-prefix") {
        config.alt_prefix = Some(prefix.clone());
    }

    // Only `generate` carries the HTTP flags
    if args.try_contains_id("mobile-crawler").unwrap_or(false) {
        if args.get_flag("mobile-crawler") {
            config.mobile_crawler = Some(true);
        }
        if let Some(ua) = args.get_one::<String>("user-agent") {
            config.user_agent = Some(ua.clone());
        }
        if let Some(secs) = args.get_one::<u64>("timeout") {
            config.timeout_secs = Some(*secs);
        }
    }

    Ok(config)
}

pub async fn handle_generate(args: &ArgMatches, quiet: bool) {
    if let Err(e) = run_generate(args, quiet).await {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run_generate(args: &ArgMatches, quiet: bool) -> Result<()> {
    let urls: Vec<String> = args
        .get_many::<String>("url")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let source = match url_source_from_args(
        args.get_one::<PathBuf>("csv"),
        args.get_one::<PathBuf>("text"),
        urls,
    ) {
        Some(source) => source,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read URLs from stdin")?;
            UrlSource::Text(text)
        }
    };

    let urls = collect_urls(&source)?;
    if urls.is_empty() {
        if !quiet {
            eprintln!("{} No URLs to process, nothing to do.", "→".blue());
        }
        return Ok(());
    }

    let config = build_run_config(args)?;
    debug!("Effective config: {:?}", config);
    let rules = config.rules();
    let fetch = config.fetch_options();
    let to_stdout = args.get_flag("stdout");
    let no_progress = args.get_flag("no-progress");

    if !quiet {
        eprintln!("\n{} Generating image schemas for {} page(s)", "→".blue(), urls.len());
        eprintln!("User-Agent: {}", fetch.user_agent);
        eprintln!("Timeout: {}s", fetch.timeout_secs);
        eprintln!(
            "Scope: {}",
            rules.scope.as_deref().unwrap_or("whole page")
        );
        eprintln!("Deny-list: {:?}\n", rules.deny_substrings);
    }

    let show_progress_bars = !quiet && !no_progress;
    // Plain progress lines only when the bar is off
    let progress_callback: Option<GenerateProgressCallback> = if show_progress_bars || quiet {
        None
    } else {
        Some(Arc::new(|msg: String| {
            eprintln!("{}", msg);
        }))
    };

    let options = GenerateOptions {
        urls,
        fetch,
        rules,
        fail_fast: args.get_flag("fail-fast"),
        show_progress_bars,
    };
    let generation = execute_generation(options, progress_callback).await?;

    let date = chrono::Local::now().date_naive();
    let mut cache = ExportCache::new();
    let export = generation.export(&mut cache, date)?;

    let output = args
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));
    let saved = export
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if to_stdout {
        let again = generation.export(&mut cache, date)?;
        let mut stdout = io::stdout().lock();
        stdout.write_all(&again.bytes)?;
        stdout.flush()?;
    }

    if !quiet {
        let report = generate_summary_report(&generation);
        eprint!("\n{}", report);
        eprintln!(
            "\n{} Saved {} row(s) to {} ({})",
            "✓".green().bold(),
            generation.rows().len(),
            saved.display().to_string().bright_white(),
            export.mime
        );
    }

    Ok(())
}

pub fn handle_extract(args: &ArgMatches) {
    match run_extract(args) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Build the JSON-LD for a saved page without touching the network.
pub fn run_extract(args: &ArgMatches) -> Result<String> {
    let file = args
        .get_one::<PathBuf>("HTML_FILE")
        .context("Missing HTML file")?;
    let url = args.get_one::<String>("url").context("Missing --url")?;

    let html = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let config = build_run_config(args)?;
    let extractor = ImageExtractor::new(config.rules())?;
    let schema = build_page_schema(url, &html, &extractor);

    Ok(schema.to_json_ld()?)
}
