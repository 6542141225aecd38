use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};
use std::fs;
use std::path::PathBuf;

use hilite::category;
use hilite::engine::BUILTIN_CONTEXT;
use hilite::{
    BlankLinePolicy, BuiltinEngine, CollectorOptions, LanguageMap, TokenCollector, TokenPair,
};

#[derive(Parser)]
#[command(name = "hilite")]
#[command(author, version, about = "Classify source code into highlighting tokens", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// One token per line (default)
    #[value(name = "plain")]
    Plain,
    /// JSON array of {token_type, text} objects
    #[value(name = "json")]
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a source file
    Tokens {
        /// The source file to scan
        input: PathBuf,

        /// Language selector (e.g. py, c)
        #[arg(short, long)]
        lang: String,

        /// Search context to resolve the language in
        #[arg(short, long, default_value = BUILTIN_CONTEXT)]
        context: String,

        /// Extra language map, registered under the search context name
        #[arg(long)]
        lang_map: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "plain")]
        format: OutputFormat,

        /// Token type for categories missing from the category table
        #[arg(long, default_value = category::DEFAULT_TOKEN_TYPE)]
        default_type: String,

        /// Do not emit a token for the line break of an empty line
        #[arg(long)]
        skip_blank_lines: bool,
    },

    /// List the language selectors of a search context
    Languages {
        /// Search context to list
        #[arg(short, long, default_value = BUILTIN_CONTEXT)]
        context: String,

        /// Extra language map, registered under the search context name
        #[arg(long)]
        lang_map: Option<PathBuf>,
    },

    /// List the category table
    Categories,
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = match cli.command {
        Commands::Tokens {
            input,
            lang,
            context,
            lang_map,
            format,
            default_type,
            skip_blank_lines,
        } => {
            let options = CollectorOptions {
                default_token_type: default_type,
                blank_lines: if skip_blank_lines {
                    BlankLinePolicy::Skip
                } else {
                    BlankLinePolicy::Carrier
                },
                ..CollectorOptions::default()
            };
            tokens(input, &lang, &context, lang_map, format, options)
        }
        Commands::Languages { context, lang_map } => languages(&context, lang_map),
        Commands::Categories => categories(),
    };

    if let Err(e) = result {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Builtin engine, with `lang_map` merged into `context` when given.
fn build_engine(context: &str, lang_map: Option<PathBuf>) -> Result<BuiltinEngine> {
    let mut engine = BuiltinEngine::default();
    if let Some(path) = lang_map {
        let extra = LanguageMap::load(&path)
            .with_context(|| format!("Failed to load language map: {:?}", path))?;
        let mut map = engine.context(context).cloned().unwrap_or_default();
        map.extend(extra);
        log::debug!("registered {} selectors under '{}'", map.len(), context);
        engine.add_context(context, map);
    }
    Ok(engine)
}

fn tokens(
    input: PathBuf,
    lang: &str,
    context: &str,
    lang_map: Option<PathBuf>,
    format: OutputFormat,
    options: CollectorOptions,
) -> Result<()> {
    log::info!("Scanning {:?} as {}", input, lang);

    let source = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read source file: {:?}", input))?;
    let engine = build_engine(context, lang_map)?;
    let collector = TokenCollector::with_options(engine, options);
    let stream = collector.collect(&source, lang, context)?;

    match format {
        OutputFormat::Plain => {
            for pair in &stream {
                println!("{}\t{:?}", paint(pair), pair.text);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(stream.as_slice())?);
        }
    }
    Ok(())
}

fn paint(pair: &TokenPair) -> ColoredString {
    let token_type = pair.token_type.as_str();
    match category::root(token_type) {
        "Keyword" => token_type.magenta().bold(),
        "Literal" => token_type.green(),
        "Comment" => token_type.bright_black(),
        "Name" => token_type.cyan(),
        "Operator" | "Punctuation" => token_type.yellow(),
        "Error" => token_type.red().bold(),
        _ => token_type.normal(),
    }
}

fn languages(context: &str, lang_map: Option<PathBuf>) -> Result<()> {
    let engine = build_engine(context, lang_map)?;
    let map = engine
        .context(context)
        .with_context(|| format!("Unknown search context: {}", context))?;
    for (selector, grammar) in map.selectors() {
        println!("{} = {}", selector, grammar);
    }
    Ok(())
}

fn categories() -> Result<()> {
    for (internal, public) in category::entries() {
        println!("{:<40} {}", internal, public);
    }
    Ok(())
}
