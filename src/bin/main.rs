use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use tracing::warn;

use naming_core::navigator::Screen;
use naming_core::persistence::{load_cache_or_new, save_cache, JsonRuleStore};
use naming_core::rules::persist_selection;
use naming_core::translation::{CachedTranslator, PhraseTable, TranslationCache, Translator};
use naming_core::{
    EngineConfig, NamingEngine, NamingError, NavigationSession, RuleStore,
    Selection, ShortcutRules, SlotId, TranslationCandidate,
};

/// Turns a phrase into a conventional identifier.
#[derive(Parser)]
#[command(name = "namecraft", version)]
struct Cli {
    /// JSON engine configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Shortcut rule file (defaults to the local data directory)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// JSON phrase → candidates table used before falling back to the phrase itself
    #[arg(long, global = true)]
    phrasebook: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend names for a phrase and pick one interactively
    Suggest {
        phrase: String,
        /// Name of the file being edited, used to guess the variable type
        #[arg(long)]
        context: Option<String>,
        /// Extra translation, optionally with a confidence: TEXT[:CONF]
        #[arg(long = "alt")]
        alternatives: Vec<String>,
    },
    /// Print every style for every variable type
    Grid { phrase: String },
    /// Rewrite text in one style (camelCase, PascalCase, snake_case, ...)
    Convert { style: String, text: String },
    /// Apply the rule bound to a shortcut slot
    Apply { slot: u8, text: String },
    /// List the shortcut slots
    Rules,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    let engine = NamingEngine::new(config)?;

    match &cli.command {
        Commands::Suggest {
            phrase,
            context,
            alternatives,
        } => suggest(&cli, &engine, phrase, context.as_deref(), alternatives)?,
        Commands::Grid { phrase } => print_grid(&engine, phrase)?,
        Commands::Convert { style, text } => {
            println!("{}", engine.convert(text, style)?);
        }
        Commands::Apply { slot, text } => {
            let rules = effective_rules(&rule_store(&cli)?)?;
            println!("{}", engine.apply_slot(&rules, SlotId::new(*slot)?, text)?);
        }
        Commands::Rules => print_rules(&effective_rules(&rule_store(&cli)?)?),
    }

    Ok(())
}

fn rule_store(cli: &Cli) -> anyhow::Result<JsonRuleStore> {
    let path = cli
        .rules
        .clone()
        .or_else(EngineConfig::default_rules_path)
        .ok_or_else(|| anyhow!("no data directory found; pass --rules"))?;
    Ok(JsonRuleStore::new(path))
}

/// Built-in quick styles with the stored rules on top.
fn effective_rules(store: &JsonRuleStore) -> anyhow::Result<ShortcutRules> {
    let stored = store
        .read()
        .with_context(|| format!("reading {}", store.path().display()))?;
    let mut rules = ShortcutRules::quick_styles();
    rules.overlay(&stored);
    Ok(rules)
}

fn load_phrasebook(path: Option<&Path>) -> anyhow::Result<PhraseTable> {
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            let table = serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(table)
        }
        None => Ok(PhraseTable::default()),
    }
}

/// `TEXT[:CONF]`; without a confidence the n-th alternative gets
/// `0.95 - 0.05 * n`.
fn parse_alternative(raw: &str, index: usize) -> TranslationCandidate {
    let default = 0.95 - 0.05 * index as f64;
    match raw.rsplit_once(':') {
        Some((text, conf)) => match conf.trim().parse::<f64>() {
            Ok(conf) => TranslationCandidate::new(text.trim(), conf, "cli"),
            Err(_) => TranslationCandidate::new(raw.trim(), default, "cli"),
        },
        None => TranslationCandidate::new(raw.trim(), default, "cli"),
    }
}

fn suggest(
    cli: &Cli,
    engine: &NamingEngine,
    phrase: &str,
    context: Option<&str>,
    alternatives: &[String],
) -> anyhow::Result<()> {
    let cache_path = EngineConfig::default_cache_path();
    let cache = match &cache_path {
        Some(path) => load_cache_or_new(path, engine.config().cache_capacity),
        None => TranslationCache::new(engine.config().cache_capacity),
    };
    let mut translator = CachedTranslator::new(load_phrasebook(cli.phrasebook.as_deref())?, cache);

    let mut phrase = phrase.to_string();
    let mut extra: Vec<TranslationCandidate> = alternatives
        .iter()
        .enumerate()
        .map(|(i, raw)| parse_alternative(raw, i))
        .collect();

    let session = loop {
        let attempt = translator.translate(&phrase).and_then(|mut translations| {
            translations.append(&mut extra);
            engine.generate_candidates(&phrase, translations, context)
        });
        match attempt {
            Ok(session) => break Some(session),
            Err(e) if e.is_retryable() => {
                println!("{} {}", "warning:".yellow().bold(), e);
                match prompt("Try another phrase (empty to quit): ")? {
                    Some(next) if !next.is_empty() => phrase = next,
                    _ => break None,
                }
            }
            Err(e) => return Err(e.into()),
        }
    };

    if let Some(path) = &cache_path {
        if let Err(e) = save_cache(translator.cache(), path) {
            warn!("Could not save translation cache: {}", e);
        }
    }

    let Some(mut session) = session else {
        return Ok(());
    };
    match run_session(&mut session)? {
        Some(selection) => {
            println!("{}", selection.name.clone().green().bold());
            offer_slot(&mut rule_store(cli)?, &selection)?;
        }
        None => println!("{}", "cancelled".dark_grey()),
    }
    Ok(())
}

/// Drives the funnel until something is picked (`Some`) or the user quits.
fn run_session(session: &mut NavigationSession) -> anyhow::Result<Option<Selection>> {
    while let Some(screen) = session.current_screen() {
        render(session, screen);
        let Some(input) = prompt("> ")? else {
            session.dismiss()?;
            return Ok(None);
        };

        let outcome = match input.as_str() {
            "q" => {
                session.dismiss()?;
                return Ok(None);
            }
            "m" => session.more(),
            "b" => session.back(),
            n => match n.parse::<usize>() {
                Ok(n) if n > 0 => match screen {
                    Screen::CategoryMenu => session.open_category(n - 1),
                    _ => match session.select(n - 1) {
                        Ok(selection) => return Ok(Some(selection)),
                        Err(e) => Err(e),
                    },
                },
                _ => Err(NamingError::InvalidTransition {
                    screen: screen.to_string(),
                    event: n.to_string(),
                }),
            },
        };
        if let Err(e) = outcome {
            println!("{} {}", "error:".red(), e);
        }
    }
    Ok(None)
}

fn render(session: &NavigationSession, screen: Screen) {
    println!();
    match screen {
        Screen::Initial => {
            println!("{} {}", "Recommendations for".bold(), session.original_input());
            print_options(session);
            println!("{}", "[n] pick  [m] more styles  [q] quit".dark_grey());
        }
        Screen::CategoryMenu => {
            println!("{}", "Categories".bold());
            for (i, category) in session.categories().iter().enumerate() {
                let count = session.grid().options(*category).len();
                println!("  {:>2}. {} ({})", i + 1, category.label(), count);
            }
            println!("{}", "[n] open  [b] back  [q] quit".dark_grey());
        }
        Screen::CategoryOptions(category) => {
            println!("{}", category.label().bold());
            print_options(session);
            println!("{}", "[n] pick  [b] back  [q] quit".dark_grey());
        }
    }
}

fn print_options(session: &NavigationSession) {
    for (i, option) in session.visible_options().iter().enumerate() {
        let result = if option.is_valid() {
            option.result.clone().cyan()
        } else {
            option.result.clone().dark_grey()
        };
        println!("  {:>2}. {}  {}", i + 1, result, option.label.clone().dark_grey());
    }
}

fn offer_slot(store: &mut JsonRuleStore, selection: &Selection) -> anyhow::Result<()> {
    loop {
        let Some(answer) = prompt("Save as shortcut slot [1-5, Enter to skip]: ")? else {
            return Ok(());
        };
        if answer.is_empty() {
            return Ok(());
        }
        let slot = answer
            .parse::<u8>()
            .map_err(|_| NamingError::InvalidSlot(0))
            .and_then(SlotId::new);
        match slot {
            Ok(slot) => {
                let rule = persist_selection(store, slot, selection)?;
                println!("slot {} → {}", slot, rule.name);
                return Ok(());
            }
            Err(e) => println!("{} {}", "error:".red(), e),
        }
    }
}

fn print_grid(engine: &NamingEngine, phrase: &str) -> anyhow::Result<()> {
    let grid = engine.generate_all_options(phrase)?;
    for (category, options) in &grid.categories {
        println!("{}", category.label().bold());
        for option in options {
            match option.score {
                Some(score) => println!("  {:<32} {:>3}  {}", option.result, score, option.label),
                None => println!(
                    "  {:<32} {}  {}",
                    option.result.clone().dark_grey(),
                    "---".dark_grey(),
                    option.label
                ),
            }
        }
    }
    Ok(())
}

fn print_rules(rules: &ShortcutRules) {
    for (slot, rule) in rules.slots() {
        match rule {
            Some(rule) => println!(
                "  {}  {:<36} {}",
                slot,
                rule.name,
                rule.style.example().dark_grey()
            ),
            None => println!("  {}  {}", slot, "(empty)".dark_grey()),
        }
    }
}

/// Reads one trimmed line; `None` at end of input.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
