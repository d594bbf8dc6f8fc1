//! dexfield command line
//!
//! Drives the field widget against a JSON document on disk:
//! - `lookup <name>`: one lookup, printed as JSON
//! - `pick <name> --document <file>`: debounce, look up, and store the match
//! - `clear --document <file>`: remove the stored value
//! - `show --document <file>`: print the stored value's preview

#![warn(missing_docs)]
#![warn(unreachable_pub)]

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use dex_field::prelude::*;
use dex_field::{LOOKUP_FAILED_MESSAGE, NOT_FOUND_MESSAGE};
use dex_lookup::{LookupOutcome, PokeApiClient, PokemonLookup, SearchTerm};
use dex_model::Preview;
use dex_store::{FieldPath, JsonFileDocument};
use std::path::{Path, PathBuf};

/// Field path used when `--path` is not given
pub const DEFAULT_FIELD_PATH: &str = "pokemon";

/// Field inside a document file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Document file
    pub document: PathBuf,
    /// Dotted field path
    pub path: FieldPath,
}

/// Parsed subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Single lookup
    Lookup {
        /// Raw search text
        name: String,
    },
    /// Full search-and-select workflow
    Pick {
        /// Raw search text
        name: String,
        /// Where to store the match
        target: Target,
    },
    /// Remove the stored value
    Clear {
        /// Field to clear
        target: Target,
    },
    /// Print the stored value's preview
    Show {
        /// Field to show
        target: Target,
    },
}

/// Everything parsed from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Subcommand
    pub action: Action,
    /// `--config` file
    pub config: Option<PathBuf>,
    /// `--verbose`
    pub verbose: bool,
}

/// What to print and how to exit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Text for stdout
    pub output: String,
    /// Exit status 0 when true
    pub success: bool,
}

impl Report {
    fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: true,
        }
    }

    fn failed(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: false,
        }
    }
}

/// Command definition
#[must_use]
pub fn build_cli() -> Command {
    let document = Arg::new("document")
        .long("document")
        .short('d')
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("JSON document holding the field");
    let path = Arg::new("path")
        .long("path")
        .short('p')
        .default_value(DEFAULT_FIELD_PATH)
        .help("Dotted path of the field inside the document");
    let name = Arg::new("name").required(true).help("Pokemon name");

    Command::new("dexfield")
        .version(dex_field::VERSION)
        .about("Look up Pokemon and store them in JSON documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("lookup")
                .about("Look up a single Pokemon and print it")
                .arg(name.clone()),
        )
        .subcommand(
            Command::new("pick")
                .about("Search for a Pokemon and store the match")
                .arg(name)
                .arg(document.clone())
                .arg(path.clone()),
        )
        .subcommand(
            Command::new("clear")
                .about("Remove the stored Pokemon")
                .arg(document.clone())
                .arg(path.clone()),
        )
        .subcommand(
            Command::new("show")
                .about("Print the stored Pokemon's preview")
                .arg(document)
                .arg(path),
        )
}

impl Invocation {
    /// Interpret parsed arguments
    ///
    /// # Errors
    /// Unknown subcommand or an invalid field path
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let action = match matches.subcommand() {
            Some(("lookup", sub)) => Action::Lookup { name: name_arg(sub)? },
            Some(("pick", sub)) => Action::Pick {
                name: name_arg(sub)?,
                target: target_arg(sub)?,
            },
            Some(("clear", sub)) => Action::Clear {
                target: target_arg(sub)?,
            },
            Some(("show", sub)) => Action::Show {
                target: target_arg(sub)?,
            },
            Some((other, _)) => bail!("unknown command: {other}"),
            None => bail!("no command given"),
        };

        Ok(Self {
            action,
            config: matches.get_one::<PathBuf>("config").cloned(),
            verbose: matches.get_flag("verbose"),
        })
    }
}

fn name_arg(matches: &ArgMatches) -> Result<String> {
    matches
        .get_one::<String>("name")
        .cloned()
        .context("missing Pokemon name")
}

fn target_arg(matches: &ArgMatches) -> Result<Target> {
    let document = matches
        .get_one::<PathBuf>("document")
        .cloned()
        .context("missing --document")?;
    let raw = matches
        .get_one::<String>("path")
        .map_or(DEFAULT_FIELD_PATH, String::as_str);
    let path = raw
        .parse::<FieldPath>()
        .with_context(|| format!("invalid field path '{raw}'"))?;
    Ok(Target { document, path })
}

/// Load configuration, then apply environment overrides
///
/// # Errors
/// Unreadable or invalid configuration
pub fn load_config(path: Option<&Path>) -> Result<FieldConfig> {
    let config = match path {
        Some(p) => FieldConfig::from_file(p)
            .with_context(|| format!("failed to load config {}", p.display()))?,
        None => FieldConfig::default(),
    };
    config
        .with_env_overrides()
        .context("invalid environment override")
}

/// Execute an action
///
/// Lookup and write failures produce an unsuccessful [`Report`]; errors are
/// reserved for bad input and broken setup.
///
/// # Errors
/// Blank search term, unreadable document, or a stopped controller
pub async fn run(action: Action, config: &FieldConfig) -> Result<Report> {
    match action {
        Action::Lookup { name } => lookup(&name, config).await,
        Action::Pick { name, target } => pick(&name, &target, config).await,
        Action::Clear { target } => clear(&target, config).await,
        Action::Show { target } => show(&target),
    }
}

async fn lookup(name: &str, config: &FieldConfig) -> Result<Report> {
    let term = SearchTerm::parse(name).context("search term is blank")?;
    let client = client(config)?;

    match client.lookup(&term).await {
        Ok(LookupOutcome::Found(pokemon)) => Ok(Report::ok(serde_json::to_string_pretty(&pokemon)?)),
        Ok(LookupOutcome::NotFound) => Ok(Report::failed(NOT_FOUND_MESSAGE)),
        Err(e) => {
            tracing::warn!("Lookup for {} failed: {}", term, e);
            Ok(Report::failed(LOOKUP_FAILED_MESSAGE))
        }
    }
}

async fn pick(name: &str, target: &Target, config: &FieldConfig) -> Result<Report> {
    if SearchTerm::parse(name).is_none() {
        bail!("search term is blank");
    }
    let binding = bind(target)?;
    let (field, task) = spawn_field(
        config,
        Arc::new(client(config)?),
        Arc::new(binding.clone()),
        Arc::new(TracingObserver),
    );

    field.input(name)?;
    let state = field.wait_until(|s| s.phase == Phase::Settled).await?;

    let report = match state.candidates.first() {
        Some(candidate) => match field.select(candidate.clone()).await? {
            CommitOutcome::Committed => {
                let view = FieldView::render(binding.value().as_ref(), &field.snapshot());
                Report::ok(serde_json::to_string_pretty(&view)?)
            }
            CommitOutcome::Failed(message) => Report::failed(message),
        },
        None => Report::failed(state.error.unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string())),
    };

    field.shutdown()?;
    task.await.context("field controller panicked")?;
    Ok(report)
}

async fn clear(target: &Target, config: &FieldConfig) -> Result<Report> {
    let binding = bind(target)?;
    let (field, task) = spawn_field(
        config,
        Arc::new(client(config)?),
        Arc::new(binding),
        Arc::new(TracingObserver),
    );

    let report = match field.clear().await? {
        CommitOutcome::Committed => Report::ok(format!(
            "Cleared {} in {}",
            target.path,
            target.document.display()
        )),
        CommitOutcome::Failed(message) => Report::failed(message),
    };

    field.shutdown()?;
    task.await.context("field controller panicked")?;
    Ok(report)
}

fn show(target: &Target) -> Result<Report> {
    let binding = bind(target)?;
    let preview = Preview::of(binding.value().as_ref());
    Ok(Report::ok(serde_json::to_string_pretty(&preview)?))
}

fn bind(target: &Target) -> Result<FieldBinding<Arc<JsonFileDocument>>> {
    let document = JsonFileDocument::open(&target.document)
        .with_context(|| format!("failed to open {}", target.document.display()))?;
    Ok(FieldBinding::new(Arc::new(document), target.path.clone()))
}

fn client(config: &FieldConfig) -> Result<PokeApiClient> {
    PokeApiClient::new(&config.lookup_config()).context("failed to build lookup client")
}
