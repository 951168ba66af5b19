//! Command-line access to the category taxonomy.
//!
//! Answers the same questions presentation code asks (owning group, contact
//! gating, sign-in prompt) for a single slug, lists groups, and validates
//! external taxonomy documents before they are deployed via
//! `CLASSIFIEDS_TAXONOMY`.

use anyhow::{Context, Result, bail};
use classifieds_taxonomy::Taxonomy;
use serde_json::{Value, json};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// `group` exits with this code when the slug belongs to no group.
const EXIT_NOT_FOUND: i32 = 2;

fn main() {
    init_tracing();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<i32> {
    let cli = Cli::parse(env::args_os().skip(1).collect())?;
    let locale = cli.locale.as_deref().unwrap_or("en");
    let configured = Taxonomy::load_configured;

    match &cli.command {
        Command::Validate { path } => {
            let taxonomy = Taxonomy::load(path)?;
            println!(
                "{}: ok ({} groups, {} grouped slugs)",
                path.display(),
                taxonomy.registry().groups().count(),
                taxonomy.registry().slugs().count()
            );
        }
        Command::Describe { slug } => {
            let description = configured()?.describe(slug, locale);
            println!("{}", serde_json::to_string_pretty(&description)?);
        }
        Command::Group { slug } => match configured()?.resolve_group(slug) {
            Some(key) => println!("{key}"),
            None => {
                eprintln!("no category group contains '{slug}'");
                return Ok(EXIT_NOT_FOUND);
            }
        },
        Command::Auth { slug } => {
            println!("{}", configured()?.requires_auth_for_contact(slug));
        }
        Command::Message { slug } => {
            println!("{}", configured()?.auth_required_message(slug, locale));
        }
        Command::Groups => {
            let taxonomy = configured()?;
            let groups: Vec<Value> = taxonomy
                .registry()
                .groups()
                .map(|group| {
                    json!({
                        "key": group.key,
                        "name": taxonomy.display_name(group.key, locale),
                        "color": group.color,
                        "members": group.members,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        Command::Dump => {
            let taxonomy = configured()?;
            println!("{}", serde_json::to_string_pretty(taxonomy.document())?);
        }
    }

    Ok(0)
}

struct Cli {
    command: Command,
    locale: Option<String>,
}

enum Command {
    Describe { slug: String },
    Group { slug: String },
    Auth { slug: String },
    Message { slug: String },
    Groups,
    Dump,
    Validate { path: PathBuf },
}

impl Cli {
    fn parse(args: Vec<OsString>) -> Result<Self> {
        let mut positional: Vec<String> = Vec::new();
        let mut locale = None;
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            let arg = arg
                .into_string()
                .map_err(|_| anyhow::anyhow!("arguments must be valid UTF-8"))?;
            match arg.as_str() {
                "--help" | "-h" => usage(0),
                "--locale" | "-l" => {
                    let value = iter
                        .next()
                        .context("--locale requires a value")?
                        .into_string()
                        .map_err(|_| anyhow::anyhow!("--locale must be valid UTF-8"))?;
                    locale = Some(value);
                }
                other if other.starts_with('-') => bail!("unknown option: {other}"),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let Some(verb) = positional.next() else {
            usage(1);
        };
        let operand = positional.next();
        if let Some(extra) = positional.next() {
            bail!("unexpected argument: {extra}");
        }

        let slug = |verb: &str| -> Result<String> {
            operand
                .clone()
                .with_context(|| format!("{verb} requires a category slug"))
        };

        let command = match verb.as_str() {
            "describe" => Command::Describe {
                slug: slug("describe")?,
            },
            "group" => Command::Group {
                slug: slug("group")?,
            },
            "auth" => Command::Auth {
                slug: slug("auth")?,
            },
            "message" => Command::Message {
                slug: slug("message")?,
            },
            "groups" => Command::Groups,
            "dump" => Command::Dump,
            "validate" => Command::Validate {
                path: operand
                    .clone()
                    .map(PathBuf::from)
                    .context("validate requires a document path")?,
            },
            other => bail!("unknown command: {other}"),
        };

        Ok(Self { command, locale })
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: taxonomy-query <command> [args] [--locale <code>]\n\n\
Commands:\n  \
describe <slug>   Print group, color, icon and contact gating as JSON\n  \
group <slug>      Print the owning group key (exit 2 when none)\n  \
auth <slug>       Print whether contacting a seller requires sign-in\n  \
message <slug>    Print the localized sign-in prompt\n  \
groups            List groups with localized names as JSON\n  \
dump              Print the active taxonomy document\n  \
validate <path>   Validate a taxonomy document\n\n\
Options:\n  \
--locale, -l      Locale code (en, am); anything else falls back to en\n\n\
Environment:\n  \
CLASSIFIEDS_TAXONOMY  Path to a taxonomy document replacing the builtin one\n  \
RUST_LOG              Log filter (default: warn)"
    );
    std::process::exit(code);
}
