//! Command execution and output rendering.

use crate::args::{Args, Command};
use crate::error::CliResult;
use crate::settings::CliSettings;
use dotconf_store::{split_key, Loader, NamespaceStore, Store, Value};
use tracing::{debug, info};

/// Parse a command line value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Scalars print bare (strings without quotes); mappings and sequences print as YAML.
fn render_value(value: &Value) -> CliResult<String> {
    Ok(match value {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => serde_yaml::to_string(value)?
            .trim_end()
            .to_string(),
        scalar => scalar.to_string(),
    })
}

fn render_namespaces<'a, I>(namespaces: I) -> CliResult<String>
where
    I: IntoIterator<Item = (&'a String, &'a dotconf_store::Document)>,
{
    let selection: Store = namespaces
        .into_iter()
        .map(|(name, document)| (name.clone(), document.clone()))
        .collect();
    Ok(serde_yaml::to_string(&selection)?.trim_end().to_string())
}

/// Run `command` against `store` and return what should be printed.
pub fn execute<L: Loader>(store: &mut NamespaceStore<L>, command: &Command) -> CliResult<String> {
    debug!(?command, "executing command");
    match command {
        Command::Get { key, default } => {
            let fallback = default.as_deref().map_or(Value::Null, parse_value);
            let value = store.get(key, fallback)?;
            render_value(&value)
        }
        Command::Exists { key } => Ok(store.exists(key)?.to_string()),
        Command::Set { key, value } => {
            let updated = store.set(key, parse_value(value))?;
            render_mutation(store, key, updated)
        }
        Command::Delete { key } => {
            let removed = store.delete(key)?;
            render_mutation(store, key, removed)
        }
        Command::Dump { namespaces } => {
            store.preload(namespaces)?;
            render_namespaces(
                store
                    .get_all()
                    .iter()
                    .filter(|(name, _)| namespaces.contains(name)),
            )
        }
    }
}

fn render_mutation<L: Loader>(
    store: &mut NamespaceStore<L>,
    key: &str,
    flag: bool,
) -> CliResult<String> {
    let namespace = split_key(key).namespace;
    let document = store.document(namespace)?;
    let rendered = render_namespaces([(&namespace.to_string(), document)])?;
    Ok(format!("{flag}\n{rendered}"))
}

/// Open the configured directory and run the command from `args`.
pub fn run(args: &Args, settings: &CliSettings) -> CliResult<String> {
    info!(
        directory = %settings.directory.display(),
        format = %settings.format,
        "opening configuration directory"
    );
    let mut store = NamespaceStore::open_with_format(&settings.directory, settings.format)?;
    execute(&mut store, &args.command)
}
