//! `headkit url`: resolve references and print the results.

use anyhow::{Result, bail};
use headkit::{SiteConfig, log};
use serde_json::{Map, Value as JsonValue};

use super::args::UrlArgs;

pub fn run_url(args: &UrlArgs, config: &SiteConfig) -> Result<()> {
    let results = resolve_all(args, config);

    if args.json {
        let object = JsonValue::Object(to_json(&results));
        println!("{}", serde_json::to_string_pretty(&object)?);
    } else {
        for resolved in results.iter().filter_map(|(_, resolved)| resolved.as_deref()) {
            println!("{resolved}");
        }
    }

    let failed = results.iter().filter(|(_, resolved)| resolved.is_none()).count();
    if failed > 0 {
        bail!(
            "{} of {} url{} could not be resolved",
            failed,
            args.urls.len(),
            if args.urls.len() == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

/// Resolve every argument in order, warning about each failure.
fn resolve_all(args: &UrlArgs, config: &SiteConfig) -> Vec<(String, Option<String>)> {
    let locator = config.locator();
    let resolver = config.resolver(&locator);

    args.urls
        .iter()
        .map(|url| {
            let resolved = match resolver.try_resolve(url, args.domain, args.timestamp_age) {
                Ok(resolved) => Some(resolved),
                Err(e) => {
                    log!("warning"; "{}", e);
                    None
                }
            };
            (url.clone(), resolved)
        })
        .collect()
}

/// Map each input URL to its resolution, `null` when unresolved.
fn to_json(results: &[(String, Option<String>)]) -> Map<String, JsonValue> {
    results
        .iter()
        .map(|(url, resolved)| {
            let value = resolved.clone().map_or(JsonValue::Null, JsonValue::String);
            (url.clone(), value)
        })
        .collect()
}
