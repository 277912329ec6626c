use std::{borrow::Cow, sync::OnceLock};

use regex::{Captures, Regex};

/// Expand `{{ env.VAR }}` placeholders in raw TOML text
///
/// `{{ env.VAR | default("fallback") }}` substitutes the fallback when the
/// variable is unset. Comment lines are left untouched so a commented-out
/// setting never demands its variable.
pub fn expand_env(input: &str) -> Result<String, String> {
    let lines = input
        .split('\n')
        .map(|line| {
            if line.trim_start().starts_with('#') {
                Ok(Cow::Borrowed(line))
            } else {
                expand_line(line)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(lines.join("\n"))
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();

    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*(?<key>[A-Za-z0-9_.]+)\s*(?:\|\s*default\("(?<default>[^"]*)"\))?\s*\}\}"#)
            .expect("placeholder pattern must compile")
    })
}

fn expand_line(line: &str) -> Result<Cow<'_, str>, String> {
    let mut expanded = String::with_capacity(line.len());
    let mut copied_up_to = 0;

    for captures in placeholder().captures_iter(line) {
        let Some(whole) = captures.get(0) else {
            continue;
        };

        expanded.push_str(&line[copied_up_to..whole.start()]);
        expanded.push_str(&resolve(&captures)?);
        copied_up_to = whole.end();
    }

    if copied_up_to == 0 {
        return Ok(Cow::Borrowed(line));
    }

    expanded.push_str(&line[copied_up_to..]);
    Ok(Cow::Owned(expanded))
}

fn resolve(captures: &Captures<'_>) -> Result<String, String> {
    let key = &captures["key"];

    let var_name = key
        .strip_prefix("env.")
        .filter(|name| !name.is_empty() && !name.contains('.'))
        .ok_or_else(|| format!("only variables scoped with 'env.' are supported: `{key}`"))?;

    match (std::env::var(var_name), captures.name("default")) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.as_str().to_string()),
        (Err(_), None) => Err(format!("environment variable not found: `{var_name}`")),
    }
}
