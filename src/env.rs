/// Environment variable name for a config key.
///
/// `database.url` with prefix `MYAPP` becomes `MYAPP_DATABASE_URL`. Dots and
/// dashes become underscores and the result is uppercased. Without a prefix
/// the key alone is used (`database.url` → `DATABASE_URL`).
pub fn var_name(prefix: Option<&str>, key: &str) -> String {
    let key: String = key
        .chars()
        .map(|c| match c {
            '.' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect();
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}_{key}", prefix.to_ascii_uppercase()),
        _ => key,
    }
}

/// Find the value of `name` in `vars`. Empty values count as unset.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn lookup(name: &str, vars: impl IntoIterator<Item = (String, String)>) -> Option<String> {
    vars.into_iter()
        .find(|(var, _)| var == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
