//! Dotted-key access into nested `toml::Table`s.
//!
//! Keys are case-insensitive: every segment is lowercased on the way in, and
//! tables adopted from elsewhere are normalized with [`lowercase_keys`].

use toml::{Table, Value};

use crate::error::BindError;

/// Look up `database.url` style keys.
pub fn get<'a>(table: &'a Table, key: &str) -> Option<&'a Value> {
    let key = key.to_lowercase();
    let (path, leaf) = match key.rsplit_once('.') {
        Some((path, leaf)) => (Some(path), leaf),
        None => (None, key.as_str()),
    };

    let mut current = table;
    if let Some(path) = path {
        for segment in path.split('.') {
            current = current.get(segment)?.as_table()?;
        }
    }
    current.get(leaf)
}

/// Insert `value` at a dotted key, creating intermediate tables.
///
/// Fails if an intermediate segment already holds a non-table value.
pub fn insert(table: &mut Table, key: &str, value: Value) -> Result<(), BindError> {
    let lowered = key.to_lowercase();
    let segments: Vec<&str> = lowered.split('.').collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return Err(invalid(key, "empty key"));
    };
    if segments.iter().any(|s| s.is_empty()) {
        return Err(invalid(key, "empty key segment"));
    }

    let mut current = table;
    for segment in parents {
        current = current
            .entry(*segment)
            .or_insert_with(|| Value::Table(Table::new()))
            .as_table_mut()
            .ok_or_else(|| invalid(key, &format!("'{segment}' is not a table")))?;
    }
    current.insert(leaf.to_string(), value);
    Ok(())
}

/// Lowercase every key in `table`, recursively.
pub fn lowercase_keys(table: Table) -> Table {
    table
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Table(inner) => Value::Table(lowercase_keys(inner)),
                other => other,
            };
            (key.to_lowercase(), value)
        })
        .collect()
}

fn invalid(key: &str, reason: &str) -> BindError {
    BindError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(toml_str: &str) -> Table {
        toml_str.parse::<Table>().unwrap()
    }

    #[test]
    fn get_top_level() {
        let t = table(r#"host = "localhost""#);
        assert_eq!(get(&t, "host").unwrap().as_str(), Some("localhost"));
    }

    #[test]
    fn get_nested() {
        let t = table(
            r#"
            [database]
            url = "pg://"
            "#,
        );
        assert_eq!(get(&t, "database.url").unwrap().as_str(), Some("pg://"));
    }

    #[test]
    fn get_is_case_insensitive() {
        let t = table("port = 3000");
        assert_eq!(get(&t, "PORT").unwrap().as_integer(), Some(3000));
    }

    #[test]
    fn get_through_scalar_is_none() {
        let t = table("port = 3000");
        assert!(get(&t, "port.inner").is_none());
        assert!(get(&t, "missing").is_none());
    }

    #[test]
    fn insert_creates_intermediate_tables() {
        let mut t = Table::new();
        insert(&mut t, "a.b.c", Value::Integer(42)).unwrap();
        assert_eq!(t["a"]["b"]["c"].as_integer(), Some(42));
    }

    #[test]
    fn insert_last_write_wins() {
        let mut t = Table::new();
        insert(&mut t, "port", Value::Integer(3000)).unwrap();
        insert(&mut t, "port", Value::Integer(5000)).unwrap();
        assert_eq!(t["port"].as_integer(), Some(5000));
    }

    #[test]
    fn insert_through_scalar_fails() {
        let mut t = table("database = \"flat\"");
        let err = insert(&mut t, "database.url", Value::String("pg://".into())).unwrap_err();
        assert!(err.to_string().contains("database.url"));
    }

    #[test]
    fn insert_rejects_empty_segment() {
        let mut t = Table::new();
        assert!(insert(&mut t, "a..b", Value::Integer(1)).is_err());
        assert!(insert(&mut t, "", Value::Integer(1)).is_err());
    }

    #[test]
    fn lowercase_keys_recurses() {
        let t = lowercase_keys(table(
            r#"
            Host = "x"
            [Database]
            URL = "pg://"
            "#,
        ));
        assert!(t.contains_key("host"));
        assert_eq!(t["database"]["url"].as_str(), Some("pg://"));
    }
}
