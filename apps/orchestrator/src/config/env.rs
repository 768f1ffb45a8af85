use std::str::FromStr;

use crate::error::AppError;

/// Source of configuration values. `std::env::var` in production, a map in
/// tests.
pub(crate) trait Lookup {
    fn get(&self, key: &str) -> Option<String>;
}

impl<F> Lookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        self(key)
    }
}

pub(crate) fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse `key` if set and non-blank, else return `default`.
pub(crate) fn var_or<T, L>(lookup: &L, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    L: Lookup + ?Sized,
{
    match lookup.get(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|e| {
            AppError::config(format!("{key} has invalid value '{raw}': {e}"))
        }),
        _ => Ok(default),
    }
}

/// Like [`var_or`] but zero is rejected.
pub(crate) fn positive_or<L>(lookup: &L, key: &str, default: u64) -> Result<u64, AppError>
where
    L: Lookup + ?Sized,
{
    let value = var_or(lookup, key, default)?;
    if value == 0 {
        return Err(AppError::config(format!("{key} must be greater than zero")));
    }
    Ok(value)
}

#[cfg(test)]
pub(crate) fn map_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let owned: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| {
        owned
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}
