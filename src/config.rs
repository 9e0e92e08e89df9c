use std::{net::SocketAddr, path::PathBuf};

use crate::stats::StreakCounting;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub data_dir: PathBuf,
    pub static_dir: PathBuf,
    pub streak_counting: StreakCounting,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            streak_counting: StreakCounting::PerEntry,
        }
    }
}

impl Config {
    // Reads MOOD_JOURNAL_* from the environment (and .env, if present).
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "ignoring unreadable .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Unset values use defaults; unparseable ones also fall back, with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Config::default();

        if let Some(raw) = lookup("MOOD_JOURNAL_ADDR") {
            match raw.parse() {
                Ok(addr) => config.addr = addr,
                Err(_) => tracing::warn!(value = %raw, "invalid MOOD_JOURNAL_ADDR, using {DEFAULT_ADDR}"),
            }
        }
        if let Some(dir) = lookup("MOOD_JOURNAL_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("MOOD_JOURNAL_STATIC_DIR").filter(|d| !d.trim().is_empty()) {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("MOOD_JOURNAL_STREAK_COUNTING") {
            match parse_streak_counting(&raw) {
                Some(counting) => config.streak_counting = counting,
                None => tracing::warn!(value = %raw, "invalid MOOD_JOURNAL_STREAK_COUNTING, expected entry|day"),
            }
        }

        config
    }
}

fn parse_streak_counting(raw: &str) -> Option<StreakCounting> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "entry" | "per_entry" => Some(StreakCounting::PerEntry),
        "day" | "per_day" | "per_calendar_day" => Some(StreakCounting::PerCalendarDay),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.streak_counting, StreakCounting::PerEntry);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("MOOD_JOURNAL_ADDR", "0.0.0.0:8080"),
            ("MOOD_JOURNAL_DATA_DIR", "/var/lib/mood"),
            ("MOOD_JOURNAL_STREAK_COUNTING", "Day"),
        ]));
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/mood"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.streak_counting, StreakCounting::PerCalendarDay);
    }

    #[test]
    fn bad_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("MOOD_JOURNAL_ADDR", "not an addr"),
            ("MOOD_JOURNAL_STREAK_COUNTING", "weekly"),
            ("MOOD_JOURNAL_DATA_DIR", "  "),
        ]));
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert_eq!(config.streak_counting, StreakCounting::PerEntry);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }
}
