use std::env;

/// Read a boolean flag; `1`, `true`, `yes` and `on` count as enabled.
pub fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => parse_bool(&value),
        Err(_) => default,
    }
}

/// Read an unsigned integer, falling back to `default` when unset or unparsable.
pub fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

/// Read a trimmed, non-empty string.
pub fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::{env_bool, env_string, env_u64, parse_bool};

    #[test]
    fn parses_truthy_values() {
        for raw in ["1", "true", "TRUE", " yes ", "On"] {
            assert!(parse_bool(raw), "{raw} should be truthy");
        }
        for raw in ["0", "false", "off", "", "maybe"] {
            assert!(!parse_bool(raw), "{raw} should be falsy");
        }
    }

    #[test]
    fn missing_keys_use_defaults() {
        assert!(env_bool("GEMCHAT_TEST_SURELY_UNSET_BOOL", true));
        assert_eq!(env_u64("GEMCHAT_TEST_SURELY_UNSET_U64", 42), 42);
        assert_eq!(env_string("GEMCHAT_TEST_SURELY_UNSET_STRING"), None);
    }
}
