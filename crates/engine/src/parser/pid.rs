use super::patterns::Patterns;

/// Return the first identifier bound to a `pid` / `playerId` / `player_id` key,
/// or an empty string.
pub fn extract_pid(text: &str) -> String {
    extract_pid_with(Patterns::shared(), text)
}

pub fn extract_pid_with(patterns: &Patterns, text: &str) -> String {
    patterns
        .pid
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_colon() {
        assert_eq!(extract_pid("playerId:123, extra"), "123");
    }

    #[test]
    fn test_no_delimiter_no_match() {
        assert_eq!(extract_pid("somePidValue999"), "");
    }

    #[test]
    fn test_aliases_and_case() {
        assert_eq!(extract_pid("pid=7"), "7");
        assert_eq!(extract_pid("player_id = 55"), "55");
        assert_eq!(extract_pid("PlayerID:901"), "901");
        assert_eq!(extract_pid("PID=3"), "3");
    }

    #[test]
    fn test_quoted_json_key() {
        assert_eq!(extract_pid(r#"{"playerId": 4711, "pid": 1}"#), "4711");
        assert_eq!(extract_pid("{'pid':12}"), "12");
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(extract_pid("pid=1 playerId=2"), "1");
    }

    #[test]
    fn test_key_must_start_a_word() {
        assert_eq!(extract_pid("xpid=5"), "");
        assert_eq!(extract_pid("warpid:9 pid:10"), "10");
    }

    #[test]
    fn test_non_numeric_value() {
        assert_eq!(extract_pid("pid=abc"), "");
    }

    #[test]
    fn test_garbage_does_not_panic() {
        assert_eq!(extract_pid(""), "");
        assert_eq!(extract_pid("\u{0}\u{fffd}pid"), "");
    }
}
