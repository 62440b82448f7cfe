use crate::log::LogLevel;

pub const DEFAULT_TYPING_SPEED_MS: u32 = 100;
pub const DEFAULT_ERASING_SPEED_MS: u32 = 50;
pub const DEFAULT_HOLD_DELAY_MS: u32 = 2_000;
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

pub const TYPING_SPEED_MS_BOUNDS: (u32, u32) = (10, 2_000);
pub const ERASING_SPEED_MS_BOUNDS: (u32, u32) = (10, 2_000);
pub const HOLD_DELAY_MS_BOUNDS: (u32, u32) = (0, 60_000);

pub const DEFAULT_PHRASES: [&str; 4] = [
    "I'M A DEVELOPER.",
    "I'M A C-CODER.",
    "I'M A FRONT-END DEVLOPER.",
    "I'M A JAVASCRIPT CODER.",
];

const PHRASE_SEPARATOR: char = '|';

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn parse_u32_with_bounds(raw: Option<String>, default: u32, bounds: (u32, u32)) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

pub fn parse_log_level(raw: Option<String>, default: LogLevel) -> LogLevel {
    non_empty(raw)
        .and_then(|value| LogLevel::from_str(&value.to_ascii_lowercase()))
        .unwrap_or(default)
}

/// Splits a `|`-separated phrase list, dropping blank entries. Falls back to
/// the built-in phrases when nothing usable remains.
pub fn parse_phrases(raw: Option<String>) -> Vec<String> {
    let parsed: Vec<String> = non_empty(raw)
        .map(|value| {
            value
                .split(PHRASE_SEPARATOR)
                .map(str::trim)
                .filter(|phrase| !phrase.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default();

    if parsed.is_empty() {
        DEFAULT_PHRASES.iter().map(ToString::to_string).collect()
    } else {
        parsed
    }
}
