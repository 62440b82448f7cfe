//! Typing/erasing headline animation.
//!
//! `TypingSession` is the whole state of the animation. Each `tick` advances it
//! by one character and returns how long to wait before the next tick, so the
//! caller only needs a one-shot timer.

use crate::config::{DEFAULT_ERASING_SPEED_MS, DEFAULT_HOLD_DELAY_MS, DEFAULT_TYPING_SPEED_MS};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingMode {
    Typing,
    Erasing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTiming {
    pub typing_speed_ms: u32,
    pub erasing_speed_ms: u32,
    pub hold_delay_ms: u32,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            typing_speed_ms: DEFAULT_TYPING_SPEED_MS,
            erasing_speed_ms: DEFAULT_ERASING_SPEED_MS,
            hold_delay_ms: DEFAULT_HOLD_DELAY_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypingSession {
    texts: Rc<[String]>,
    timing: TypingTiming,
    text_index: usize,
    char_index: usize,
    mode: TypingMode,
    next_delay_ms: u32,
    ticks: u64,
}

impl TypingSession {
    /// Returns `None` for an empty phrase list; there is nothing to cycle through.
    pub fn new(texts: impl Into<Rc<[String]>>, timing: TypingTiming) -> Option<Self> {
        let texts = texts.into();
        if texts.is_empty() {
            return None;
        }

        Some(Self {
            texts,
            timing,
            text_index: 0,
            char_index: 0,
            mode: TypingMode::Typing,
            next_delay_ms: 0,
            ticks: 0,
        })
    }

    #[cfg(test)]
    pub fn text_index(&self) -> usize {
        self.text_index
    }

    #[cfg(test)]
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    #[cfg(test)]
    pub fn mode(&self) -> TypingMode {
        self.mode
    }

    /// Delay before the next `tick` should run.
    pub fn next_delay_ms(&self) -> u32 {
        self.next_delay_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn current_phrase(&self) -> &str {
        &self.texts[self.text_index]
    }

    /// The first `char_index` characters of the current phrase.
    pub fn display(&self) -> &str {
        let phrase = self.current_phrase();
        let end = phrase
            .char_indices()
            .nth(self.char_index)
            .map_or(phrase.len(), |(offset, _)| offset);
        &phrase[..end]
    }

    pub fn tick(&mut self) -> u32 {
        self.ticks += 1;
        let phrase_len = self.current_phrase().chars().count();

        let delay = match self.mode {
            TypingMode::Typing => {
                if self.char_index < phrase_len {
                    self.char_index += 1;
                }

                if self.char_index >= phrase_len {
                    self.mode = TypingMode::Erasing;
                    self.timing
                        .hold_delay_ms
                        .saturating_add(self.timing.erasing_speed_ms)
                } else {
                    self.timing.typing_speed_ms
                }
            }
            TypingMode::Erasing => {
                self.char_index = self.char_index.saturating_sub(1);

                if self.char_index == 0 {
                    self.text_index = (self.text_index + 1) % self.texts.len();
                    self.mode = TypingMode::Typing;
                    self.timing.typing_speed_ms
                } else {
                    self.timing.erasing_speed_ms
                }
            }
        };

        self.next_delay_ms = delay;
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(texts: &[&str], timing: TypingTiming) -> TypingSession {
        let texts: Vec<String> = texts.iter().map(ToString::to_string).collect();
        TypingSession::new(texts, timing).expect("non-empty phrase list")
    }

    /// Runs ticks on a virtual clock and records `(time, display)` after each.
    fn timeline(mut session: TypingSession, until_ms: u64) -> Vec<(u64, String)> {
        let mut now = u64::from(session.next_delay_ms());
        let mut frames = Vec::new();

        while now <= until_ms {
            let delay = session.tick();
            frames.push((now, session.display().to_string()));
            now += u64::from(delay);
        }

        frames
    }

    /// Ticks until the session leaves the current phrase.
    fn run_cycle(session: &mut TypingSession) {
        let start = session.text_index();
        while session.text_index() == start {
            session.tick();
        }
    }

    #[test]
    fn empty_phrase_list_is_rejected() {
        assert!(TypingSession::new(Vec::<String>::new(), TypingTiming::default()).is_none());
    }

    #[test]
    fn scenario_timeline_matches_typing_cadence() {
        let timing = TypingTiming {
            typing_speed_ms: 100,
            erasing_speed_ms: 50,
            hold_delay_ms: 2_000,
        };

        let frames = timeline(session(&["AB"], timing), 2_300);
        let expected: Vec<(u64, String)> = vec![
            (0, "A".to_string()),
            (100, "AB".to_string()),
            (2_150, "A".to_string()),
            (2_200, String::new()),
            (2_300, "A".to_string()),
        ];
        assert_eq!(frames, expected);
    }

    #[test]
    fn typing_phase_ends_with_the_full_phrase() {
        let mut session = session(&["HELLO", "WORLD"], TypingTiming::default());

        while session.mode() == TypingMode::Typing {
            session.tick();
        }

        assert_eq!(session.display(), "HELLO");
        assert_eq!(session.char_index(), "HELLO".len());
        assert_eq!(session.next_delay_ms(), 2_050);
    }

    #[test]
    fn erasing_phase_ends_empty_and_advances() {
        let mut session = session(&["HI", "YO"], TypingTiming::default());

        while session.mode() == TypingMode::Typing {
            session.tick();
        }
        while session.mode() == TypingMode::Erasing {
            session.tick();
        }

        assert_eq!(session.display(), "");
        assert_eq!(session.char_index(), 0);
        assert_eq!(session.text_index(), 1);
        assert_eq!(session.next_delay_ms(), DEFAULT_TYPING_SPEED_MS);
    }

    #[test]
    fn phrase_index_wraps_after_every_phrase() {
        let texts = ["ONE", "TWO", "THREE"];
        let mut session = session(&texts, TypingTiming::default());

        for _ in 0..texts.len() {
            run_cycle(&mut session);
        }
        assert_eq!(session.text_index(), 0);

        for _ in 0..texts.len() {
            run_cycle(&mut session);
        }
        assert_eq!(session.text_index(), 0);
    }

    #[test]
    fn char_index_stays_within_phrase_bounds() {
        let mut session = session(&["ab", "", "xyz"], TypingTiming::default());

        for _ in 0..200 {
            session.tick();
            let len = session.current_phrase().chars().count();
            assert!(session.char_index() <= len);
        }
    }

    #[test]
    fn empty_phrase_is_skipped_after_a_hold() {
        let mut session = session(&["", "Z"], TypingTiming::default());

        assert_eq!(session.tick(), 2_050);
        assert_eq!(session.mode(), TypingMode::Erasing);
        assert_eq!(session.tick(), DEFAULT_TYPING_SPEED_MS);
        assert_eq!(session.text_index(), 1);
        session.tick();
        assert_eq!(session.display(), "Z");
    }

    #[test]
    fn display_respects_multibyte_characters() {
        let mut session = session(&["añb"], TypingTiming::default());

        session.tick();
        session.tick();
        assert_eq!(session.display(), "añ");
    }
}
