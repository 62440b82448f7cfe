pub const DARK_CLASS: &str = "dark";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_dark_class(has_dark_class: bool) -> Self {
        if has_dark_class {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Glyph for the toggle: the sun offers a way out of dark mode.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀",
        }
    }
}

/// Theme after a click, derived only from the class the page carries now.
pub fn next_theme(has_dark_class: bool) -> Theme {
    Theme::from_dark_class(has_dark_class).toggled()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_icon_follows() {
        let theme = Theme::Light.toggled();
        assert_eq!(theme, Theme::Dark);
        assert_eq!(theme.icon(), "☀");
        assert_eq!(theme.toggled().icon(), "🌙");
    }

    #[test]
    fn click_toggles_from_the_current_class() {
        assert_eq!(next_theme(false), Theme::Dark);
        assert_eq!(next_theme(true), Theme::Light);
        assert_eq!(next_theme(next_theme(false).is_dark()), Theme::Light);
    }

    #[test]
    fn reload_starts_from_markup_not_a_previous_visit() {
        let before_reload = next_theme(false);
        assert!(before_reload.is_dark());

        // A reload re-renders the light markup; nothing from the last visit applies.
        assert_eq!(Theme::from_dark_class(false), Theme::Light);
        assert_eq!(next_theme(false), Theme::Dark);
    }
}
