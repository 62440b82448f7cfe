//! Navigation chrome: in-page anchors, the scroll-to-top button and the mobile
//! menu drawer.

pub const SCROLL_TOP_THRESHOLD: f64 = 300.0;
pub const ACTIVE_CLASS: &str = "active";

/// Selector for an in-page link target. `None` for external links and the
/// bare `#`, which have nothing to scroll to.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#')
        .filter(|fragment| !fragment.is_empty())
        .map(|_| href)
}

pub fn scroll_top_visible(scroll_y: f64) -> bool {
    scroll_y > SCROLL_TOP_THRESHOLD
}

pub fn scroll_top_display(scroll_y: f64) -> &'static str {
    if scroll_top_visible(scroll_y) {
        "block"
    } else {
        "none"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    ToggleClicked,
    LinkClicked,
    OverlayClicked,
}

/// Open state shared by the nav drawer and its overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn from_open(open: bool) -> Self {
        Self { open }
    }

    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn on(self, event: MenuEvent) -> Self {
        match event {
            MenuEvent::ToggleClicked => Self { open: !self.open },
            MenuEvent::LinkClicked | MenuEvent::OverlayClicked => Self { open: false },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fragment_links_have_targets() {
        assert_eq!(anchor_target("#about"), Some("#about"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("https://github.com"), None);
        assert_eq!(anchor_target("/resume.pdf#page=2"), None);
    }

    #[test]
    fn scroll_top_button_shows_strictly_past_threshold() {
        assert_eq!(scroll_top_display(0.0), "none");
        assert_eq!(scroll_top_display(300.0), "none");
        assert_eq!(scroll_top_display(300.5), "block");
        assert!(scroll_top_visible(1_200.0));
    }

    #[test]
    fn toggle_flips_and_dismissals_close() {
        let menu = MenuState::default().on(MenuEvent::ToggleClicked);
        assert!(menu.is_open());
        assert!(!menu.on(MenuEvent::ToggleClicked).is_open());
        assert!(!menu.on(MenuEvent::LinkClicked).is_open());
        assert!(!menu.on(MenuEvent::OverlayClicked).is_open());
    }

    #[test]
    fn dismissing_a_closed_menu_keeps_it_closed() {
        let menu = MenuState::from_open(false).on(MenuEvent::OverlayClicked);
        assert_eq!(menu, MenuState::default());
    }
}
