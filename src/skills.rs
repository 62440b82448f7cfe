//! Skill-bar reveal: bookkeeping for which `.skills` sections are still watched
//! and the per-bar step sequence that makes the width transition visible.

pub const SKILLS_THRESHOLD: f64 = 0.2;
pub const SKILLS_ROOT_MARGIN: &str = "50px";
pub const BAR_TRANSITION: &str = "width 1.5s cubic-bezier(0.4, 0, 0.2, 1)";
pub const COLLAPSED_WIDTH: &str = "0";
pub const SETTLE_DELAY_MS: u32 = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BarStep {
    Collapse,
    /// Synchronous layout read so the collapsed width is committed first.
    ForceLayout,
    ApplyTransition,
    ExpandOnNextFrame(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarAnimation {
    pub bar: usize,
    pub target_width: Option<String>,
}

impl BarAnimation {
    /// A bar without a target collapses and stays at zero width.
    pub fn steps(&self) -> Vec<BarStep> {
        let mut steps = vec![BarStep::Collapse, BarStep::ForceLayout, BarStep::ApplyTransition];
        if let Some(target) = self.target_width.as_ref() {
            steps.push(BarStep::ExpandOnNextFrame(target.clone()));
        }
        steps
    }
}

/// Builds one animation per bar from the `data-width` values read just now.
pub fn plan_bars(targets: Vec<Option<String>>) -> Vec<BarAnimation> {
    targets
        .into_iter()
        .enumerate()
        .map(|(bar, target_width)| BarAnimation { bar, target_width })
        .collect()
}

/// Tracks which `.skills` sections are still watched. Bar targets are not
/// cached here; callers read them from the markup when a section animates.
#[derive(Clone, Debug, Default)]
pub struct SkillBoard {
    observed: Vec<bool>,
}

impl SkillBoard {
    pub fn new(section_count: usize) -> Self {
        Self {
            observed: vec![true; section_count],
        }
    }

    pub fn is_observed(&self, section: usize) -> bool {
        self.observed.get(section).copied().unwrap_or(false)
    }

    /// Handles an observer entry. The first intersecting entry for a watched
    /// section detaches it and returns true.
    pub fn on_intersection(&mut self, section: usize, is_intersecting: bool) -> bool {
        if !is_intersecting || !self.is_observed(section) {
            return false;
        }

        match self.observed.get_mut(section) {
            Some(observed) => {
                *observed = false;
                true
            }
            None => false,
        }
    }

    /// Sections to replay: every one for which `in_view` holds, watched or not.
    pub fn on_orientation_change(&self, in_view: impl Fn(usize) -> bool) -> Vec<usize> {
        (0..self.observed.len())
            .filter(|section| in_view(*section))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// True when the rectangle lies entirely inside a `width` x `height` viewport.
pub fn is_fully_in_viewport(rect: Rect, width: f64, height: f64) -> bool {
    rect.top >= 0.0 && rect.left >= 0.0 && rect.bottom <= height && rect.right <= width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeBar {
        width: String,
        transition: Option<String>,
        committed_collapse: bool,
        pending_frame: Option<String>,
    }

    impl FakeBar {
        fn run(&mut self, steps: &[BarStep]) {
            for step in steps {
                match step {
                    BarStep::Collapse => self.width = COLLAPSED_WIDTH.to_string(),
                    BarStep::ForceLayout => self.committed_collapse = self.width == COLLAPSED_WIDTH,
                    BarStep::ApplyTransition => self.transition = Some(BAR_TRANSITION.to_string()),
                    BarStep::ExpandOnNextFrame(target) => self.pending_frame = Some(target.clone()),
                }
            }
        }

        fn next_frame(&mut self) {
            if let Some(target) = self.pending_frame.take() {
                self.width = target;
            }
        }
    }

    fn targets(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|value| value.map(ToString::to_string)).collect()
    }

    #[test]
    fn each_bar_ends_at_its_own_target() {
        let plan = plan_bars(targets(&[Some("40%"), Some("75%"), Some("100%")]));

        let mut bars: Vec<FakeBar> = (0..3).map(|_| FakeBar::default()).collect();
        for animation in &plan {
            bars[animation.bar].run(&animation.steps());
        }
        assert!(bars.iter().all(|bar| bar.width == COLLAPSED_WIDTH));

        bars.iter_mut().for_each(FakeBar::next_frame);
        let widths: Vec<&str> = bars.iter().map(|bar| bar.width.as_str()).collect();
        assert_eq!(widths, vec!["40%", "75%", "100%"]);
        assert!(bars.iter().all(|bar| bar.committed_collapse));
        assert!(bars
            .iter()
            .all(|bar| bar.transition.as_deref() == Some(BAR_TRANSITION)));
    }

    #[test]
    fn collapse_is_committed_before_the_transition() {
        let steps = BarAnimation {
            bar: 0,
            target_width: Some("80%".to_string()),
        }
        .steps();

        assert_eq!(
            steps,
            vec![
                BarStep::Collapse,
                BarStep::ForceLayout,
                BarStep::ApplyTransition,
                BarStep::ExpandOnNextFrame("80%".to_string()),
            ]
        );
    }

    #[test]
    fn bar_without_target_stays_collapsed() {
        let animation = BarAnimation {
            bar: 0,
            target_width: None,
        };
        let mut bar = FakeBar {
            width: "60%".to_string(),
            ..FakeBar::default()
        };

        bar.run(&animation.steps());
        bar.next_frame();
        assert_eq!(bar.width, COLLAPSED_WIDTH);
    }

    #[test]
    fn intersection_triggers_once_then_detaches() {
        let mut board = SkillBoard::new(2);

        assert!(!board.on_intersection(0, false));
        assert!(board.is_observed(0));

        assert!(board.on_intersection(0, true));
        assert!(!board.is_observed(0));
        assert!(!board.on_intersection(0, true));

        assert!(board.is_observed(1));
    }

    #[test]
    fn orientation_change_replays_visible_sections_even_when_detached() {
        let mut board = SkillBoard::new(2);
        board.on_intersection(0, true);

        assert_eq!(board.on_orientation_change(|section| section == 0), vec![0]);
        assert!(!board.is_observed(0));
        assert!(board.is_observed(1));
    }

    #[test]
    fn replay_sees_targets_changed_after_the_first_run() {
        let mut markup = targets(&[Some("50%")]);
        let mut board = SkillBoard::new(1);

        assert!(board.on_intersection(0, true));
        let first = plan_bars(markup.clone());
        assert_eq!(first[0].target_width.as_deref(), Some("50%"));

        markup[0] = Some("85%".to_string());
        let replayed = board.on_orientation_change(|_| true);
        assert_eq!(replayed, vec![0]);
        let replay = plan_bars(markup.clone());
        assert_eq!(replay[0].target_width.as_deref(), Some("85%"));
    }

    #[test]
    fn unknown_section_is_ignored() {
        let mut board = SkillBoard::new(0);
        assert!(!board.on_intersection(3, true));
        assert!(board.on_orientation_change(|_| true).is_empty());
    }

    #[test]
    fn viewport_check_requires_full_containment() {
        let inside = Rect {
            top: 10.0,
            left: 0.0,
            bottom: 500.0,
            right: 300.0,
        };
        let clipped = Rect {
            top: -1.0,
            ..inside
        };
        let overflow = Rect {
            bottom: 900.0,
            ..inside
        };

        assert!(is_fully_in_viewport(inside, 320.0, 800.0));
        assert!(!is_fully_in_viewport(clipped, 320.0, 800.0));
        assert!(!is_fully_in_viewport(overflow, 320.0, 800.0));
    }
}
