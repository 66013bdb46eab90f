//! Treasure counter overlay state.

use reefscape_scene::SceneEvent;

/// How long the "found treasure" toast stays up, in scene seconds.
pub const TOAST_SECONDS: f32 = 2.0;
/// How long the opening instructions stay up.
pub const INSTRUCTION_SECONDS: f32 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub expires_at: f32,
}

/// Counts opened chests from the scene's event log.
///
/// Times are scene elapsed seconds, so a paused or replayed scene shows the
/// same overlay.
#[derive(Debug, Clone, Default)]
pub struct TreasureCounter {
    found: usize,
    total: usize,
    toast: Option<Toast>,
    now: f32,
}

impl TreasureCounter {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Consume events. Returns how many chest openings were seen.
    pub fn observe<'a>(&mut self, events: impl IntoIterator<Item = &'a SceneEvent>) -> usize {
        let mut seen = 0;
        for event in events {
            match event {
                SceneEvent::ChestOpened { opened, total, .. } => {
                    self.found = self.found.max(*opened);
                    self.total = *total;
                    self.toast = Some(Toast {
                        message: "You found treasure!".to_string(),
                        expires_at: self.now + TOAST_SECONDS,
                    });
                    seen += 1;
                }
                SceneEvent::Advanced { elapsed, .. } => self.tick(*elapsed),
                _ => {}
            }
        }
        seen
    }

    /// Move the overlay clock to `elapsed`, dropping an expired toast.
    pub fn tick(&mut self, elapsed: f32) {
        self.now = elapsed;
        if self.toast.as_ref().is_some_and(|t| elapsed >= t.expires_at) {
            self.toast = None;
        }
    }

    pub fn found(&self) -> usize {
        self.found
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn all_found(&self) -> bool {
        self.total > 0 && self.found >= self.total
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn show_instructions(&self) -> bool {
        self.now < INSTRUCTION_SECONDS
    }

    /// One-line overlay text.
    pub fn label(&self) -> String {
        let mut label = format!("Treasures {} / {}", self.found, self.total);
        if let Some(toast) = &self.toast {
            label.push_str("  ");
            label.push_str(&toast.message);
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reefscape_common::EntityId;

    fn opened(opened: usize) -> SceneEvent {
        SceneEvent::ChestOpened {
            chest: EntityId::new(),
            opened,
            total: 3,
        }
    }

    fn advanced(frame: u64, elapsed: f32) -> SceneEvent {
        SceneEvent::Advanced { frame, elapsed }
    }

    #[test]
    fn counts_up_to_all_found() {
        let mut counter = TreasureCounter::new(3);
        assert_eq!(counter.label(), "Treasures 0 / 3");
        assert!(!counter.all_found());

        let seen = counter.observe(&[opened(1), opened(2)]);
        assert_eq!(seen, 2);
        assert_eq!(counter.found(), 2);
        counter.observe(&[opened(3)]);
        assert!(counter.all_found());
    }

    #[test]
    fn toast_expires_after_two_seconds() {
        let mut counter = TreasureCounter::new(3);
        counter.observe(&[advanced(1, 10.0), opened(1)]);
        assert_eq!(counter.toast().map(|t| t.expires_at), Some(12.0));
        assert!(counter.label().contains("You found treasure!"));

        counter.observe(&[advanced(2, 11.9)]);
        assert!(counter.toast().is_some());
        counter.observe(&[advanced(3, 12.0)]);
        assert!(counter.toast().is_none());
        assert_eq!(counter.label(), "Treasures 1 / 3");
    }

    #[test]
    fn new_opening_restarts_toast() {
        let mut counter = TreasureCounter::new(3);
        counter.observe(&[advanced(1, 1.0), opened(1), advanced(2, 2.5), opened(2)]);
        assert_eq!(counter.toast().map(|t| t.expires_at), Some(4.5));
    }

    #[test]
    fn ignores_other_events() {
        let mut counter = TreasureCounter::new(3);
        let hover = SceneEvent::HoverChanged {
            chest: EntityId::new(),
            hovered: true,
        };
        assert_eq!(counter.observe(&[hover]), 0);
        assert_eq!(counter.found(), 0);
    }

    #[test]
    fn instructions_hide_after_eight_seconds() {
        let mut counter = TreasureCounter::new(3);
        assert!(counter.show_instructions());
        counter.tick(8.0);
        assert!(!counter.show_instructions());
    }

    #[test]
    fn empty_scene_is_never_all_found() {
        assert!(!TreasureCounter::new(0).all_found());
    }
}
