//! Tutorial progression
//!
//! A short ordered list of stages, each gated on something the player has
//! done. The simulation only reports stage changes; showing the text is up
//! to the host.

use serde::{Deserialize, Serialize};

/// Tutorial stages, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TutorialStage {
    Move,
    Shoot,
    Glitch,
    Possess,
    Complete,
}

impl TutorialStage {
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Instruction shown while the stage is active
    pub fn text(self) -> &'static str {
        match self {
            TutorialStage::Move => "Use the arrow keys to fly your ship",
            TutorialStage::Shoot => "Press X to shoot the ship ahead until it is weak",
            TutorialStage::Glitch => "Hold Z to glitch",
            TutorialStage::Possess => "Glitch close to the weakened ship to take it over",
            TutorialStage::Complete => "You're on your own now. Survive!",
        }
    }

    fn next(self) -> Self {
        match self {
            TutorialStage::Move => TutorialStage::Shoot,
            TutorialStage::Shoot => TutorialStage::Glitch,
            TutorialStage::Glitch => TutorialStage::Possess,
            TutorialStage::Possess | TutorialStage::Complete => TutorialStage::Complete,
        }
    }
}

/// Player actions seen so far, and the current stage
#[derive(Debug, Clone, Default)]
pub struct TutorialProgress {
    stage: Option<TutorialStage>,
    pub has_moved: bool,
    pub has_shot: bool,
    pub has_glitched: bool,
    pub has_possessed: bool,
}

impl TutorialProgress {
    /// Start at the first stage
    pub fn start() -> Self {
        Self {
            stage: Some(TutorialStage::Move),
            ..Self::default()
        }
    }

    /// A progress tracker for a run with no tutorial
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Option<TutorialStage> {
        self.stage
    }

    /// True while the tutorial is running (before `Complete`)
    pub fn is_active(&self) -> bool {
        matches!(self.stage, Some(stage) if stage != TutorialStage::Complete)
    }

    fn gate_passed(&self, stage: TutorialStage) -> bool {
        match stage {
            TutorialStage::Move => self.has_moved,
            TutorialStage::Shoot => self.has_shot,
            TutorialStage::Glitch => self.has_glitched,
            TutorialStage::Possess => self.has_possessed,
            TutorialStage::Complete => false,
        }
    }

    /// Move to the next stage if the current one's gate has been passed.
    /// Returns the stage just entered.
    pub fn advance(&mut self) -> Option<TutorialStage> {
        let current = self.stage?;
        if !self.gate_passed(current) {
            return None;
        }
        let next = current.next();
        self.stage = Some(next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_advance_in_order() {
        let mut t = TutorialProgress::start();
        assert_eq!(t.advance(), None);

        t.has_shot = true; // out of order: not yet relevant
        assert_eq!(t.advance(), None);

        t.has_moved = true;
        assert_eq!(t.advance(), Some(TutorialStage::Shoot));
        assert_eq!(t.advance(), Some(TutorialStage::Glitch));
        assert_eq!(t.advance(), None);

        t.has_glitched = true;
        t.has_possessed = true;
        assert_eq!(t.advance(), Some(TutorialStage::Possess));
        assert!(t.is_active());
        assert_eq!(t.advance(), Some(TutorialStage::Complete));
        assert!(!t.is_active());
        assert_eq!(t.advance(), None);
    }

    #[test]
    fn test_inactive_never_advances() {
        let mut t = TutorialProgress::inactive();
        t.has_moved = true;
        assert_eq!(t.advance(), None);
        assert!(!t.is_active());
        assert_eq!(t.stage(), None);
    }

    #[test]
    fn test_stage_indices() {
        assert_eq!(TutorialStage::Move.index(), 0);
        assert_eq!(TutorialStage::Complete.index(), 4);
    }
}
