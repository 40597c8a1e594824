//! Stage progression and scoring.
//!
//! The board pipeline only reports destroyed counts; everything about
//! points lives here. One increment is awarded per three gems in a batch.
//! Total score accumulates the running stage score on every increment,
//! so later increments within a stage are worth more. That accounting
//! is intentional and kept as is.

use tui_gems_types::{
    COMBO_SCORE_MULTIPLIER, INITIAL_SCORE_TARGET, MATCH_SCORE_VALUE, SCORE_INCREASE_RATE,
    STAGE_DURATION_MS,
};

#[derive(Debug, Clone)]
pub struct StageScore {
    total: u32,
    stage_score: u32,
    target: u32,
    stage: u32,
    time_left_ms: u32,
    stage_duration_ms: u32,
    game_over: bool,
}

impl Default for StageScore {
    fn default() -> StageScore {
        StageScore::new(STAGE_DURATION_MS)
    }
}

impl StageScore {
    pub fn new(stage_duration_ms: u32) -> StageScore {
        StageScore {
            total: 0,
            stage_score: 0,
            target: INITIAL_SCORE_TARGET,
            stage: 1,
            time_left_ms: stage_duration_ms,
            stage_duration_ms,
            game_over: false,
        }
    }

    /// Feed one resolution batch: one score increment per three destroyed
    /// gems, the pipeline's combo parameter fixed at zero.
    pub fn on_resolved(&mut self, destroyed: u32) {
        for _ in 0..destroyed / 3 {
            self.add_score(0);
        }
    }

    /// Award one increment. A non-zero combo multiplies the increment by
    /// `combo * 2`; reaching the stage target advances the stage, resets
    /// the stage score and restarts the countdown.
    pub fn add_score(&mut self, combo: u32) {
        if self.game_over {
            return;
        }
        let combo_score = combo * COMBO_SCORE_MULTIPLIER;
        let increment = MATCH_SCORE_VALUE * if combo_score > 0 { combo_score } else { 1 };
        self.stage_score += increment;
        self.total += self.stage_score;
        if self.stage_score >= self.target {
            self.stage_score = 0;
            self.target += Self::target_growth();
            self.stage += 1;
            self.time_left_ms = self.stage_duration_ms;
        }
    }

    fn target_growth() -> u32 {
        INITIAL_SCORE_TARGET + (INITIAL_SCORE_TARGET as f32 * SCORE_INCREASE_RATE) as u32
    }

    /// Run the stage countdown. Hitting zero ends the game; scoring and
    /// the countdown both freeze until [`StageScore::reset`].
    pub fn tick(&mut self, dt_ms: u32) {
        if self.game_over {
            return;
        }
        self.time_left_ms = self.time_left_ms.saturating_sub(dt_ms);
        if self.time_left_ms == 0 {
            self.game_over = true;
        }
    }

    pub fn reset(&mut self) {
        *self = StageScore::new(self.stage_duration_ms);
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn stage_score(&self) -> u32 {
        self.stage_score
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn time_left_ms(&self) -> u32 {
        self.time_left_ms
    }

    /// Fraction of the stage countdown remaining, for the HUD time bar.
    pub fn time_fraction(&self) -> f32 {
        if self.stage_duration_ms == 0 {
            return 0.0;
        }
        self.time_left_ms as f32 / self.stage_duration_ms as f32
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_destroyed_gems_award_one_increment() {
        let mut score = StageScore::default();
        score.on_resolved(3);
        assert_eq!(score.stage_score(), 10);
        assert_eq!(score.total(), 10);
    }

    #[test]
    fn increments_batch_by_threes() {
        let mut score = StageScore::default();
        score.on_resolved(5);
        assert_eq!(score.stage_score(), 10);

        score.on_resolved(6);
        assert_eq!(score.stage_score(), 30);
        // Total compounds the running stage score per increment.
        assert_eq!(score.total(), 10 + 20 + 30);
    }

    #[test]
    fn sub_run_batches_award_nothing() {
        let mut score = StageScore::default();
        score.on_resolved(2);
        assert_eq!(score.total(), 0);
    }

    #[test]
    fn combo_multiplies_the_increment() {
        let mut score = StageScore::default();
        score.add_score(2);
        assert_eq!(score.stage_score(), 40);
    }

    #[test]
    fn reaching_the_target_advances_the_stage() {
        let mut score = StageScore::default();
        score.tick(1_000);
        for _ in 0..10 {
            score.add_score(0);
        }
        assert_eq!(score.stage(), 2);
        assert_eq!(score.stage_score(), 0);
        assert_eq!(score.target(), 230);
        assert_eq!(score.total(), 550);
        // The countdown restarts with the new stage.
        assert_eq!(score.time_left_ms(), STAGE_DURATION_MS);
    }

    #[test]
    fn countdown_expiry_freezes_the_game() {
        let mut score = StageScore::new(1_000);
        score.tick(999);
        assert!(!score.game_over());
        score.tick(1);
        assert!(score.game_over());

        score.on_resolved(9);
        assert_eq!(score.total(), 0);
        score.tick(50);
        assert_eq!(score.time_left_ms(), 0);
    }

    #[test]
    fn reset_restores_a_fresh_stage() {
        let mut score = StageScore::new(2_000);
        score.on_resolved(6);
        score.tick(2_000);
        assert!(score.game_over());

        score.reset();
        assert!(!score.game_over());
        assert_eq!(score.total(), 0);
        assert_eq!(score.stage(), 1);
        assert_eq!(score.target(), INITIAL_SCORE_TARGET);
        assert_eq!(score.time_left_ms(), 2_000);
    }
}
