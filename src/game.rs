use crate::celebration::HitEffect;
use crate::input::{InputController, InputMode, PointerEvent};
use crate::session::{DisplayState, Session};
use crate::world::{World, WorldEvent};

/// Session, world, input and hit effect wired together the way every host
/// drives them. On each tick the world moves first, so a collision is scored
/// against the countdown the player saw during that tick.
#[derive(Debug)]
pub struct Game {
    pub session: Session,
    pub world: World,
    pub input: InputController,
    pub effect: HitEffect,
    /// What the countdown showed after the last tick
    pub display: DisplayState,
    pub best_score: Option<u32>,
}

impl Game {
    pub fn new(mode: InputMode) -> Self {
        let session = Session::new();
        Self {
            display: session.display_state(),
            session,
            world: World::new(),
            input: InputController::new(mode),
            effect: HitEffect::new(),
            best_score: None,
        }
    }

    /// Fresh session, striker back at the spawn point
    pub fn start(&mut self) {
        self.session.start();
        self.display = self.session.display_state();
        self.world.reset_striker();
        self.effect.stop();
    }

    pub fn on_tick(&mut self) {
        for event in self.world.on_tick() {
            match event {
                WorldEvent::BellHit => self.on_bell_hit(),
                WorldEvent::StrikerReset => tracing::debug!("striker left the field"),
            }
        }

        if self.session.is_ticking() {
            self.display = self.session.tick(Session::tick_secs());
        }

        self.effect.update(Session::tick_secs());
    }

    fn on_bell_hit(&mut self) {
        if let Some(score) = self.session.register_hit() {
            self.best_score = Some(self.best_score.map_or(score, |best| best.max(score)));
            self.effect.start(self.world.bell.pos, score);
        }
    }

    pub fn on_pointer(&mut self, event: PointerEvent) {
        self.input.handle(event, &mut self.world);
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.input.set_mode(mode, &mut self.world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{EndReason, Phase};
    use crate::world::{Vec2, STRIKER_SPAWN};

    fn hit_after(game: &mut Game, ticks: usize) {
        game.start();
        for _ in 0..ticks {
            game.on_tick();
        }
        game.on_pointer(PointerEvent::Moved(Vec2::new(400.0, 350.0)));
        game.on_tick();
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = Game::new(InputMode::Follow);

        assert_eq!(game.session.phase(), Phase::Idle);
        assert_eq!(game.display, DisplayState::Time(10.0));
        assert_eq!(game.input.mode(), InputMode::Follow);
        assert_eq!(game.best_score, None);
    }

    #[test]
    fn test_collision_is_scored_before_the_clock_moves() {
        let mut game = Game::new(InputMode::Follow);

        hit_after(&mut game, 30);

        assert_eq!(game.session.phase(), Phase::Ended(EndReason::Hit));
        assert_eq!(game.session.remaining_time(), 7.0);
        assert_eq!(game.session.score(), 3000);
        assert!(game.effect.is_active);
    }

    #[test]
    fn test_best_score_keeps_the_highest() {
        let mut game = Game::new(InputMode::Follow);

        hit_after(&mut game, 80);
        hit_after(&mut game, 30);

        assert_eq!(game.session.score(), 3000);
        assert_eq!(game.best_score, Some(8000));
    }

    #[test]
    fn test_start_clears_effect_and_resets_striker() {
        let mut game = Game::new(InputMode::Follow);
        hit_after(&mut game, 10);
        assert!(game.effect.is_active);

        game.set_input_mode(InputMode::Drag);
        game.start();

        assert!(!game.effect.is_active);
        assert_eq!(game.world.striker.pos, STRIKER_SPAWN);
        assert_eq!(game.session.remaining_time(), 10.0);
    }

    #[test]
    fn test_ticks_stop_reaching_session_after_timeout() {
        let mut game = Game::new(InputMode::Drag);
        game.start();

        for _ in 0..120 {
            game.on_tick();
        }

        assert_eq!(game.session.phase(), Phase::Ended(EndReason::Timeout));
        assert_eq!(game.display, DisplayState::Masked);
        assert_eq!(game.session.remaining_time(), 0.0);
    }
}
