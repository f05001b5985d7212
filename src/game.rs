//! Glue between the engine loop and the pure game state.

use crate::content::Content;
use crate::draw::{self, FrameContext};
use crate::engine::{Engine, Game};
use crate::input::{Action, ActionMap, InputState, default_bindings};
use crate::scene::{Command, GameState, Scene};
use crate::scheduler::FixedStep;

/// Simulation rate.
pub const UPDATES_PER_SECOND: u32 = 60;

pub struct Cakewalk {
    sim: FixedStep<GameState>,
    bindings: ActionMap<Action>,
    content: Content,
    last_scene: Scene,
}

impl Cakewalk {
    pub fn new(content: Content) -> Self {
        let state = GameState::new(&content);
        Self {
            last_scene: state.scene(),
            sim: FixedStep::new(state, UPDATES_PER_SECOND),
            bindings: default_bindings(),
            content,
        }
    }

    pub fn state(&self) -> &GameState {
        self.sim.state()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Apply every action pressed this frame, in binding order.  Returns
    /// `true` when quitting was requested.
    pub fn handle_input(&mut self, input: &InputState) -> bool {
        let mut quit = false;
        for action in self.bindings.triggered(input) {
            match action {
                Action::Move(dir) => self.sim.map(|s| s.apply(Command::Move(dir))),
                Action::Advance => self.sim.map(|s| s.apply(Command::AdvanceDialogue)),
                Action::Quit => quit = true,
            }
        }
        quit
    }

    /// Run the simulation for `elapsed` wall-clock seconds.
    pub fn tick(&mut self, elapsed: f32) {
        self.sim.advance(elapsed);

        let scene = self.sim.state().scene();
        if scene != self.last_scene {
            log::info!("[game] scene {:?} -> {:?}", self.last_scene, scene);
            self.last_scene = scene;
        }
    }
}

impl Game for Cakewalk {
    fn on_enter(&mut self, engine: &mut Engine) {
        log::info!(
            "[game] starting with {} NPCs at scale {:.2}",
            self.content.npcs.len(),
            engine.scale()
        );
    }

    fn update(&mut self, engine: &mut Engine, elapsed: f32) {
        if self.handle_input(&engine.input) {
            engine.request_quit();
            return;
        }
        self.tick(elapsed);
    }

    fn render(&mut self, engine: &mut Engine) {
        let list = {
            let ctx = FrameContext {
                scale: engine.scale(),
                font: engine.font(),
                cake_message: &self.content.cake_message,
            };
            draw::frame(self.sim.state(), &ctx)
        };
        engine.submit(list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;

    fn game() -> Cakewalk {
        Cakewalk::new(Content::builtin().unwrap())
    }

    fn pressing(key: KeyCode) -> InputState {
        let mut input = InputState::new();
        input.keys_pressed.insert(key);
        input
    }

    #[test]
    fn arrow_press_moves_player_one_step() {
        let mut g = game();
        let before = g.state().player().pos.x;
        assert!(!g.handle_input(&pressing(KeyCode::ArrowRight)));
        assert_eq!(g.state().player().pos.x, before + crate::world::MOVE_STEP);
        assert!(g.state().has_moved());
    }

    #[test]
    fn escape_requests_quit_without_touching_state() {
        let mut g = game();
        assert!(g.handle_input(&pressing(KeyCode::Escape)));
        assert!(!g.state().has_moved());
    }

    #[test]
    fn tick_runs_whole_steps_only() {
        let mut g = game();
        g.tick(0.5 / UPDATES_PER_SECOND as f32);
        assert_eq!(g.state().anim_time(), 0.0);
        g.tick(1.0 / UPDATES_PER_SECOND as f32);
        assert!(g.state().anim_time() > 0.0);
    }
}
