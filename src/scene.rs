//! Scene progression: find → talk → follow → cake.
//!
//! The whole session lives in one [`GameState`] value.  Both ways of changing
//! it, a player [`Command`] and the passage of time, take the state by value
//! and hand back the next one, so the host loop only ever holds a single
//! instance and never reaches into its fields.

use crate::confetti::{self, CONFETTI_COUNT, Confetti};
use crate::content::Content;
use crate::dialogue::{DialogueBox, DialogueSequencer, DialogueStep};
use crate::geometry::{Playfield, within_distance};
use crate::scheduler::Step;
use crate::world::{Direction, Flower, Npc, Player, TALK_DISTANCE};

/// The player walks into the cake scene once x passes `width - CAKE_LINE_INSET`.
pub const CAKE_LINE_INSET: f32 = 200.0;
/// Animation timer rate in radians per second (0.05 per frame at 60 Hz).
pub const ANIM_RATE: f32 = 3.0;
/// Seed for the confetti shower.
pub const CONFETTI_SEED: u64 = 0x00C0_FFEE;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scene {
    /// Free movement, looking for the active NPC.
    Find,
    /// Dialogue playback; movement is locked.
    Talk,
    /// The player walks right on their own.
    Follow,
    /// Final celebration.  Terminal.
    Cake,
}

impl Scene {
    pub fn accepts_movement(self) -> bool {
        self == Scene::Find
    }

    /// Where a finished conversation leads: back to `Find` while NPCs remain,
    /// otherwise on to `Follow`.
    pub fn after_dialogue(next_npc: usize, npc_count: usize) -> Scene {
        if next_npc < npc_count { Scene::Find } else { Scene::Follow }
    }

    /// `Follow` becomes `Cake` once `x` is past the cake line of `field`.
    /// Every other scene is returned unchanged.
    pub fn after_walk(self, x: f32, field: &Playfield) -> Scene {
        match self {
            Scene::Follow if x > field.width - CAKE_LINE_INSET => Scene::Cake,
            other => other,
        }
    }
}

/// A discrete player request delivered by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Move(Direction),
    AdvanceDialogue,
}

/// Complete state of one play session.
#[derive(Clone, Debug)]
pub struct GameState {
    scene: Scene,
    field: Playfield,
    player: Player,
    npcs: Vec<Npc>,
    npc_index: usize,
    npc_active: bool,
    has_moved: bool,
    dialogue: DialogueSequencer,
    dialogue_box: DialogueBox,
    flowers: Vec<Flower>,
    confetti: Vec<Confetti>,
    anim_time: f32,
}

impl GameState {
    pub fn new(content: &Content) -> Self {
        let field = Playfield::BASE;
        let [px, py] = content.player_start;
        Self {
            scene: Scene::Find,
            field,
            player: Player::new(px, py),
            npcs: content.npcs.iter().map(|n| Npc::new(n.position[0], n.position[1])).collect(),
            npc_index: 0,
            npc_active: true,
            has_moved: false,
            dialogue: DialogueSequencer::new(content.dialogue_lines()),
            dialogue_box: DialogueBox::new(content.speaker.clone()),
            flowers: content
                .flowers
                .iter()
                .map(|&[x, y]| Flower { pos: glam::Vec2::new(x, y) })
                .collect(),
            confetti: confetti::spawn(CONFETTI_COUNT, &field, CONFETTI_SEED),
            anim_time: 0.0,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn scene(&self) -> Scene { self.scene }
    pub fn playfield(&self) -> &Playfield { &self.field }
    pub fn player(&self) -> &Player { &self.player }
    pub fn npcs(&self) -> &[Npc] { &self.npcs }
    pub fn npc_index(&self) -> usize { self.npc_index }
    pub fn has_moved(&self) -> bool { self.has_moved }
    pub fn dialogue(&self) -> &DialogueSequencer { &self.dialogue }
    pub fn dialogue_box(&self) -> &DialogueBox { &self.dialogue_box }
    pub fn flowers(&self) -> &[Flower] { &self.flowers }
    pub fn confetti(&self) -> &[Confetti] { &self.confetti }
    pub fn anim_time(&self) -> f32 { self.anim_time }

    /// The NPC the player is currently looking for, if it is on the field.
    pub fn active_npc(&self) -> Option<&Npc> {
        if self.npc_active { self.npcs.get(self.npc_index) } else { None }
    }

    /// Whether the player's limbs should swing this frame.
    pub fn player_walking(&self) -> bool {
        matches!(self.scene, Scene::Find | Scene::Follow)
    }

    // ── Transitions ────────────────────────────────────────────────────────

    /// Apply one player command.
    pub fn apply(mut self, command: Command) -> Self {
        match command {
            Command::Move(dir) => {
                self.has_moved = true;
                if self.scene.accepts_movement() {
                    self.player = self.player.step(dir, &self.field);
                }
            }
            Command::AdvanceDialogue => {
                if self.scene == Scene::Talk {
                    self.advance_dialogue();
                }
            }
        }
        self
    }

    /// Advance the simulation by `dt` seconds.
    pub fn update(mut self, dt: f32) -> Self {
        self.anim_time += ANIM_RATE * dt;

        if self.has_moved {
            let near = self
                .active_npc()
                .is_some_and(|npc| within_distance(self.player.pos, npc.pos, TALK_DISTANCE));
            if near {
                self.begin_talk();
            }
        }

        if self.scene == Scene::Follow {
            self.player = self.player.walk_right(dt, &self.field);
            self.scene = self.scene.after_walk(self.player.pos.x, &self.field);
        }

        if self.scene == Scene::Cake {
            for c in &mut self.confetti {
                c.fall(dt, &self.field);
            }
        }

        self
    }

    fn begin_talk(&mut self) {
        log::debug!("[scene] talking to NPC {}", self.npc_index);
        self.npc_active = false;
        self.scene = Scene::Talk;
        self.dialogue.reset();
        self.advance_dialogue();
    }

    fn advance_dialogue(&mut self) {
        match self.dialogue.advance(self.npc_index) {
            DialogueStep::Show(line) => self.dialogue_box.show(line),
            DialogueStep::Exhausted => {
                self.dialogue_box.hide();
                let count = self.dialogue.npc_count();
                if self.npc_index < count {
                    self.npc_index += 1;
                }
                self.scene = Scene::after_dialogue(self.npc_index, count);
                if self.scene == Scene::Find {
                    self.npc_active = true;
                }
                log::debug!("[scene] dialogue done, now {:?} (npc {})", self.scene, self.npc_index);
            }
        }
    }
}

impl Step for GameState {
    fn step(self, dt: f32) -> Self {
        self.update(dt)
    }
}
