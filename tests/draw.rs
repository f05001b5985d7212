use cakewalk::confetti::CONFETTI_COUNT;
use cakewalk::content::{Content, NpcContent};
use cakewalk::draw::{self, DrawCmd, DrawList, FrameContext, ImageId, WALL};
use cakewalk::renderer::text::Font;
use cakewalk::scene::{Command, GameState, Scene};
use cakewalk::world::Direction;

const DT: f32 = 1.0 / 60.0;

fn font() -> Font {
    Font::grid(16, 24, 256, 384)
}

fn render(state: &GameState, scale: f32, message: &str) -> DrawList {
    let font = font();
    draw::frame(state, &FrameContext { scale, font: &font, cake_message: message })
}

/// One NPC right next to the player so a single move starts the talk.
fn close_npc_content() -> Content {
    let mut c = Content::builtin().unwrap();
    c.player_start = [680.0, 200.0];
    c.npcs = vec![NpcContent { position: [700.0, 200.0], lines: vec!["hello there".into()] }];
    c
}

fn walls(list: &DrawList) -> usize {
    list.iter()
        .filter(|c| matches!(c, DrawCmd::Rect { color, .. } if *color == WALL))
        .count()
}

fn images(list: &DrawList) -> Vec<(ImageId, bool)> {
    list.iter()
        .filter_map(|c| match c {
            DrawCmd::Image { id, circle_clip, .. } => Some((*id, *circle_clip)),
            _ => None,
        })
        .collect()
}

fn texts(list: &DrawList) -> Vec<String> {
    list.iter()
        .filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn meadow_has_four_walls_and_round_heads() {
    let state = GameState::new(&Content::builtin().unwrap());
    let list = render(&state, 1.0, "");
    assert_eq!(walls(&list), 4);
    assert_eq!(images(&list), vec![(ImageId::Player, true), (ImageId::Npc, true)]);
    assert!(texts(&list).is_empty());
}

#[test]
fn background_is_first_and_fills_the_surface() {
    let state = GameState::new(&Content::builtin().unwrap());
    let list = render(&state, 1.5, "");
    match &list.commands[0] {
        DrawCmd::Rect { x, y, w, h, .. } => {
            assert_eq!((*x, *y), (0.0, 0.0));
            assert!((w - 1200.0).abs() < 1e-3 && (h - 900.0).abs() < 1e-3);
        }
        other => panic!("expected background rect, got {other:?}"),
    }
}

#[test]
fn flowers_are_five_circles_each() {
    let content = Content::builtin().unwrap();
    let state = GameState::new(&content);
    let list = render(&state, 1.0, "");
    let circles = list.iter().filter(|c| matches!(c, DrawCmd::Circle { .. })).count();
    assert_eq!(circles, content.flowers.len() * 5);
}

#[test]
fn talk_shows_box_text_and_speaker_without_npc() {
    let c = close_npc_content();
    let state = GameState::new(&c).apply(Command::Move(Direction::Right)).update(DT);
    assert_eq!(state.scene(), Scene::Talk);

    let list = render(&state, 1.0, "");
    assert_eq!(walls(&list), 4);
    assert_eq!(images(&list), vec![(ImageId::Player, true)]);
    let texts = texts(&list);
    assert_eq!(texts, vec!["hello there".to_string(), format!("{}:", c.speaker)]);
}

#[test]
fn player_limbs_rest_when_not_walking() {
    let c = close_npc_content();
    let state = GameState::new(&c).apply(Command::Move(Direction::Right)).update(DT);
    let list = render(&state, 1.0, "");
    let p = state.player().pos;

    // Arms collapse to a point at rest, so the left arm starts and ends at x - 20.
    let left_arm = list.iter().find_map(|c| match c {
        DrawCmd::Line { from, to, .. } if from[1] == p.y + 40.0 && from[0] == p.x - 20.0 => Some(*to),
        _ => None,
    });
    assert_eq!(left_arm, Some([p.x - 20.0, p.y + 40.0]));
}

#[test]
fn cake_scene_has_no_walls_and_full_confetti() {
    let c = close_npc_content();
    let state = GameState::new(&c)
        .apply(Command::Move(Direction::Right))
        .update(DT)
        .apply(Command::AdvanceDialogue)
        .update(DT);
    assert_eq!(state.scene(), Scene::Cake);

    let list = render(&state, 1.0, "Happy birthday to you, have a lovely day");
    assert_eq!(walls(&list), 0);
    assert_eq!(images(&list), vec![(ImageId::Cake, false)]);
    let circles = list.iter().filter(|c| matches!(c, DrawCmd::Circle { .. })).count();
    assert_eq!(circles, CONFETTI_COUNT);
    assert_eq!(texts(&list).join(" "), "Happy birthday to you, have a lovely day");
}

#[test]
fn cake_message_lines_are_centred() {
    let c = close_npc_content();
    let state = GameState::new(&c)
        .apply(Command::Move(Direction::Right))
        .update(DT)
        .apply(Command::AdvanceDialogue)
        .update(DT);
    let font = font();
    let list = render(&state, 1.0, "short");
    let (x, text, size) = list
        .iter()
        .find_map(|c| match c {
            DrawCmd::Text { x, text, size, .. } => Some((*x, text.clone(), *size)),
            _ => None,
        })
        .unwrap();
    let w = font.measure(&text, size);
    assert!((x + w / 2.0 - 400.0).abs() < 1e-3);
}

#[test]
fn scale_multiplies_every_coordinate() {
    let state = GameState::new(&Content::builtin().unwrap());
    let one = render(&state, 1.0, "");
    let two = render(&state, 2.0, "");
    assert_eq!(one.len(), two.len());
    for (a, b) in one.iter().zip(two.iter()) {
        if let (DrawCmd::Circle { cx, cy, r, .. }, DrawCmd::Circle { cx: cx2, cy: cy2, r: r2, .. }) = (a, b) {
            assert_eq!((cx * 2.0, cy * 2.0, r * 2.0), (*cx2, *cy2, *r2));
        }
    }
}
