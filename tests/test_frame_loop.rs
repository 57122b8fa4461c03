use std::time::Duration;

use blast_field::config::GameConfig;
use blast_field::effect::Effect;
use blast_field::frame_loop::{EndReason, FrameLoop, FrameOutcome, Pacer, GAME_OVER_TEXT};
use blast_field::geometry::{Direction, Rect, Velocity};
use blast_field::hazard::Hazard;
use blast_field::input::{HeldKeys, InputEvent, InputSnapshot, ScriptedInput};
use blast_field::projectile::Projectile;
use blast_field::render::{DrawCall, RecordingCanvas, Rgb, Sprite};

use rand::rngs::StdRng;
use rand::SeedableRng;

// Default actor occupies x 255..345, y 155..245.

fn hazard_at(x: i32, y: i32) -> Hazard {
    Hazard::new(Rect::new(x, y, 20, 20), Velocity::new(5, 5), Rgb::RED)
}

fn beam_at(x: i32, y: i32) -> Projectile {
    Projectile {
        rect: Rect::new(x, y, 40, 10),
        heading: Direction::Right,
        angle: 0.0,
        consumed: false,
    }
}

fn make_loop(hazards: Vec<Hazard>) -> FrameLoop {
    FrameLoop::with_hazards(GameConfig::default(), hazards)
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

fn fire() -> InputSnapshot {
    InputSnapshot::default().with_event(InputEvent::Fire)
}

#[derive(Default)]
struct CountingPacer {
    starts: usize,
    ends: usize,
    holds: Vec<Duration>,
}

impl Pacer for CountingPacer {
    fn frame_start(&mut self) {
        self.starts += 1;
    }

    fn frame_end(&mut self) {
        self.ends += 1;
    }

    fn hold(&mut self, duration: Duration) {
        self.holds.push(duration);
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

#[test]
fn new_game_places_actor_and_hazards() {
    let g = FrameLoop::new(GameConfig::default(), &mut StdRng::seed_from_u64(7));
    assert_eq!(g.actor.rect.center(), (300, 200));
    assert_eq!(g.actor.facing, Direction::Right);
    assert_eq!(g.hazards.len(), 5);
    assert!(g.hazards.iter().all(|h| g.field.contains(&h.rect)));
    assert!(g.projectiles.is_empty());
    assert!(g.effects.is_empty());
    assert_eq!(g.score.current_value(), 0);
    assert_eq!(g.frame, 0);
}

#[test]
fn hazard_count_follows_config() {
    let config = GameConfig {
        hazard_count: 12,
        ..GameConfig::default()
    };
    let g = FrameLoop::new(config, &mut StdRng::seed_from_u64(7));
    assert_eq!(g.hazards.len(), 12);
}

#[test]
fn same_seed_same_hazards() {
    let a = FrameLoop::new(GameConfig::default(), &mut StdRng::seed_from_u64(99));
    let b = FrameLoop::new(GameConfig::default(), &mut StdRng::seed_from_u64(99));
    let ra: Vec<_> = a.hazards.iter().map(|h| h.rect).collect();
    let rb: Vec<_> = b.hazards.iter().map(|h| h.rect).collect();
    assert_eq!(ra, rb);
}

#[test]
fn firing_from_start_heads_right() {
    let mut g = FrameLoop::new(GameConfig::default(), &mut StdRng::seed_from_u64(1));
    g.fire();
    assert_eq!(g.projectiles.len(), 1);
    let p = &g.projectiles[0];
    assert_eq!(p.velocity(), Velocity::new(5, 0));
    assert!(p.rect.left() > g.actor.rect.center().0);
}

// ── Input events ──────────────────────────────────────────────────────────────

#[test]
fn quit_stops_before_anything_happens() {
    let mut g = make_loop(vec![hazard_at(800, 400)]);
    let mut canvas = RecordingCanvas::new();
    let input = fire().with_event(InputEvent::Quit);
    assert_eq!(g.step(&input, &mut canvas).unwrap(), FrameOutcome::Quit);
    assert!(canvas.calls.is_empty());
    assert!(g.projectiles.is_empty());
    assert_eq!(g.frame, 0);
    assert_eq!(g.hazards[0].rect.x, 800);
}

#[test]
fn each_fire_event_spawns_a_beam() {
    let mut g = make_loop(vec![]);
    let mut canvas = RecordingCanvas::new();
    let input = fire().with_event(InputEvent::Fire);
    g.step(&input, &mut canvas).unwrap();
    assert_eq!(g.projectiles.len(), 2);
}

#[test]
fn idle_frame_counts_and_presents_once() {
    let mut g = make_loop(vec![]);
    let mut canvas = RecordingCanvas::new();
    assert_eq!(g.step(&idle(), &mut canvas).unwrap(), FrameOutcome::Continue);
    assert_eq!(g.frame, 1);
    assert_eq!(canvas.present_count(), 1);
    assert_eq!(canvas.calls.last(), Some(&DrawCall::Present));
}

#[test]
fn actor_moves_after_collision_checks() {
    let mut g = make_loop(vec![]);
    let mut canvas = RecordingCanvas::new();
    let input = InputSnapshot::held(HeldKeys {
        left: true,
        ..HeldKeys::NONE
    });
    g.step(&input, &mut canvas).unwrap();
    assert_eq!(g.actor.rect.center(), (295, 200));
    assert_eq!(g.actor.facing, Direction::Left);
}

// ── Projectile ↔ hazard ───────────────────────────────────────────────────────

#[test]
fn beam_hit_removes_both_and_scores() {
    // fired beam spans x 370..410, y 195..205
    let mut g = make_loop(vec![hazard_at(395, 190)]);
    let mut canvas = RecordingCanvas::new();
    assert_eq!(g.step(&fire(), &mut canvas).unwrap(), FrameOutcome::Continue);

    assert!(g.projectiles.is_empty());
    assert!(g.hazards.is_empty());
    assert_eq!(g.score.current_value(), 1);
    assert_eq!(g.effects.len(), 1);
    assert_eq!(g.effects[0].rect.center(), (405, 200));
    assert_eq!(g.effects[0].remaining, 20);
}

#[test]
fn hit_shows_victory_and_presents_immediately() {
    let mut g = make_loop(vec![hazard_at(395, 190)]);
    let mut canvas = RecordingCanvas::new();
    g.step(&fire(), &mut canvas).unwrap();

    assert_eq!(canvas.present_count(), 2);
    assert!(canvas.sprites().any(|(s, _)| *s == Sprite::ActorVictory));
    assert_eq!(
        canvas.labels().last().map(|l| l.text.as_str()),
        Some("Score: 1")
    );

    // victory lasts one frame
    canvas.clear();
    g.step(&idle(), &mut canvas).unwrap();
    assert!(canvas
        .sprites()
        .any(|(s, _)| *s == Sprite::Actor(Direction::Right)));
    assert!(!canvas.sprites().any(|(s, _)| *s == Sprite::ActorVictory));
}

#[test]
fn explosion_plays_out_then_disappears() {
    let mut g = make_loop(vec![hazard_at(395, 190)]);
    let mut canvas = RecordingCanvas::new();
    g.step(&fire(), &mut canvas).unwrap();

    for _ in 0..20 {
        g.step(&idle(), &mut canvas).unwrap();
    }
    assert_eq!(g.effects.len(), 1);
    assert!(!g.effects[0].is_active());

    g.step(&idle(), &mut canvas).unwrap();
    assert!(g.effects.is_empty());
}

#[test]
fn one_beam_takes_only_the_first_hazard() {
    let mut g = make_loop(vec![hazard_at(610, 295), hazard_at(620, 295)]);
    g.projectiles.push(beam_at(600, 300));
    let mut canvas = RecordingCanvas::new();
    g.step(&idle(), &mut canvas).unwrap();

    assert_eq!(g.score.current_value(), 1);
    assert!(g.projectiles.is_empty());
    assert_eq!(g.hazards.len(), 1);
    assert_eq!(g.hazards[0].rect.x, 625); // second hazard survived and moved
    assert_eq!(g.effects.len(), 1);
    assert_eq!(g.effects[0].rect.center(), (620, 305));
}

#[test]
fn one_hazard_takes_only_the_first_beam() {
    let mut g = make_loop(vec![hazard_at(610, 295)]);
    g.projectiles.push(beam_at(600, 300));
    g.projectiles.push(beam_at(605, 300));
    let mut canvas = RecordingCanvas::new();
    g.step(&idle(), &mut canvas).unwrap();

    assert_eq!(g.score.current_value(), 1);
    assert!(g.hazards.is_empty());
    assert_eq!(g.projectiles.len(), 1);
    assert_eq!(g.projectiles[0].rect.x, 610);
    assert_eq!(canvas.present_count(), 2);
}

#[test]
fn two_pairs_score_two() {
    let mut g = make_loop(vec![hazard_at(610, 295), hazard_at(810, 495)]);
    g.projectiles.push(beam_at(600, 300));
    g.projectiles.push(beam_at(800, 500));
    let mut canvas = RecordingCanvas::new();
    g.step(&idle(), &mut canvas).unwrap();

    assert_eq!(g.score.current_value(), 2);
    assert!(g.hazards.is_empty());
    assert!(g.projectiles.is_empty());
    assert_eq!(g.effects.len(), 2);
}

#[test]
fn touching_edges_is_not_a_hit() {
    // beam ends at x=640, hazard starts there
    let mut g = make_loop(vec![hazard_at(640, 295)]);
    g.projectiles.push(beam_at(600, 300));
    let mut canvas = RecordingCanvas::new();
    g.step(&idle(), &mut canvas).unwrap();
    assert_eq!(g.score.current_value(), 0);
    assert_eq!(g.hazards.len(), 1);
}

// ── Compaction ────────────────────────────────────────────────────────────────

#[test]
fn beam_leaving_the_top_is_compacted_next_frame() {
    let mut g = make_loop(vec![]);
    g.projectiles.push(Projectile {
        rect: Rect::new(600, 3, 10, 40),
        heading: Direction::Up,
        angle: 90.0,
        consumed: false,
    });
    let mut canvas = RecordingCanvas::new();

    g.step(&idle(), &mut canvas).unwrap();
    assert_eq!(g.projectiles.len(), 1);
    assert!(g.projectiles[0].is_expired(&g.field));
    assert!(!canvas
        .sprites()
        .any(|(s, _)| matches!(s, Sprite::Projectile(_))));

    g.step(&idle(), &mut canvas).unwrap();
    assert!(g.projectiles.is_empty());
}

#[test]
fn no_consumed_entries_survive_a_frame() {
    let mut g = FrameLoop::new(GameConfig::default(), &mut StdRng::seed_from_u64(3));
    g.hazards.retain(|h| !h.rect.overlaps(&g.actor.rect));
    let mut canvas = RecordingCanvas::new();
    for n in 0..100 {
        let input = if n % 5 == 0 { fire() } else { idle() };
        if g.step(&input, &mut canvas).unwrap() != FrameOutcome::Continue {
            break;
        }
        assert!(g.projectiles.iter().all(|p| !p.consumed));
        assert!(g.hazards.iter().all(|h| !h.consumed));
    }
}

#[test]
fn expired_effects_are_dropped_before_drawing() {
    let mut g = make_loop(vec![]);
    let mut done = Effect::spawn((500, 500), (60, 60), 1);
    done.remaining = 0;
    g.effects.push(done);
    g.effects.push(Effect::spawn((700, 500), (60, 60), 5));
    let mut canvas = RecordingCanvas::new();
    g.step(&idle(), &mut canvas).unwrap();

    assert_eq!(g.effects.len(), 1);
    assert_eq!(g.effects[0].remaining, 4);
    let explosions = canvas
        .sprites()
        .filter(|(s, _)| matches!(s, Sprite::Explosion { .. }))
        .count();
    assert_eq!(explosions, 1);
}

// ── Draw order ────────────────────────────────────────────────────────────────

#[test]
fn frame_draws_in_fixed_order() {
    let mut g = make_loop(vec![hazard_at(800, 400)]);
    g.projectiles.push(beam_at(600, 300));
    g.effects.push(Effect::spawn((900, 100), (60, 60), 20));
    let mut canvas = RecordingCanvas::new();
    g.step(&idle(), &mut canvas).unwrap();

    let order: Vec<&str> = canvas
        .calls
        .iter()
        .map(|c| match c {
            DrawCall::Sprite(Sprite::Background, _) => "background",
            DrawCall::Sprite(Sprite::Actor(_), _) => "actor",
            DrawCall::Sprite(Sprite::Projectile(_), _) => "beam",
            DrawCall::Sprite(Sprite::Hazard { .. }, _) => "hazard",
            DrawCall::Sprite(Sprite::Explosion { .. }, _) => "explosion",
            DrawCall::Sprite(_, _) => "other",
            DrawCall::Label(_) => "score",
            DrawCall::Present => "present",
        })
        .collect();
    assert_eq!(
        order,
        ["background", "actor", "beam", "hazard", "explosion", "score", "present"]
    );
}

// ── Actor ↔ hazard ────────────────────────────────────────────────────────────

#[test]
fn actor_contact_ends_the_game() {
    let mut g = make_loop(vec![hazard_at(300, 200)]);
    let mut canvas = RecordingCanvas::new();
    assert_eq!(g.step(&idle(), &mut canvas).unwrap(), FrameOutcome::GameOver);

    assert!(canvas.sprites().any(|(s, _)| *s == Sprite::ActorDefeated));
    let label = canvas.labels().next().unwrap();
    assert_eq!(label.text, GAME_OVER_TEXT);
    assert_eq!(label.position, (400, 325));
    assert_eq!(canvas.present_count(), 1);
}

#[test]
fn actor_contact_preempts_beam_hits() {
    let mut g = make_loop(vec![hazard_at(300, 200), hazard_at(395, 190)]);
    let mut canvas = RecordingCanvas::new();
    assert_eq!(g.step(&fire(), &mut canvas).unwrap(), FrameOutcome::GameOver);

    assert_eq!(g.score.current_value(), 0);
    assert_eq!(g.hazards.len(), 2);
    assert!(g.effects.is_empty());
    assert!(!canvas.sprites().any(|(s, _)| *s == Sprite::ActorVictory));
}

#[test]
fn contact_uses_position_from_previous_frame() {
    // hazard just right of the actor, actor walking into it
    let mut g = make_loop(vec![Hazard::new(
        Rect::new(346, 190, 20, 20),
        Velocity::new(-5, 0),
        Rgb::RED,
    )]);
    let walk_right = InputSnapshot::held(HeldKeys {
        right: true,
        ..HeldKeys::NONE
    });
    let mut canvas = RecordingCanvas::new();

    // frame 1: no overlap yet; both move into each other afterwards
    assert_eq!(
        g.step(&walk_right, &mut canvas).unwrap(),
        FrameOutcome::Continue
    );
    assert!(g.hazards[0].rect.overlaps(&g.actor.rect));

    // frame 2: overlap detected before anything moves
    assert_eq!(
        g.step(&walk_right, &mut canvas).unwrap(),
        FrameOutcome::GameOver
    );
}

// ── run ───────────────────────────────────────────────────────────────────────

#[test]
fn run_until_quit() {
    let mut g = make_loop(vec![]);
    let mut input = ScriptedInput::new(vec![idle(), fire(), idle()]);
    let mut canvas = RecordingCanvas::new();
    let mut pacer = CountingPacer::default();

    let ending = g.run(&mut input, &mut canvas, &mut pacer).unwrap();
    assert_eq!(ending.reason, EndReason::Quit);
    assert_eq!(ending.frames, 3);
    assert_eq!(ending.score, 0);
    assert_eq!(pacer.starts, 4);
    assert_eq!(pacer.ends, 3);
    assert!(pacer.holds.is_empty());
}

#[test]
fn run_holds_on_game_over() {
    let mut g = make_loop(vec![hazard_at(300, 200)]);
    let mut input = ScriptedInput::new(vec![idle(), idle()]);
    let mut canvas = RecordingCanvas::new();
    let mut pacer = CountingPacer::default();

    let ending = g.run(&mut input, &mut canvas, &mut pacer).unwrap();
    assert_eq!(ending.reason, EndReason::GameOver);
    assert_eq!(ending.frames, 0);
    assert_eq!(pacer.holds, vec![Duration::from_secs(5)]);
    assert_eq!(pacer.ends, 0);
    assert_eq!(input.remaining(), 1);
}

#[test]
fn run_reports_score_at_game_over() {
    // beam destroys the far hazard first; the near one then reaches the actor
    let mut g = make_loop(vec![
        hazard_at(395, 190),
        Hazard::new(Rect::new(356, 250, 20, 20), Velocity::new(-5, -5), Rgb::RED),
    ]);
    let mut input = ScriptedInput::new(vec![fire(), idle(), idle(), idle()]);
    let mut canvas = RecordingCanvas::new();
    let mut pacer = CountingPacer::default();

    let ending = g.run(&mut input, &mut canvas, &mut pacer).unwrap();
    assert_eq!(ending.reason, EndReason::GameOver);
    assert_eq!(ending.score, 1);
}
