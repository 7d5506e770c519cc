//! Fixed timestep update pipeline
//!
//! `tick` advances the whole game by one 60 Hz frame: input to the player,
//! actor movement (each actor advances its own bullets), combat
//! resolution, then phase transitions. Randomness comes exclusively from
//! the state's seeded RNG, so identical input sequences replay identically.

use crate::consts::{
    DEFAULT_PLAYER_NAME, LEVEL_TRANSITION_FRAMES, MAX_NAME_LEN, POINTS_PER_ENEMY,
};

use super::state::{GameEvent, GamePhase, GameState};

/// One frame of input, snapshotted by the frontend.
///
/// Held-state booleans and edge-triggered flags are deliberately separate
/// query types: movement and fire repeat for as long as the key is down,
/// everything else acts once per key press.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    // Held every frame the key is down
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,

    // Edge-triggered, one frame per key press
    pub pause: bool,
    pub restart: bool,
    pub confirm: bool,
    pub cancel: bool,
    pub show_highscores: bool,
    pub backspace: bool,
    /// Any key at all went down this frame
    pub any_key: bool,
    /// Printable characters typed this frame (name entry)
    pub text: Vec<char>,
}

/// Advance the game by one fixed frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.frame += 1;

    match state.phase {
        GamePhase::Running => run_frame(state, input, &mut events),
        GamePhase::Paused => {
            if input.pause {
                state.phase = GamePhase::Running;
            }
        }
        GamePhase::Victory => {
            state.transition_frames += 1;
            if input.confirm || state.transition_frames >= LEVEL_TRANSITION_FRAMES {
                events.push(state.advance_level());
            }
        }
        GamePhase::EnterName => enter_name_frame(state, input, &mut events),
        GamePhase::ShowHighScores => {
            if input.any_key {
                state.full_restart();
                events.push(GameEvent::LevelStarted { index: 0 });
            }
        }
        GamePhase::CampaignComplete => {}
    }

    events
}

/// One frame of live gameplay
fn run_frame(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if input.pause {
        state.phase = GamePhase::Paused;
        return;
    }
    if input.restart {
        state.restart_level();
        events.push(GameEvent::LevelStarted {
            index: state.level_index,
        });
        return;
    }
    if input.show_highscores {
        state.phase = GamePhase::ShowHighScores;
        return;
    }

    state.player.handle_input(input, &state.walls);
    if input.fire {
        state.player.shoot();
    }
    state.player.update(&mut state.walls);
    for enemy in &mut state.enemies {
        enemy.update(&mut state.walls, &mut state.rng);
    }

    resolve_player_bullets(state, events);
    resolve_enemy_bullets(state, events);

    if state.player.lives <= 0 {
        state.phase = GamePhase::EnterName;
        state.name_buffer.clear();
        log::info!("player down, final score {}", state.player.score);
    }
    if state.enemies.is_empty() {
        state.phase = GamePhase::Victory;
        state.transition_frames = 0;
        events.push(GameEvent::LevelCleared {
            index: state.level_index,
        });
    }
}

/// Player bullets vs enemies: the first overlapping enemy eats the bullet,
/// both are removed and the reward is scored. Flags defer enemy removal
/// until after the scan.
fn resolve_player_bullets(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let mut dead = vec![false; state.enemies.len()];
    let enemies = &state.enemies;
    state.player.bullets.retain(|bullet| {
        for (i, enemy) in enemies.iter().enumerate() {
            if !dead[i] && bullet.rect.overlaps(&enemy.rect) {
                dead[i] = true;
                return false;
            }
        }
        true
    });

    if dead.iter().any(|&d| d) {
        let mut i = 0;
        state.enemies.retain(|_| {
            let keep = !dead[i];
            i += 1;
            keep
        });
        for _ in dead.iter().filter(|&&d| d) {
            state.player.score += POINTS_PER_ENEMY;
            events.push(GameEvent::EnemyDestroyed {
                score: state.player.score,
            });
        }
    }
}

/// Enemy bullets vs the player: at most one hit per enemy per frame, each
/// costing a life and the bullet.
fn resolve_enemy_bullets(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_rect = state.player.rect;
    let mut hits = 0;
    for enemy in &mut state.enemies {
        let mut hit = false;
        enemy.bullets.retain(|bullet| {
            if !hit && bullet.rect.overlaps(&player_rect) {
                hit = true;
                return false;
            }
            true
        });
        if hit {
            hits += 1;
        }
    }
    for _ in 0..hits {
        state.player.lives -= 1;
        events.push(GameEvent::PlayerHit {
            lives_left: state.player.lives,
        });
    }
}

/// Name capture after the player runs out of lives
fn enter_name_frame(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if input.confirm {
        let trimmed = state.name_buffer.trim();
        let name = if trimmed.is_empty() {
            DEFAULT_PLAYER_NAME.to_string()
        } else {
            trimmed.to_string()
        };
        events.push(GameEvent::SubmitScore {
            name,
            score: state.player.score,
        });
        state.name_buffer.clear();
        state.phase = GamePhase::ShowHighScores;
        return;
    }
    if input.cancel || input.restart {
        state.restart_level();
        events.push(GameEvent::LevelStarted {
            index: state.level_index,
        });
        return;
    }
    if input.backspace {
        state.name_buffer.pop();
    }
    for &ch in &input.text {
        if state.name_buffer.chars().count() < MAX_NAME_LEN && !ch.is_control() {
            state.name_buffer.push(ch);
        }
    }
}
