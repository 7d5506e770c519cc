//! Presentation: translate state into render-sink calls
//!
//! No game logic lives here. `draw_frame` reads immutable state and emits
//! rectangles and text through the `RenderSink` port; the frontend decides
//! what a rectangle or a line of text actually looks like.

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::highscores::{HighScores, MAX_HIGH_SCORES};
use crate::sim::{GamePhase, GameState, Rect};

/// RGB color for the render sink
pub type Color = (u8, u8, u8);

pub const C_PLAYER: Color = (0, 255, 0);
pub const C_ENEMY: Color = (255, 0, 0);
pub const C_WALL: Color = (100, 100, 100);
pub const C_WALL_CRACKED: Color = (150, 75, 0);
pub const C_BULLET_PLAYER: Color = (255, 255, 0);
pub const C_BULLET_ENEMY: Color = (255, 0, 0);
pub const C_TEXT: Color = (255, 255, 255);
pub const C_BANNER: Color = (255, 0, 0);
pub const C_VICTORY: Color = (0, 255, 0);
pub const C_GOLD: Color = (255, 215, 0);

/// Drawing port the core renders through; implemented by the frontend
pub trait RenderSink {
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: u32, color: Color);
}

/// Emit one frame of draw calls for the current state
pub fn draw_frame(state: &GameState, scores: &HighScores, sink: &mut dyn RenderSink) {
    for wall in &state.walls {
        let color = if wall.destructible {
            C_WALL_CRACKED
        } else {
            C_WALL
        };
        sink.draw_rect(wall.rect, color);
    }

    sink.draw_rect(state.player.rect, C_PLAYER);
    for bullet in &state.player.bullets {
        sink.draw_rect(bullet.rect, C_BULLET_PLAYER);
    }
    for enemy in &state.enemies {
        sink.draw_rect(enemy.rect, C_ENEMY);
        for bullet in &enemy.bullets {
            sink.draw_rect(bullet.rect, C_BULLET_ENEMY);
        }
    }

    sink.draw_text(&format!("Score: {}", state.player.score), 10, 10, 24, C_TEXT);
    sink.draw_text(&format!("Lives: {}", state.player.lives), 10, 40, 24, C_TEXT);

    match state.phase {
        GamePhase::Running => {}
        GamePhase::Paused => {
            sink.draw_text(
                "PAUSED",
                SCREEN_WIDTH / 2 - 60,
                SCREEN_HEIGHT / 2,
                48,
                C_TEXT,
            );
        }
        GamePhase::Victory => {
            sink.draw_text(
                &format!("Victory! Stage {} Complete", state.level_index + 1),
                SCREEN_WIDTH / 2 - 160,
                SCREEN_HEIGHT / 2,
                36,
                C_VICTORY,
            );
            sink.draw_text(
                "Press N or Enter to continue",
                SCREEN_WIDTH / 2 - 160,
                SCREEN_HEIGHT / 2 + 50,
                24,
                C_TEXT,
            );
        }
        GamePhase::EnterName => {
            sink.draw_text(
                "GAME OVER",
                SCREEN_WIDTH / 2 - 80,
                SCREEN_HEIGHT / 2 - 60,
                48,
                C_BANNER,
            );
            sink.draw_text(
                "Enter your name and press Enter:",
                SCREEN_WIDTH / 2 - 180,
                SCREEN_HEIGHT / 2,
                24,
                C_TEXT,
            );
            let shown = if state.name_buffer.is_empty() {
                "_"
            } else {
                state.name_buffer.as_str()
            };
            sink.draw_text(shown, SCREEN_WIDTH / 2 - 180, SCREEN_HEIGHT / 2 + 40, 28, C_TEXT);
        }
        GamePhase::ShowHighScores => {
            sink.draw_text(
                "Hall of Fame - Top Scores",
                SCREEN_WIDTH / 2 - 200,
                40,
                36,
                C_GOLD,
            );
            let mut y = 100;
            for (i, entry) in scores.top(MAX_HIGH_SCORES).iter().enumerate() {
                sink.draw_text(
                    &format!("{}. {} - {}", i + 1, entry.name, entry.score),
                    SCREEN_WIDTH / 2 - 160,
                    y,
                    24,
                    C_TEXT,
                );
                y += 30;
            }
            if scores.is_empty() {
                sink.draw_text("No scores yet", SCREEN_WIDTH / 2 - 160, y, 24, C_TEXT);
            }
        }
        GamePhase::CampaignComplete => {
            sink.draw_text(
                &format!("Campaign Complete! Final Score: {}", state.player.score),
                SCREEN_WIDTH / 2 - 200,
                SCREEN_HEIGHT / 2,
                36,
                C_GOLD,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_SEED;

    #[derive(Default)]
    struct RecordingSink {
        rects: Vec<(Rect, Color)>,
        texts: Vec<String>,
    }

    impl RenderSink for RecordingSink {
        fn draw_rect(&mut self, rect: Rect, color: Color) {
            self.rects.push((rect, color));
        }
        fn draw_text(&mut self, text: &str, _x: i32, _y: i32, _size: u32, _color: Color) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_draws_every_entity_and_hud() {
        let state = GameState::new(DEFAULT_SEED);
        let scores = HighScores::new();
        let mut sink = RecordingSink::default();
        draw_frame(&state, &scores, &mut sink);

        // Walls + player + enemies (no bullets yet on frame zero)
        assert_eq!(
            sink.rects.len(),
            state.walls.len() + 1 + state.enemies.len()
        );
        assert!(sink.texts.iter().any(|t| t.starts_with("Score:")));
        assert!(sink.texts.iter().any(|t| t.starts_with("Lives:")));
    }

    #[test]
    fn test_game_over_banner_in_name_entry() {
        let mut state = GameState::new(DEFAULT_SEED);
        state.phase = GamePhase::EnterName;
        let scores = HighScores::new();
        let mut sink = RecordingSink::default();
        draw_frame(&state, &scores, &mut sink);
        assert!(sink.texts.iter().any(|t| t == "GAME OVER"));
    }

    #[test]
    fn test_highscore_table_lists_entries_in_rank_order() {
        let mut state = GameState::new(DEFAULT_SEED);
        state.phase = GamePhase::ShowHighScores;
        let mut scores = HighScores::new();
        scores.add_entry("Ada", 900, 0);
        scores.add_entry("Bob", 300, 0);
        let mut sink = RecordingSink::default();
        draw_frame(&state, &scores, &mut sink);
        assert!(sink.texts.iter().any(|t| t == "1. Ada - 900"));
        assert!(sink.texts.iter().any(|t| t == "2. Bob - 300"));
    }
}
