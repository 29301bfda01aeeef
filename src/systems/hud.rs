use bevy_ecs::{change_detection::DetectChanges, event::EventWriter, system::Res};

use crate::events::{Hud, RenderEvent};
use crate::map::maze::Maze;
use crate::systems::{LevelState, Lives, ScoreResource};

/// Builds the HUD line from the current resources.
pub fn hud_snapshot(level: &LevelState, maze: &Maze, score: &ScoreResource, lives: &Lives) -> Hud {
    Hud {
        level: level.number,
        theme: maze.theme.name,
        score: score.0,
        lives: lives.0,
    }
}

/// Re-sends the HUD whenever the score, lives or level change.
pub fn hud_system(
    score: Res<ScoreResource>,
    lives: Res<Lives>,
    level: Res<LevelState>,
    maze: Res<Maze>,
    mut render: EventWriter<RenderEvent>,
) {
    if score.is_changed() || lives.is_changed() || level.is_changed() {
        render.write(RenderEvent::Hud(hud_snapshot(&level, &maze, &score, &lives)));
    }
}
