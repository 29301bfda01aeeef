use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::With,
    system::{Commands, Query, ResMut},
};
use tracing::{debug, trace};

use crate::clock::TickClock;
use crate::events::{AudioEvent, BoardCleared, ItemKind, RenderEvent, ScoreChanged};
use crate::systems::{
    activate_power_mode, BodySize, Collectible, Enemy, GameStage, LevelState, PlayerControlled, Position, PowerMode,
    ScoreResource,
};

/// Collects every pellet and power-up the player overlaps.
///
/// Removing the last collectible of the level clears the board exactly once.
#[allow(clippy::too_many_arguments)]
pub fn item_system(
    mut commands: Commands,
    players: Query<(&Position, &BodySize), With<PlayerControlled>>,
    items: Query<(Entity, &Collectible)>,
    mut enemies: Query<&mut Enemy>,
    mut score: ResMut<ScoreResource>,
    mut power: ResMut<PowerMode>,
    mut clock: ResMut<TickClock>,
    mut level: ResMut<LevelState>,
    mut stage: ResMut<GameStage>,
    mut events: (
        EventWriter<RenderEvent>,
        EventWriter<AudioEvent>,
        EventWriter<ScoreChanged>,
        EventWriter<BoardCleared>,
    ),
) {
    let Ok((position, size)) = players.single() else {
        return;
    };
    let (render, audio, scores, cleared) = &mut events;
    let player = position.bounds(size);

    let mut remaining = 0usize;
    let mut collected = 0usize;
    for (entity, item) in items.iter() {
        if !item.bounds.intersects(&player) {
            remaining += 1;
            continue;
        }

        let value = item.kind.score_value();
        score.0 += value;
        collected += 1;
        trace!(item = item.id.0, kind = ?item.kind, value, new_score = score.0, "Item collected by player");

        commands.entity(entity).despawn();
        render.write(RenderEvent::ItemRemoved { id: item.id });
        scores.write(ScoreChanged(score.0));

        match item.kind {
            ItemKind::Pellet => {
                audio.write(AudioEvent::PelletEaten);
            }
            ItemKind::PowerUp => {
                audio.write(AudioEvent::PowerUpCollected);
                activate_power_mode(
                    &mut power,
                    &mut clock,
                    enemies.iter_mut().map(|enemy| enemy.into_inner()),
                    render,
                );
            }
        }
    }

    if collected > 0 && remaining == 0 && !level.board_cleared {
        level.board_cleared = true;
        *stage = GameStage::LevelCleared;
        cleared.write(BoardCleared { level: level.number });
        debug!(level = level.number, score = score.0, "Board cleared");
    }
}
