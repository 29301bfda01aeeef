use bevy_ecs::{
    event::EventWriter,
    query::{With, Without},
    system::{Commands, Query, ResMut},
};
use glam::Vec2;
use tracing::{debug, info};

use crate::clock::TickClock;
use crate::constants::{score, BOSS_LEVEL, BOSS_SPAWN};
use crate::events::{Actor, AudioEvent, EnemyId, Overlay, RenderEvent, ScoreChanged};
use crate::systems::{
    deactivate_power_mode, BodySize, Enemy, EnemyBundle, GameStage, LevelState, Lives, PlayerControlled, Position,
    PowerMode, ScoreResource, SpawnPoint, Steering,
};

/// Resolves contact between the player and every active enemy.
///
/// Vulnerable enemies are eaten; any other contact costs a life. Losing the last
/// life ends the run and stops the clock.
#[allow(clippy::too_many_arguments)]
pub fn enemy_collision_system(
    mut commands: Commands,
    mut players: Query<(&mut Position, &BodySize, &mut Steering, &SpawnPoint), (With<PlayerControlled>, Without<Enemy>)>,
    mut enemies: Query<(&mut Enemy, &mut Position, &BodySize, &SpawnPoint), Without<PlayerControlled>>,
    mut score: ResMut<ScoreResource>,
    mut lives: ResMut<Lives>,
    mut power: ResMut<PowerMode>,
    mut clock: ResMut<TickClock>,
    mut level: ResMut<LevelState>,
    mut stage: ResMut<GameStage>,
    mut events: (EventWriter<RenderEvent>, EventWriter<AudioEvent>, EventWriter<ScoreChanged>),
) {
    let Ok((mut player_pos, player_size, mut steering, player_spawn)) = players.single_mut() else {
        return;
    };
    let (render, audio, scores) = &mut events;
    let player = player_pos.bounds(player_size);

    let mut caught_by = None;
    let mut eaten = 0u32;
    for (mut enemy, position, size, _) in enemies.iter_mut() {
        if !enemy.active || !position.bounds(size).intersects(&player) {
            continue;
        }

        if enemy.vulnerable {
            enemy.active = false;
            enemy.vulnerable = false;
            eaten += 1;
            score.0 += score::ENEMY;
            scores.write(ScoreChanged(score.0));
            render.write(RenderEvent::EnemyVisibility {
                id: enemy.id,
                visible: false,
                boss: enemy.boss,
            });
            debug!(enemy = enemy.id.0, new_score = score.0, "Enemy eaten");
        } else {
            caught_by = Some(enemy.id);
            break;
        }
    }

    if let Some(id) = caught_by {
        audio.write(AudioEvent::PlayerDeath);
        lives.0 = lives.0.saturating_sub(1);

        if lives.0 == 0 {
            info!(enemy = id.0, score = score.0, "Player caught with no lives left");
            *stage = GameStage::Lost;
            clock.stop();
            power.active = false;
            render.write(RenderEvent::Overlay(Overlay::GameOver));
            return;
        }

        debug!(enemy = id.0, lives = lives.0, "Player caught; respawning");
        player_pos.0 = player_spawn.0;
        *steering = Steering::default();
        render.write(RenderEvent::EntityMoved {
            actor: Actor::Player,
            position: player_pos.0,
        });

        deactivate_power_mode(
            &mut power,
            &mut clock,
            enemies.iter_mut().map(|(enemy, ..)| enemy.into_inner()),
            render,
        );
        for (enemy, mut position, _, spawn) in enemies.iter_mut() {
            if enemy.active && position.0 != spawn.0 {
                position.0 = spawn.0;
                render.write(RenderEvent::EntityMoved {
                    actor: Actor::Enemy(enemy.id),
                    position: spawn.0,
                });
            }
        }
        return;
    }

    if eaten > 0 && level.number == BOSS_LEVEL && !level.boss_spawned {
        let regulars_cleared = enemies.iter().all(|(enemy, ..)| enemy.boss || !enemy.active);
        if regulars_cleared {
            let id = EnemyId(enemies.iter().count() as u8);
            let spawn = Vec2::new(BOSS_SPAWN.0, BOSS_SPAWN.1);
            level.boss_spawned = true;
            commands.spawn(EnemyBundle::new(id, spawn, true));
            render.write(RenderEvent::EnemyVisibility {
                id,
                visible: true,
                boss: true,
            });
            render.write(RenderEvent::EntityMoved {
                actor: Actor::Enemy(id),
                position: spawn,
            });
            info!(enemy = id.0, level = level.number, "Boss spawned");
        }
    }
}
