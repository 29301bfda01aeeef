//! Level construction: validation, collectible placement and spawning.

use bevy_ecs::{
    entity::Entity,
    event::Events,
    query::{Or, With},
    world::World,
};
use glam::Vec2;
use tracing::{debug, info};

use crate::clock::TickClock;
use crate::constants::body::{ENEMY_SIZE, PLAYER_SIZE, PLAYER_SPAWN};
use crate::constants::items::{PELLET_SIZE, POWER_UP_SIZE};
use crate::constants::{BOSS_LEVEL, BOSS_SPAWN};
use crate::error::{GameResult, MapError};
use crate::events::{Actor, EnemyId, ItemId, ItemKind, Overlay, RenderEvent};
use crate::map::geometry::{Cell, Rect};
use crate::map::layout::{self, LevelConfig};
use crate::map::maze::Maze;
use crate::map::reachability::{plan_placement, Placement};
use crate::systems::{
    hud_snapshot, Collectible, Enemy, EnemyBundle, GameStage, LevelState, Lives, PlayerAnimation, PlayerBundle,
    PlayerControlled, Position, PowerMode, ScoreResource, SpawnPoint, Steering,
};

/// A level whose geometry has been checked and whose collectibles have been placed.
#[derive(Debug, Clone)]
pub struct LevelPlan {
    pub config: &'static LevelConfig,
    pub maze: Maze,
    pub player_spawn: Vec2,
    pub placement: Placement,
}

impl LevelPlan {
    /// Validates `config` and computes where its collectibles go.
    ///
    /// # Errors
    ///
    /// Returns `MapError::InvalidConfig` if the player or any enemy would spawn inside
    /// a wall, or if no collectible can be reached from the player's spawn.
    pub fn new(config: &'static LevelConfig) -> GameResult<Self> {
        let maze = Maze::new(config.walls.iter().copied(), config.theme);
        let player_spawn = Vec2::new(PLAYER_SPAWN.0, PLAYER_SPAWN.1);
        let player_size = Vec2::splat(PLAYER_SIZE);
        let enemy_size = Vec2::splat(ENEMY_SIZE);

        if !maze.fits(player_spawn, player_size) {
            return Err(MapError::InvalidConfig(format!(
                "level {}: player spawn {player_spawn} overlaps a wall",
                config.number
            ))
            .into());
        }

        if config.enemy_spawns.len() < config.enemy_count {
            return Err(MapError::InvalidConfig(format!(
                "level {}: {} enemies but only {} spawn points",
                config.number,
                config.enemy_count,
                config.enemy_spawns.len()
            ))
            .into());
        }

        for (index, spawn) in config.active_spawns().enumerate() {
            if !maze.fits(spawn, enemy_size) {
                return Err(MapError::InvalidConfig(format!(
                    "level {}: enemy {index} spawn {spawn} overlaps a wall",
                    config.number
                ))
                .into());
            }
        }

        let boss_spawn = Vec2::new(BOSS_SPAWN.0, BOSS_SPAWN.1);
        if config.number == BOSS_LEVEL && !maze.fits(boss_spawn, enemy_size) {
            return Err(MapError::InvalidConfig(format!("level {}: boss spawn overlaps a wall", config.number)).into());
        }

        let placement = plan_placement(
            &maze,
            player_spawn + player_size / 2.0,
            player_size,
            config.power_ups.iter().map(|&(x, y)| Vec2::new(x, y)),
            POWER_UP_SIZE,
        );
        if placement.reachable.is_empty() {
            return Err(MapError::InvalidConfig(format!(
                "level {}: no collectible cell is reachable from the player spawn",
                config.number
            ))
            .into());
        }

        Ok(Self {
            config,
            maze,
            player_spawn,
            placement,
        })
    }

    /// Every collectible of the level with its id, pellets first.
    pub fn collectibles(&self) -> impl Iterator<Item = Collectible> + '_ {
        let pellets = self.placement.pellets.iter().map(|cell| (ItemKind::Pellet, *cell));
        let power_ups = self.placement.power_ups.iter().map(|cell| (ItemKind::PowerUp, *cell));

        pellets.chain(power_ups).enumerate().map(|(index, (kind, cell))| Collectible {
            id: ItemId(index as u32),
            kind,
            bounds: item_bounds(kind, cell),
        })
    }
}

fn item_bounds(kind: ItemKind, cell: Cell) -> Rect {
    let side = match kind {
        ItemKind::Pellet => PELLET_SIZE,
        ItemKind::PowerUp => POWER_UP_SIZE,
    };
    Rect::centered(cell.as_vec2(), Vec2::splat(side))
}

/// Replaces the current level in `world` with level `number`.
///
/// Score and lives carry over. The player is spawned on first use and reset otherwise.
/// The whole level is validated before anything in the world is touched.
pub fn load_level(world: &mut World, number: u8, player_step: f32) -> GameResult<()> {
    let config = layout::level(number).ok_or(MapError::UnknownLevel(number))?;
    let plan = LevelPlan::new(config)?;
    world.insert_resource(GameStage::Loading(number));

    let stale: Vec<Entity> = world
        .query_filtered::<Entity, Or<(With<Enemy>, With<Collectible>)>>()
        .iter(world)
        .collect();
    debug!(level = number, despawned = stale.len(), "Clearing previous level");
    for entity in stale {
        world.despawn(entity);
    }

    reset_player(world, plan.player_spawn, player_step);

    let mut events = vec![RenderEvent::MazeBuilt {
        level: number,
        theme: config.theme,
        walls: plan.maze.walls().to_vec(),
    }];

    for collectible in plan.collectibles() {
        events.push(RenderEvent::ItemAdded {
            id: collectible.id,
            kind: collectible.kind,
            bounds: collectible.bounds,
        });
        world.spawn(collectible);
    }

    events.push(RenderEvent::EntityMoved {
        actor: Actor::Player,
        position: plan.player_spawn,
    });

    for (index, spawn) in config.active_spawns().enumerate() {
        let id = EnemyId(index as u8);
        world.spawn(EnemyBundle::new(id, spawn, false));
        events.push(RenderEvent::EnemyVisibility {
            id,
            visible: true,
            boss: false,
        });
        events.push(RenderEvent::EntityMoved {
            actor: Actor::Enemy(id),
            position: spawn,
        });
    }

    let level = LevelState::new(number);
    let hud = hud_snapshot(
        &level,
        &plan.maze,
        world.resource::<ScoreResource>(),
        world.resource::<Lives>(),
    );
    events.push(RenderEvent::Hud(hud));
    events.push(RenderEvent::Overlay(Overlay::Hidden));

    info!(
        level = number,
        theme = config.theme.name,
        pellets = plan.placement.pellets.len(),
        power_ups = plan.placement.power_ups.len(),
        enemies = config.enemy_count,
        "Level loaded"
    );

    world.insert_resource(plan.maze);
    world.insert_resource(level);
    world.insert_resource(PowerMode::default());
    world.resource_mut::<TickClock>().disarm_power();
    world.insert_resource(GameStage::Playing);
    world.resource_mut::<Events<RenderEvent>>().extend(events);
    Ok(())
}

fn reset_player(world: &mut World, spawn: Vec2, step: f32) {
    let mut players = world.query_filtered::<(
        &mut Position,
        &mut Steering,
        &mut SpawnPoint,
        &mut PlayerAnimation,
    ), With<PlayerControlled>>();

    let mut found = false;
    for (mut position, mut steering, mut spawn_point, mut animation) in players.iter_mut(world) {
        position.0 = spawn;
        spawn_point.0 = spawn;
        *steering = Steering::default();
        *animation = PlayerAnimation::default();
        found = true;
    }

    if !found {
        world.spawn(PlayerBundle::new(spawn, step));
    }
}
