use bevy_ecs::{
    event::EventWriter,
    system::{Query, ResMut},
};
use tracing::debug;

use crate::clock::TickClock;
use crate::events::RenderEvent;
use crate::systems::{Enemy, PowerMode};

/// Starts (or restarts) power mode and makes every active non-boss enemy vulnerable.
pub fn activate_power_mode<'a>(
    power: &mut PowerMode,
    clock: &mut TickClock,
    enemies: impl Iterator<Item = &'a mut Enemy>,
    render: &mut EventWriter<RenderEvent>,
) {
    let restarted = power.active;
    power.active = true;
    clock.arm_power();

    for enemy in enemies {
        if enemy.active && !enemy.boss && !enemy.vulnerable {
            enemy.vulnerable = true;
            render.write(RenderEvent::EnemyVulnerability {
                id: enemy.id,
                vulnerable: true,
            });
        }
    }
    debug!(restarted, duration = clock.power_duration(), "Power mode armed");
}

/// Ends power mode and clears every enemy's vulnerability.
pub fn deactivate_power_mode<'a>(
    power: &mut PowerMode,
    clock: &mut TickClock,
    enemies: impl Iterator<Item = &'a mut Enemy>,
    render: &mut EventWriter<RenderEvent>,
) {
    power.active = false;
    clock.disarm_power();

    for enemy in enemies {
        if enemy.vulnerable {
            enemy.vulnerable = false;
            render.write(RenderEvent::EnemyVulnerability {
                id: enemy.id,
                vulnerable: false,
            });
        }
    }
}

/// Runs when the power deadline passes.
pub fn power_expiry_system(
    mut power: ResMut<PowerMode>,
    mut clock: ResMut<TickClock>,
    mut enemies: Query<&mut Enemy>,
    mut render: EventWriter<RenderEvent>,
) {
    if !power.active {
        return;
    }
    debug!("Power mode expired");
    deactivate_power_mode(
        &mut power,
        &mut clock,
        enemies.iter_mut().map(|enemy| enemy.into_inner()),
        &mut render,
    );
}
