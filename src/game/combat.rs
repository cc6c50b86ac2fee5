//! Player vs enemy contact
//!
//! Landing on an enemy from above while falling kills it and bounces the
//! player. Any other touch hurts the player.

use crate::config::CombatSettings;
use super::enemy::Enemy;
use super::player::Player;

/// What happened when the player touched enemies this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    /// Number of enemies stomped
    pub stomped: usize,
    /// At least one enemy touched the player without being stomped
    pub damaged: bool,
}

/// Resolve overlaps between the player and all living enemies
///
/// The stomp test uses the player's hitbox and fall speed from before the
/// first bounce, so a single landing can take out several overlapping enemies.
pub fn check_player_enemy(player: &mut Player, enemies: &mut [Enemy], combat: &CombatSettings) -> Contact {
    let pr = player.rect();
    let fall_speed = player.body.vy;
    let mut contact = Contact::default();

    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        let er = enemy.rect();
        if !pr.colliderect(&er) {
            continue;
        }

        if fall_speed > combat.stomp_vy_threshold && pr.bottom() - er.top() < combat.stomp_depth {
            enemy.alive = false;
            player.body.vy = combat.stomp_bounce_vy;
            player.body.on_ground = false;
            contact.stomped += 1;
        } else {
            contact.damaged = true;
        }
    }

    contact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemySettings;
    use crate::world::{EnemySpawn, Rect};

    const PLATFORM: Rect = Rect::new(500, 250, 300, 18);

    fn enemy_at(x: i32) -> Enemy {
        Enemy::new(&EnemySpawn { platform: PLATFORM, x, direction: 1 }, &EnemySettings::default())
    }

    #[test]
    fn test_stomp_from_above() {
        let combat = CombatSettings::default();
        // Enemy top is at 250 - 36 = 214; player feet 8px into it
        let mut player = Player::new(600.0, 222.0, 16, 50, 3);
        player.body.vy = 400.0;
        let mut enemies = vec![enemy_at(600)];

        let contact = check_player_enemy(&mut player, &mut enemies, &combat);
        assert_eq!(contact, Contact { stomped: 1, damaged: false });
        assert!(!enemies[0].alive);
        assert_eq!(player.body.vy, combat.stomp_bounce_vy);
    }

    #[test]
    fn test_slow_fall_is_damage() {
        let combat = CombatSettings::default();
        let mut player = Player::new(600.0, 222.0, 16, 50, 3);
        player.body.vy = 100.0;
        let mut enemies = vec![enemy_at(600)];

        let contact = check_player_enemy(&mut player, &mut enemies, &combat);
        assert!(contact.damaged);
        assert_eq!(contact.stomped, 0);
        assert!(enemies[0].alive);
    }

    #[test]
    fn test_side_touch_is_damage() {
        let combat = CombatSettings::default();
        let mut player = Player::new(585.0, 250.0, 16, 50, 3);
        player.body.vy = 400.0;
        let mut enemies = vec![enemy_at(600)];

        let contact = check_player_enemy(&mut player, &mut enemies, &combat);
        assert!(contact.damaged);
        assert!(enemies[0].alive);
    }

    #[test]
    fn test_dead_and_distant_enemies_ignored() {
        let combat = CombatSettings::default();
        let mut player = Player::new(600.0, 222.0, 16, 50, 3);
        player.body.vy = 400.0;
        let mut dead = enemy_at(600);
        dead.alive = false;
        let mut enemies = vec![dead, enemy_at(760)];

        assert_eq!(check_player_enemy(&mut player, &mut enemies, &combat), Contact::default());
    }

    #[test]
    fn test_stomp_several_at_once() {
        let combat = CombatSettings::default();
        let mut player = Player::new(600.0, 220.0, 40, 50, 3);
        player.body.vy = 400.0;
        let mut enemies = vec![enemy_at(590), enemy_at(612)];

        let contact = check_player_enemy(&mut player, &mut enemies, &combat);
        assert_eq!(contact.stomped, 2);
        assert!(enemies.iter().all(|e| !e.alive));
    }
}
