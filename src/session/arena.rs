//! Entity arena for one loaded level
//!
//! The arena owns every entity of the current level. Handles carry the
//! arena's generation, so a handle from a torn-down level never aliases an
//! entity of the next one.

use crate::level::GeneratedLevel;
use crate::renderer::EntityKind;
use crate::sim::tick::{InputState, StepReport, World};

/// Stable reference to one entity, handed to the render host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityHandle {
    /// Arena generation the entity belongs to
    pub generation: u32,
    pub kind: EntityKind,
    /// Index within its kind's list (0 for the player)
    pub index: u32,
}

/// Entities of the level being played
#[derive(Debug, Clone)]
pub struct LevelArena {
    world: World,
    generation: u32,
    seed: u32,
}

impl LevelArena {
    pub fn new(level: GeneratedLevel, fall_threshold_y: f32, generation: u32) -> Self {
        let seed = level.seed;
        Self {
            world: level.into_world(fall_threshold_y),
            generation,
            seed,
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct entity access for hosts that script or edit the level
    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Seed the level was generated from
    #[inline]
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn handle(&self, kind: EntityKind, index: usize) -> EntityHandle {
        EntityHandle {
            generation: self.generation,
            kind,
            index: index as u32,
        }
    }

    /// Handles of every entity still alive: the player, platforms, enemies
    /// and uncollected collectibles
    pub fn live_handles(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        let player = std::iter::once(self.handle(EntityKind::Player, 0));
        let platforms = (0..self.world.platforms.len()).map(move |i| self.handle(EntityKind::Platform, i));
        let enemies = (0..self.world.enemies.len()).map(move |i| self.handle(EntityKind::Enemy, i));
        let collectibles = self
            .world
            .collectibles
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_collected)
            .map(move |(i, _)| self.handle(EntityKind::Collectible, i));
        player.chain(platforms).chain(enemies).chain(collectibles)
    }

    pub(crate) fn step(&mut self, input: &InputState, dt: f32) -> StepReport {
        self.world.step(input, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelGenerationParams, fixed::classic_level};

    #[test]
    fn test_live_handles_cover_every_entity() {
        let level = classic_level(&LevelGenerationParams::default());
        let expected = 1 + level.platforms.len() + level.enemies.len() + level.collectibles.len();
        let arena = LevelArena::new(level, -10.0, 3);

        let handles: Vec<_> = arena.live_handles().collect();
        assert_eq!(handles.len(), expected);
        assert!(handles.iter().all(|h| h.generation == 3));
        assert_eq!(handles[0].kind, EntityKind::Player);

        let mut unique = handles.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), handles.len());
    }

    #[test]
    fn test_collected_items_are_not_live() {
        let level = classic_level(&LevelGenerationParams::default());
        let mut arena = LevelArena::new(level, -10.0, 1);
        let before = arena.live_handles().count();
        arena.world.collectibles[0].collect();
        assert_eq!(arena.live_handles().count(), before - 1);
        assert!(!arena
            .live_handles()
            .any(|h| h == arena.handle(EntityKind::Collectible, 0)));
    }

    #[test]
    fn test_generations_never_alias() {
        let params = LevelGenerationParams::default();
        let a = LevelArena::new(classic_level(&params), -10.0, 1);
        let b = LevelArena::new(classic_level(&params), -10.0, 2);
        assert_ne!(
            a.handle(EntityKind::Platform, 0),
            b.handle(EntityKind::Platform, 0)
        );
    }
}
