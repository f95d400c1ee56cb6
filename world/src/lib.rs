#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid world construction for the platformer.
//!
//! [`build`] turns a validated [`TileGrid`] into the static collision geometry
//! owned by [`World`] and the independent entity collections held in
//! [`Entities`]. The world never owns the kinematic entities; it is only the
//! place where they are spawned.

pub mod kinematics;

use platformer_core::{Rect, TileCode, TileCoord, TileGrid, TILE_SIZE};

pub use kinematics::{Enemy, Kinematic, Platform, PlatformAxis};

/// Vertical shift applied to enemies so their feet sink into the floor below.
const ENEMY_Y_OFFSET: i32 = -6;

/// Side length of a collectible coin.
pub const COIN_SIZE: i32 = TILE_SIZE / 2;

/// Solid block contributing to collision resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StaticTile {
    code: TileCode,
    rect: Rect,
}

impl StaticTile {
    /// Creates a static tile covering the provided cell.
    #[must_use]
    pub const fn at(code: TileCode, coord: TileCoord) -> Self {
        Self {
            code,
            rect: Rect::new(coord.world_x(), coord.world_y(), TILE_SIZE, TILE_SIZE),
        }
    }

    /// Tile code the block was built from.
    #[must_use]
    pub const fn code(&self) -> TileCode {
        self.code
    }

    /// World-space bounds of the block.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }
}

/// Lava pool filling the lower half of its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Lava(Rect);

impl Lava {
    /// Spawns lava inside the provided cell.
    #[must_use]
    pub const fn at(coord: TileCoord) -> Self {
        Self(Rect::new(
            coord.world_x(),
            coord.world_y() + TILE_SIZE / 2,
            TILE_SIZE,
            TILE_SIZE / 2,
        ))
    }

    /// World-space bounds of the hazard.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.0
    }
}

/// Coin centred inside its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coin(Rect);

impl Coin {
    /// Spawns a coin centred inside the provided cell.
    #[must_use]
    pub const fn at(coord: TileCoord) -> Self {
        Self(Rect::centered(
            coord.world_x() + TILE_SIZE / 2,
            coord.world_y() + TILE_SIZE / 2,
            COIN_SIZE,
            COIN_SIZE,
        ))
    }

    /// World-space bounds of the collectible.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.0
    }
}

/// Level exit standing one and a half tiles tall on its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Exit(Rect);

impl Exit {
    /// Spawns an exit anchored to the provided cell.
    #[must_use]
    pub const fn at(coord: TileCoord) -> Self {
        Self(Rect::new(
            coord.world_x(),
            coord.world_y() - TILE_SIZE / 2,
            TILE_SIZE,
            TILE_SIZE + TILE_SIZE / 2,
        ))
    }

    /// World-space bounds of the goal region.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.0
    }
}

/// Authoritative static geometry of a level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct World {
    tiles: Vec<StaticTile>,
    width: i32,
    height: i32,
}

impl World {
    /// Solid blocks in row-major spawn order.
    #[must_use]
    pub fn tiles(&self) -> &[StaticTile] {
        &self.tiles
    }

    /// Width of the level in world pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Height of the level in world pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }
}

/// Dynamic and interactive entities spawned from a grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entities {
    enemies: Vec<Enemy>,
    platforms: Vec<Platform>,
    lava: Vec<Lava>,
    coins: Vec<Coin>,
    exits: Vec<Exit>,
}

impl Entities {
    /// Patrolling enemies.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Moving platforms.
    #[must_use]
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Lava hazards.
    #[must_use]
    pub fn lava(&self) -> &[Lava] {
        &self.lava
    }

    /// Coins that have not been collected yet.
    #[must_use]
    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    /// Exit regions.
    #[must_use]
    pub fn exits(&self) -> &[Exit] {
        &self.exits
    }

    /// Advances every enemy and platform by one tick.
    pub fn tick(&mut self) {
        self.enemies.iter_mut().for_each(Kinematic::tick);
        self.platforms.iter_mut().for_each(Kinematic::tick);
    }

    /// Returns every enemy and platform to its spawn state.
    pub fn reset(&mut self) {
        self.enemies.iter_mut().for_each(Kinematic::reset);
        self.platforms.iter_mut().for_each(Kinematic::reset);
    }

    /// Removes every coin overlapping `rect` and reports how many were taken.
    pub fn collect_coins(&mut self, rect: &Rect) -> usize {
        let before = self.coins.len();
        self.coins.retain(|coin| !coin.rect().intersects(rect));
        before - self.coins.len()
    }
}

/// Result of building a level from its grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldBuild {
    /// Static geometry consulted by player physics.
    pub world: World,
    /// Entities spawned from the grid.
    pub entities: Entities,
}

/// Builds static geometry and spawns entities for a playable level.
#[must_use]
pub fn build(grid: &TileGrid) -> WorldBuild {
    let mut world = empty_world(grid);
    let mut entities = Entities::default();

    for (coord, code) in grid.iter() {
        match code {
            TileCode::Empty => {}
            TileCode::Dirt | TileCode::Grass => world.tiles.push(StaticTile::at(code, coord)),
            TileCode::EnemySpawn => entities.enemies.push(Enemy::new(
                coord.world_x(),
                coord.world_y() + ENEMY_Y_OFFSET,
            )),
            TileCode::PlatformHorizontal => entities.platforms.push(Platform::new(
                coord.world_x(),
                coord.world_y(),
                PlatformAxis::Horizontal,
            )),
            TileCode::PlatformVertical => entities.platforms.push(Platform::new(
                coord.world_x(),
                coord.world_y(),
                PlatformAxis::Vertical,
            )),
            TileCode::Lava => entities.lava.push(Lava::at(coord)),
            TileCode::Coin => entities.coins.push(Coin::at(coord)),
            TileCode::Exit => entities.exits.push(Exit::at(coord)),
        }
    }

    WorldBuild { world, entities }
}

/// Builds the editor's collision world where every non-empty cell is solid.
#[must_use]
pub fn build_authoring(grid: &TileGrid) -> World {
    let mut world = empty_world(grid);
    world.tiles = grid
        .iter()
        .filter(|(_, code)| *code != TileCode::Empty)
        .map(|(coord, code)| StaticTile::at(code, coord))
        .collect();
    world
}

fn empty_world(grid: &TileGrid) -> World {
    World {
        tiles: Vec::new(),
        width: grid.width_px(),
        height: grid.height_px(),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use platformer_core::Rect;

    use super::{StaticTile, World};

    /// Dimensions of the level in world pixels.
    #[must_use]
    pub fn dimensions(world: &World) -> (i32, i32) {
        (world.width, world.height)
    }

    /// Static tiles whose bounds satisfy the provided visibility predicate.
    pub fn visible_tiles<'a, F>(world: &'a World, mut visible: F) -> impl Iterator<Item = &'a StaticTile>
    where
        F: FnMut(&Rect) -> bool + 'a,
    {
        world.tiles.iter().filter(move |tile| visible(&tile.rect))
    }

    /// First static tile overlapping the provided rectangle, if any.
    #[must_use]
    pub fn first_overlap<'a>(world: &'a World, rect: &Rect) -> Option<&'a StaticTile> {
        world.tiles.iter().find(|tile| tile.rect.intersects(rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(usize, usize, TileCode)]) -> TileGrid {
        let mut grid = TileGrid::empty();
        for &(column, row, code) in cells {
            assert!(grid.set(TileCoord::new(column, row), code));
        }
        grid
    }

    #[test]
    fn solid_codes_become_static_tiles() {
        let grid = grid_with(&[(2, 3, TileCode::Dirt), (4, 3, TileCode::Grass)]);
        let built = build(&grid);

        let tiles = built.world.tiles();
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].rect(), Rect::new(100, 150, 50, 50));
        assert_eq!(tiles[0].code(), TileCode::Dirt);
        assert_eq!(tiles[1].rect(), Rect::new(200, 150, 50, 50));
        assert_eq!(tiles[1].code(), TileCode::Grass);
    }

    #[test]
    fn spawn_descriptors_use_code_specific_offsets() {
        let grid = grid_with(&[
            (1, 1, TileCode::EnemySpawn),
            (2, 2, TileCode::PlatformHorizontal),
            (3, 3, TileCode::PlatformVertical),
            (4, 4, TileCode::Lava),
            (5, 5, TileCode::Coin),
            (6, 6, TileCode::Exit),
        ]);
        let entities = build(&grid).entities;

        assert_eq!(entities.enemies()[0].bounds(), Rect::new(50, 44, 60, 60));
        assert_eq!(entities.platforms()[0].bounds(), Rect::new(100, 100, 50, 25));
        assert_eq!(entities.platforms()[0].axis(), PlatformAxis::Horizontal);
        assert_eq!(entities.platforms()[1].bounds(), Rect::new(150, 150, 50, 25));
        assert_eq!(entities.platforms()[1].axis(), PlatformAxis::Vertical);
        assert_eq!(entities.lava()[0].rect(), Rect::new(200, 225, 50, 25));
        assert_eq!(entities.coins()[0].rect(), Rect::new(263, 263, 25, 25));
        assert_eq!(entities.exits()[0].rect(), Rect::new(300, 275, 50, 75));
    }

    #[test]
    fn world_dimensions_follow_grid() {
        let built = build(&TileGrid::empty());
        assert_eq!(query::dimensions(&built.world), (1000, 1000));
        assert!(built.world.tiles().is_empty());
    }

    #[test]
    fn authoring_world_treats_every_code_as_solid() {
        let grid = grid_with(&[(0, 0, TileCode::Coin), (1, 0, TileCode::Lava), (2, 0, TileCode::Dirt)]);
        let world = build_authoring(&grid);
        let codes: Vec<_> = world.tiles().iter().map(StaticTile::code).collect();
        assert_eq!(codes, vec![TileCode::Coin, TileCode::Lava, TileCode::Dirt]);
    }

    #[test]
    fn coins_are_collected_once() {
        let grid = grid_with(&[(5, 5, TileCode::Coin)]);
        let mut entities = build(&grid).entities;
        let player = Rect::new(250, 250, 40, 80);

        assert_eq!(entities.collect_coins(&player), 1);
        assert_eq!(entities.collect_coins(&player), 0);
        assert!(entities.coins().is_empty());
    }

    #[test]
    fn visible_tiles_filters_with_predicate() {
        let grid = grid_with(&[(0, 0, TileCode::Dirt), (19, 19, TileCode::Dirt)]);
        let world = build(&grid).world;
        let viewport = Rect::new(0, 0, 100, 100);
        let visible: Vec<_> = query::visible_tiles(&world, |rect| rect.intersects(&viewport)).collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(
            query::first_overlap(&world, &Rect::new(960, 960, 10, 10)).map(StaticTile::code),
            Some(TileCode::Dirt)
        );
    }
}
