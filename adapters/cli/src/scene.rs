//! Turns session and editor state into screen-space scenes.

use glam::Vec2;
use platformer_core::{Facing, Rect, TileCode, GRID_COLUMNS, GRID_ROWS, TILE_SIZE};
use platformer_rendering::{
    palette, Color, GridOverlay, HudAnchor, HudText, Scene, ScenePanel, SpriteInstance, SpriteKey,
};
use platformer_system_editor::{Editor, SlotName};
use platformer_system_player::Player;
use platformer_system_session::{LevelSource, Session, SessionPhase};
use platformer_world::{query, Kinematic, PlatformAxis, COIN_SIZE};

const HUD_FONT: f32 = 30.0;
const BANNER_FONT: f32 = 56.0;
const HINT_FONT: f32 = 24.0;
const SUN_SIZE: f32 = 100.0;
const TOOLBAR_HEIGHT: f32 = 40.0;

/// Sprite family drawn for a tile in the authoring view.
pub(crate) const fn sprite_for_tile(code: TileCode) -> Option<SpriteKey> {
    match code {
        TileCode::Empty => None,
        TileCode::Dirt => Some(SpriteKey::Dirt),
        TileCode::Grass => Some(SpriteKey::Grass),
        TileCode::EnemySpawn => Some(SpriteKey::Enemy),
        TileCode::PlatformHorizontal => Some(SpriteKey::PlatformHorizontal),
        TileCode::PlatformVertical => Some(SpriteKey::PlatformVertical),
        TileCode::Lava => Some(SpriteKey::Lava),
        TileCode::Coin => Some(SpriteKey::Coin),
        TileCode::Exit => Some(SpriteKey::Exit),
    }
}

fn place(key: SpriteKey, rect: Rect) -> SpriteInstance {
    SpriteInstance::new(
        key,
        Vec2::new(rect.x() as f32, rect.y() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

fn player_sprite(player: &Player, rect: Rect, dead: bool) -> SpriteInstance {
    if dead {
        return place(SpriteKey::Ghost, rect);
    }
    let pose = player.pose();
    place(SpriteKey::PlayerWalk, rect)
        .with_frame(pose.frame)
        .flipped(pose.facing == Facing::Left)
}

/// Builds the play scene: world culled to the camera, then the player, then the HUD.
pub(crate) fn compose_play<S: LevelSource>(session: &Session<S>, background: usize, scene: &mut Scene) {
    scene.clear();
    scene.background = background;

    let state = session.state();
    let camera = state.camera();
    let viewport = camera.viewport();
    let screen = Vec2::new(viewport.width() as f32, viewport.height() as f32);

    scene.sprites.push(SpriteInstance::new(
        SpriteKey::Sun,
        Vec2::new(screen.x - SUN_SIZE - 50.0, 40.0),
        Vec2::splat(SUN_SIZE),
    ));

    let visible = |rect: &Rect| camera.is_in_view(rect);
    for tile in query::visible_tiles(state.world(), visible) {
        if let Some(key) = sprite_for_tile(tile.code()) {
            scene.sprites.push(place(key, camera.apply_rect(&tile.rect())));
        }
    }

    let entities = state.entities();
    let statics = entities
        .lava()
        .iter()
        .map(|lava| (SpriteKey::Lava, lava.rect()))
        .chain(entities.coins().iter().map(|coin| (SpriteKey::Coin, coin.rect())))
        .chain(entities.exits().iter().map(|exit| (SpriteKey::Exit, exit.rect())));
    for (key, rect) in statics {
        if visible(&rect) {
            scene.sprites.push(place(key, camera.apply_rect(&rect)));
        }
    }
    for platform in entities.platforms() {
        let rect = platform.bounds();
        if visible(&rect) {
            let key = match platform.axis() {
                PlatformAxis::Horizontal => SpriteKey::PlatformHorizontal,
                PlatformAxis::Vertical => SpriteKey::PlatformVertical,
            };
            scene.sprites.push(place(key, camera.apply_rect(&rect)));
        }
    }
    for enemy in entities.enemies() {
        let rect = enemy.bounds();
        if visible(&rect) {
            scene.sprites.push(
                place(SpriteKey::Enemy, camera.apply_rect(&rect))
                    .with_frame(enemy.frame())
                    .flipped(enemy.phase().direction() < 0),
            );
        }
    }

    let phase = session.phase();
    let player = state.player();
    scene.sprites.push(player_sprite(
        player,
        camera.apply_rect(&player.rect()),
        phase == SessionPhase::GameOver,
    ));

    let icon = COIN_SIZE as f32;
    scene.sprites.push(SpriteInstance::new(
        SpriteKey::Coin,
        Vec2::new(10.0, 10.0),
        Vec2::splat(icon),
    ));
    scene.hud.push(HudText::new(
        format!("SCORE: {}", state.score()),
        HudAnchor::TopLeft,
        Vec2::new(20.0 + icon, 32.0),
        HUD_FONT,
        palette::WHITE,
    ));
    scene.hud.push(HudText::new(
        format!("LEVEL: {}", state.level()),
        HudAnchor::TopRight,
        Vec2::new(10.0, 32.0),
        HUD_FONT,
        palette::WHITE,
    ));

    match phase {
        SessionPhase::Playing => {}
        SessionPhase::GameOver => push_banner(scene, screen, "GAME OVER", "Press R or Enter to restart"),
        SessionPhase::Won => push_banner(scene, screen, "WINNER!", "Press R or Enter to play again"),
    }
}

fn push_banner(scene: &mut Scene, screen: Vec2, title: &str, hint: &str) {
    let size = Vec2::new(440.0, 140.0);
    scene.panels.push(ScenePanel {
        position: Vec2::new((screen.x - size.x) / 2.0, (screen.y - size.y) / 2.0),
        size,
        color: Color::new(0.0, 0.0, 0.0, 0.6),
    });
    scene.hud.push(HudText::new(
        title,
        HudAnchor::Center,
        Vec2::new(0.0, -5.0),
        BANNER_FONT,
        palette::BLUE.lighten(0.3),
    ));
    scene.hud.push(HudText::new(
        hint,
        HudAnchor::Center,
        Vec2::new(0.0, 40.0),
        HINT_FONT,
        palette::WHITE,
    ));
}

/// Builds the editor scene: the grid drawn at the origin, preview entities,
/// the preview player and the status bar.
pub(crate) fn compose_editor(editor: &Editor, slot: &SlotName, background: usize, scene: &mut Scene) {
    scene.clear();
    scene.background = background;

    let previewing = editor.is_previewing();
    for (coord, code) in editor.grid().iter() {
        if previewing && spawns_entity(code) {
            continue;
        }
        if let Some(key) = sprite_for_tile(code) {
            let rect = Rect::new(coord.world_x(), coord.world_y(), TILE_SIZE, TILE_SIZE);
            scene.sprites.push(place(key, rect));
        }
    }

    if let Some(entities) = editor.preview() {
        for platform in entities.platforms() {
            let key = match platform.axis() {
                PlatformAxis::Horizontal => SpriteKey::PlatformHorizontal,
                PlatformAxis::Vertical => SpriteKey::PlatformVertical,
            };
            scene.sprites.push(place(key, platform.bounds()));
        }
        for enemy in entities.enemies() {
            scene.sprites.push(
                place(SpriteKey::Enemy, enemy.bounds())
                    .with_frame(enemy.frame())
                    .flipped(enemy.phase().direction() < 0),
            );
        }
    }

    let player = editor.player();
    scene.sprites.push(player_sprite(player, player.rect(), false));

    scene.grid = Some(GridOverlay {
        columns: GRID_COLUMNS as u32,
        rows: GRID_ROWS as u32,
        cell_size: TILE_SIZE as f32,
        color: Color::new(0.0, 0.0, 0.0, 0.25),
    });

    let canvas = (GRID_ROWS as i32 * TILE_SIZE) as f32;
    scene.panels.push(ScenePanel {
        position: Vec2::new(0.0, canvas - TOOLBAR_HEIGHT),
        size: Vec2::new((GRID_COLUMNS as i32 * TILE_SIZE) as f32, TOOLBAR_HEIGHT),
        color: Color::new(0.0, 0.0, 0.0, 0.55),
    });
    scene.hud.push(HudText::new(
        format!(
            "Slot: {slot}   Undo: {}   Redo: {}",
            editor.undo_depth(),
            editor.redo_depth()
        ),
        HudAnchor::TopLeft,
        Vec2::new(10.0, canvas - 12.0),
        HINT_FONT,
        palette::GREEN,
    ));
    let (label, color) = if previewing {
        ("Preview ON (Tab)", palette::ON)
    } else {
        ("Preview OFF (Tab)", palette::OFF)
    };
    scene.hud.push(HudText::new(
        label,
        HudAnchor::TopLeft,
        Vec2::new(420.0, canvas - 12.0),
        HINT_FONT,
        color,
    ));
    let rect = player.rect();
    scene.hud.push(HudText::new(
        format!("Player: ({}, {})", rect.x(), rect.y()),
        HudAnchor::TopLeft,
        Vec2::new(680.0, canvas - 12.0),
        HINT_FONT,
        palette::WHITE,
    ));
}

const fn spawns_entity(code: TileCode) -> bool {
    matches!(
        code,
        TileCode::EnemySpawn | TileCode::PlatformHorizontal | TileCode::PlatformVertical
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_core::{LevelLoadError, LevelNumber, PlayerInput, TileCoord, TileGrid};
    use platformer_system_player::PlayerConfig;
    use platformer_system_session::SessionConfig;

    struct OneLevel(TileGrid);

    impl LevelSource for OneLevel {
        fn load_grid(&self, level: LevelNumber) -> Result<TileGrid, LevelLoadError> {
            if level == LevelNumber::FIRST {
                Ok(self.0.clone())
            } else {
                Err(LevelLoadError::Missing { level })
            }
        }

        fn max_available_level(&self) -> u32 {
            1
        }
    }

    fn floor_level() -> TileGrid {
        let mut grid = TileGrid::empty();
        for column in 0..GRID_COLUMNS {
            assert!(grid.set(TileCoord::new(column, 19), TileCode::Grass));
        }
        assert!(grid.set(TileCoord::new(0, 0), TileCode::Dirt));
        grid
    }

    fn count(scene: &Scene, key: SpriteKey) -> usize {
        scene.sprites.iter().filter(|sprite| sprite.key == key).count()
    }

    fn texts(scene: &Scene) -> Vec<&str> {
        scene.hud.iter().map(|text| text.text.as_str()).collect()
    }

    #[test]
    fn play_scene_culls_tiles_outside_camera() {
        let session = Session::new(OneLevel(floor_level()), SessionConfig::default());
        let mut scene = Scene::new(0);
        compose_play(&session, 2, &mut scene);

        assert_eq!(scene.background, 2);
        assert_eq!(count(&scene, SpriteKey::Grass), 17);
        assert_eq!(count(&scene, SpriteKey::Dirt), 0);
        assert_eq!(count(&scene, SpriteKey::PlayerWalk), 1);
        assert_eq!(count(&scene, SpriteKey::Coin), 1);
        assert_eq!(texts(&scene), vec!["SCORE: 0", "LEVEL: 1"]);
        assert!(scene.panels.is_empty());
    }

    #[test]
    fn play_scene_positions_are_screen_space() {
        let session = Session::new(OneLevel(floor_level()), SessionConfig::default());
        let mut scene = Scene::new(0);
        compose_play(&session, 0, &mut scene);

        let camera = session.state().camera();
        let player = scene
            .sprites
            .iter()
            .find(|sprite| sprite.key == SpriteKey::PlayerWalk)
            .expect("player sprite");
        let rect = session.state().player().rect();
        assert_eq!(
            player.position,
            Vec2::new((rect.x() - camera.x()) as f32, (rect.y() - camera.y()) as f32)
        );
        assert_eq!(player.size, Vec2::new(40.0, 80.0));
    }

    #[test]
    fn dead_player_is_a_ghost_with_banner() {
        let mut grid = floor_level();
        assert!(grid.set(TileCoord::new(2, 18), TileCode::Lava));
        let mut session = Session::new(OneLevel(grid), SessionConfig::default());
        let mut sounds = Vec::new();
        session.tick(PlayerInput::IDLE, &mut sounds);
        assert_eq!(session.phase(), SessionPhase::GameOver);

        let mut scene = Scene::new(0);
        compose_play(&session, 0, &mut scene);
        assert_eq!(count(&scene, SpriteKey::Ghost), 1);
        assert_eq!(count(&scene, SpriteKey::PlayerWalk), 0);
        assert!(texts(&scene).contains(&"GAME OVER"));
        assert_eq!(scene.panels.len(), 1);
    }

    #[test]
    fn editor_scene_draws_grid_and_status() {
        let mut grid = TileGrid::empty();
        assert!(grid.set(TileCoord::new(4, 4), TileCode::EnemySpawn));
        assert!(grid.set(TileCoord::new(5, 4), TileCode::Lava));
        let mut editor = Editor::new(grid, PlayerConfig::default());
        let slot = SlotName::parse("arena").expect("valid slot");
        let mut scene = Scene::new(0);

        compose_editor(&editor, &slot, 1, &mut scene);
        assert!(scene.grid.is_some());
        assert_eq!(count(&scene, SpriteKey::Enemy), 1);
        assert_eq!(count(&scene, SpriteKey::Lava), 1);
        let enemy = scene
            .sprites
            .iter()
            .find(|sprite| sprite.key == SpriteKey::Enemy)
            .expect("enemy tile");
        assert_eq!(enemy.position, Vec2::new(200.0, 200.0));
        assert_eq!(enemy.size, Vec2::splat(50.0));
        assert!(texts(&scene).contains(&"Slot: arena   Undo: 0   Redo: 0"));
        assert!(texts(&scene).contains(&"Preview OFF (Tab)"));

        assert!(editor.toggle_preview());
        compose_editor(&editor, &slot, 1, &mut scene);
        let enemy = scene
            .sprites
            .iter()
            .find(|sprite| sprite.key == SpriteKey::Enemy)
            .expect("enemy entity");
        assert_eq!(enemy.size, Vec2::splat(60.0));
        assert_eq!(count(&scene, SpriteKey::Enemy), 1);
        assert!(texts(&scene).contains(&"Preview ON (Tab)"));
    }

    #[test]
    fn every_non_empty_tile_has_a_sprite() {
        for code in TileCode::ALL {
            assert_eq!(sprite_for_tile(code).is_some(), code != TileCode::Empty);
        }
    }
}
