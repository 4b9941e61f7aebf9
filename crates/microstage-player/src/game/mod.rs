//! Game logic — menu bar, scene dispatch, shell state
//!
//! The shell owns every scene plus the two pieces of cross-frame state
//! the menu controls: which scene is active (possibly none) and whether
//! the exit hint is showing. Scene transitions happen only through menu
//! clicks; the engine feeds input in and calls update/draw once per
//! frame.

pub mod cursor;
pub mod dancer;
pub mod sound_pad;

use microstage_common::DemoConfig;

use crate::assets::AssetStore;
use crate::engine::font;
use crate::engine::palette;
use crate::engine::sound_engine::{NoteBank, SoundEngine};
use crate::game::dancer::DancerScene;
use crate::game::sound_pad::PadScene;

/// Which scene is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Dancer,
    Message,
    SoundPad,
}

/// One clickable label on the menu bar
pub struct MenuEntry {
    pub x: i32,
    pub y: i32,
    pub label: &'static str,
    pub color: u32,
}

impl MenuEntry {
    /// Bounding box: 4 px of advance per glyph, 5 px tall, edges inclusive
    pub fn contains(&self, px: i32, py: i32) -> bool {
        let right = self.x + font::text_width(self.label);
        let bottom = self.y + font::GLYPH_HEIGHT;
        px >= self.x && px <= right && py >= self.y && py <= bottom
    }
}

/// The menu bar. The first three entries select scenes; the last clears
/// the active scene and shows the quit reminder.
pub const MENU: [MenuEntry; 4] = [
    MenuEntry { x: 2, y: 2, label: "Dance", color: palette::CYAN },
    MenuEntry { x: 32, y: 2, label: "Info", color: palette::LIME },
    MenuEntry { x: 64, y: 2, label: "Pads", color: palette::PURPLE },
    MenuEntry { x: 96, y: 2, label: "X", color: palette::ORANGE },
];

/// Scene activated by each scene-selecting menu entry, in menu order
const SCENES: [Scene; 3] = [Scene::Dancer, Scene::Message, Scene::SoundPad];

const MESSAGE_TEXT: &str = "Hello from the canvas!";
const EXIT_HINT: &str = "Press 'q' to quit";

/// Hit-test a canvas point against the menu in list order, first match wins
pub fn detect_menu_click(x: i32, y: i32) -> Option<usize> {
    MENU.iter().position(|entry| entry.contains(x, y))
}

/// Held arrow-key state, polled by the engine each frame
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Central shell state
pub struct GameState {
    pub assets: AssetStore,
    current_scene: Option<Scene>,
    show_exit_hint: bool,
    /// Frames since startup; drives the dance animation
    frame: u64,
    mouse_x: i32,
    mouse_y: i32,
    mouse_down: bool,
    move_keys: MoveKeys,
    pub dancer: DancerScene,
    pub pad: PadScene,
    sound: Option<SoundEngine>,
}

impl GameState {
    pub fn new(assets: AssetStore, config: &DemoConfig) -> Self {
        let mut sound = SoundEngine::new(NoteBank::new());
        if let Some(snd) = &mut sound {
            snd.set_volume(config.master_volume);
        }
        Self::with_sound(assets, sound)
    }

    fn with_sound(assets: AssetStore, sound: Option<SoundEngine>) -> Self {
        tracing::info!(
            "Game state initialized, sheet from {}",
            assets.source.display()
        );
        Self {
            assets,
            current_scene: None,
            show_exit_hint: false,
            frame: 0,
            mouse_x: 0,
            mouse_y: 0,
            mouse_down: false,
            move_keys: MoveKeys::default(),
            dancer: DancerScene::new(24, 24),
            pad: PadScene::new(),
            sound,
        }
    }

    pub fn current_scene(&self) -> Option<Scene> {
        self.current_scene
    }

    #[allow(dead_code)] // Used by unit tests
    pub fn exit_hint_shown(&self) -> bool {
        self.show_exit_hint
    }

    /// Mouse position and held-button state, in canvas coordinates
    pub fn on_mouse_state(&mut self, x: i32, y: i32, down: bool) {
        self.mouse_x = x;
        self.mouse_y = y;
        self.mouse_down = down;
    }

    pub fn update_move_keys(&mut self, up: bool, down: bool, left: bool, right: bool) {
        self.move_keys = MoveKeys { up, down, left, right };
    }

    /// Advance the active scene by one frame
    pub fn update(&mut self) {
        match self.current_scene {
            Some(Scene::Dancer) => self.dancer.update(self.frame, self.move_keys),
            Some(Scene::Message) | None => {}
            Some(Scene::SoundPad) => {
                if self.mouse_down {
                    if let Some(index) = self.pad.select(self.mouse_x, self.mouse_y) {
                        if let Some(snd) = &mut self.sound {
                            snd.play_note(index);
                        }
                    }
                } else {
                    self.pad.release();
                }
            }
        }

        // Drop finished note sinks
        if let Some(snd) = &mut self.sound {
            snd.gc();
        }

        self.frame += 1;
    }

    /// Resolve a fresh left-click edge against the menu bar. Clicks that
    /// land outside every entry select nothing.
    pub fn on_click(&mut self, x: i32, y: i32) {
        let Some(index) = detect_menu_click(x, y) else {
            return;
        };
        if index == MENU.len() - 1 {
            self.current_scene = None;
            self.show_exit_hint = true;
            tracing::info!("Scene cleared, showing exit hint");
            return;
        }
        self.show_exit_hint = false;
        self.switch_scene(SCENES[index]);
    }

    fn switch_scene(&mut self, scene: Scene) {
        if self.current_scene != Some(scene) {
            tracing::info!("Scene switch -> {:?}", scene);
        }
        self.current_scene = Some(scene);
    }

    /// Render the menu bar, the active scene, and the exit hint
    pub fn draw(&self, fb: &mut [u32]) {
        for entry in &MENU {
            font::draw_text(fb, entry.x, entry.y, entry.label, entry.color);
        }

        match self.current_scene {
            Some(Scene::Dancer) => self.dancer.draw(fb, &self.assets.sheet),
            Some(Scene::Message) => font::draw_text(fb, 10, 10, MESSAGE_TEXT, palette::RED),
            Some(Scene::SoundPad) => self.pad.draw(fb, &self.assets.sheet),
            None => {}
        }

        if self.show_exit_hint {
            font::draw_text(fb, 10, 70, EXIT_HINT, palette::RED);
        }
    }
}
