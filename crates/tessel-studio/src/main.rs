mod panel;

use anyhow::Result;
use tessel_bridge::coords::Vec2;
use tessel_bridge::feature::{Feature, FeatureRegistry, ScreenGate};
use tessel_bridge::logging::{init_logging, LoggingConfig};
use tessel_bridge::paint::Color;
use tessel_bridge::ui::{FontId, UiContext};
use tessel_bridge::OverlayRenderer;
use tessel_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use tessel_engine::device::GpuInit;
use tessel_engine::host::WgpuHost;
use tessel_engine::window::{Runtime, RuntimeConfig};
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

const FONT_SIZE: f32 = 15.0;

/// Simulated host screens, cycled with `S`.
const SCREENS: [&str; 4] = ["hud_screen", "toast_screen", "pause_screen", "debug_screen"];

struct Studio {
    ui: UiContext,
    overlay: OverlayRenderer,
    features: FeatureRegistry,
    gate: ScreenGate,
    screen: usize,
    font: Option<FontId>,
}

impl Studio {
    fn new() -> Self {
        let mut ui = UiContext::default();
        let font = load_font(&mut ui);
        let mut overlay = OverlayRenderer::default();
        overlay.initialize(&mut ui);

        let mut features = FeatureRegistry::new();
        features.register(
            Feature::new("Zoom")
                .with_description("Smoothly zoom the view")
                .with_setting("Factor", 0.35_f32)
                .with_setting("Animated", true),
        );
        features.register(
            Feature::new("Block Outline")
                .with_setting("Color", Color::rgba(1.0, 0.8, 0.2, 1.0))
                .with_setting("Width", 2_i32),
        );
        features.register(Feature::new("Fullbright").with_enabled(true));
        features.register(Feature::unnamed().with_setting("Debug", false));

        Self { ui, overlay, features, gate: ScreenGate::default(), screen: 0, font }
    }

    fn handle_key(&mut self, key: KeyCode) -> AppControl {
        match key {
            KeyCode::Escape => return AppControl::Exit,
            KeyCode::KeyS => {
                self.screen = (self.screen + 1) % SCREENS.len();
                log::info!("host screen: {}", SCREENS[self.screen]);
            }
            // Simulates the host dropping its resources.
            KeyCode::KeyR => self.overlay.mark_unloaded(),
            _ => {
                let id = digit(key).and_then(|n| self.features.iter().nth(n - 1)).map(|(id, _)| id);
                if let Some(id) = id {
                    self.features.toggle(id);
                }
            }
        }
        AppControl::Continue
    }
}

impl App for Studio {
    fn on_window_created(&mut self, _window: &WindowCtx<'_>, host: &mut WgpuHost) {
        host.register_material(self.overlay.config().material.clone());
    }

    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(key), state: ElementState::Pressed, repeat: false, .. },
                ..
            } => self.handle_key(*key),
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Self { ui, overlay, features, gate, screen, font } = self;

        ctx.render(Color::rgb(0.18, 0.20, 0.24), |host| {
            if !gate.observe(SCREENS[*screen]) {
                return;
            }
            overlay.begin_frame(ui, host);
            panel::draw(ui, overlay, features, *font, Vec2::new(16.0, 16.0));
            let draw_data = ui.render();
            overlay.submit(&draw_data, ui, host);
        })
    }
}

fn digit(key: KeyCode) -> Option<usize> {
    let n = match key {
        KeyCode::Digit1 => 1,
        KeyCode::Digit2 => 2,
        KeyCode::Digit3 => 3,
        KeyCode::Digit4 => 4,
        KeyCode::Digit5 => 5,
        KeyCode::Digit6 => 6,
        KeyCode::Digit7 => 7,
        KeyCode::Digit8 => 8,
        KeyCode::Digit9 => 9,
        _ => return None,
    };
    Some(n)
}

fn load_font(ui: &mut UiContext) -> Option<FontId> {
    let bytes = [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok());

    let Some(bytes) = bytes else {
        log::warn!("no system font found; panel text disabled");
        return None;
    };
    match ui.fonts_mut().add_font_from_bytes(&bytes, FONT_SIZE) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("{e}; panel text disabled");
            None
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "tessel studio".to_string(),
        ..RuntimeConfig::default()
    };
    Runtime::run(config, GpuInit::default(), Studio::new())
}
