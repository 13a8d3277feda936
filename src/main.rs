use arboard::Clipboard;
use log::{error, info, warn};
use macroquad::prelude::*;
use rustcaster::config::Config;
use rustcaster::input::{Direction, InputEvent, InputSource};
use rustcaster::input_log::InputLog;
use rustcaster::scene::{DrawCommand, Paint, Renderer};
use rustcaster::snapshot::FrameSnapshot;
use rustcaster::Simulation;
use std::io::Write;

const KEY_BINDINGS: [(KeyCode, Direction); 4] = [
    (KeyCode::Up, Direction::MoveForward),
    (KeyCode::Down, Direction::MoveBackward),
    (KeyCode::Left, Direction::TurnLeft),
    (KeyCode::Right, Direction::TurnRight),
];

/// Arrow keys read through macroquad
struct Keyboard;

impl InputSource for Keyboard {
    fn poll(&mut self, events: &mut Vec<InputEvent>) {
        for (key, direction) in KEY_BINDINGS {
            if is_key_pressed(key) {
                events.push(InputEvent::pressed(direction));
            }
            if is_key_released(key) {
                events.push(InputEvent::released(direction));
            }
        }
    }
}

/// Draws scene commands with macroquad shapes
struct ScreenRenderer;

impl ScreenRenderer {
    fn color(paint: Paint) -> Color {
        match paint {
            Paint::MinimapWall => BLACK,
            Paint::MinimapFloor => WHITE,
            Paint::Viewer => RED,
            Paint::RayTrace => Color::new(1.0, 0.0, 0.0, 0.3),
            Paint::WallLit => WHITE,
            Paint::WallShaded => Color::from_rgba(200, 200, 200, 255),
        }
    }
}

impl Renderer for ScreenRenderer {
    fn draw(&mut self, command: &DrawCommand) {
        match *command {
            DrawCommand::Rect { x, y, w, h, paint } => {
                let (x, y, w, h) = (x as f32, y as f32, w as f32, h as f32);
                draw_rectangle(x, y, w, h, Self::color(paint));
                if matches!(paint, Paint::MinimapWall | Paint::MinimapFloor) {
                    draw_rectangle_lines(x, y, w, h, 1.0, BLACK);
                }
            }
            DrawCommand::Line { x1, y1, x2, y2, paint } => {
                draw_line(x1 as f32, y1 as f32, x2 as f32, y2 as f32, 1.0, Self::color(paint));
            }
            DrawCommand::Circle { x, y, radius, paint } => {
                draw_circle(x as f32, y as f32, radius as f32, Self::color(paint));
            }
        }
    }
}

struct App {
    config: Config,
    sim: Simulation,
    input_log: InputLog,
}

impl App {
    fn copy_map_to_clipboard(&self) {
        let pose = self.sim.pose();
        let grid = self.sim.grid();
        let text = grid.to_text(Some(grid.tile_at(pose.x, pose.y)));
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&text) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Map copied to clipboard");
                    // X11 drops the selection once its owner is gone
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => warn!("Failed to access clipboard: {}", e),
        }
    }

    fn save_snapshot(&self) {
        let path = &self.config.logging.snapshot_path;
        match FrameSnapshot::capture(&self.sim).save_to_file(path) {
            Ok(()) => info!("Frame snapshot written to {}", path),
            Err(e) => error!("{}", e),
        }
    }

    fn save_input_log(&self) {
        if !self.config.logging.enable_input_log {
            return;
        }
        let path = &self.config.logging.input_log_path;
        match self.input_log.save_to_file(path) {
            Ok(()) => {
                info!("Input log written to {}", path);
                info!("{}", self.input_log.summary());
            }
            Err(e) => error!("Failed to write input log: {}", e),
        }
    }

    fn draw_backdrop(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(visual.background_r, visual.background_g, visual.background_b, 255));
        draw_rectangle(
            0.0,
            0.0,
            self.sim.screen_width() as f32,
            self.sim.screen_height() as f32 / 2.0,
            Color::from_rgba(visual.ceiling_r, visual.ceiling_g, visual.ceiling_b, 255),
        );
    }
}

async fn run(mut app: App) {
    let mut keyboard = Keyboard;
    let mut renderer = ScreenRenderer;
    let mut events = Vec::new();
    let mut commands = Vec::new();

    loop {
        // Close window on Escape
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        keyboard.poll(&mut events);
        for event in events.drain(..) {
            if app.config.logging.enable_input_log {
                app.input_log.log(event);
            }
            app.sim.apply_input(event);
        }

        // Copy map to clipboard on C key
        if is_key_pressed(KeyCode::C) {
            app.copy_map_to_clipboard();
        }

        app.sim.tick();

        if is_key_pressed(KeyCode::S) {
            app.save_snapshot();
        }

        app.draw_backdrop();
        app.sim.draw_commands(&mut commands);
        renderer.draw_all(&commands);

        next_frame().await
    }

    app.save_input_log();
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let config = Config::load();
    let sim = match Simulation::from_config(&config) {
        Ok(sim) => sim,
        Err(e) => {
            error!("Cannot start: {}", e);
            std::process::exit(1);
        }
    };

    let window = Conf {
        window_title: config.visual.window_title.clone(),
        window_width: sim.screen_width() as i32,
        window_height: sim.screen_height() as i32,
        window_resizable: false,
        ..Default::default()
    };

    let app = App {
        config,
        sim,
        input_log: InputLog::new(),
    };

    macroquad::Window::from_config(window, run(app));
}
