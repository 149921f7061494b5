//! Tile sheet demo
//!
//! Loads a tile sheet (or generates one when no path is given), splits it
//! into tiles and draws them spinning around the window center. Tab toggles
//! a text input whose contents become the window caption; Escape quits.
//!
//! Usage: `tiles_demo [sheet.png] [config.toml]`

use rust_gosu::foundation::logging;
use rust_gosu::graphics::load_tiles;
use rust_gosu::prelude::*;
use thiserror::Error;

const TILE_SIZE: i32 = 16;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] rust_gosu::core::ConfigError),

    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}

struct TilesDemo {
    tiles: Vec<Image>,
    angle: f64,
    ticks: u64,
}

impl TilesDemo {
    fn new(tiles: Vec<Image>) -> Self {
        Self {
            tiles,
            angle: 0.0,
            ticks: 0,
        }
    }
}

impl Game for TilesDemo {
    fn update(&mut self, window: &mut Window) -> GameResult<()> {
        self.ticks += 1;
        self.angle = (self.angle + 2.0) % 360.0;

        let typed = window.input().text_input().map(|input| input.text().to_string());
        if let Some(text) = typed {
            if text != window.caption() {
                window.set_caption(text);
            }
        }
        Ok(())
    }

    fn draw(&mut self, window: &mut Window) -> GameResult<()> {
        let center_x = f64::from(window.width()) / 2.0;
        let center_y = f64::from(window.height()) / 2.0;
        let count = self.tiles.len().max(1) as f64;

        for (i, tile) in self.tiles.iter().enumerate() {
            let phase = (self.angle + 360.0 * i as f64 / count).to_radians();
            let x = center_x + phase.cos() * center_y * 0.6;
            let y = center_y + phase.sin() * center_y * 0.6;
            let shade = if i % 2 == 0 { Color::WHITE } else { Color::AQUA };

            draw!(tile, PositionOfCenter(x, y), Rotate(self.angle), ScaleAbsolute(32.0, 32.0), shade, ZPosSet(i as f64));
        }

        if let Some(first) = self.tiles.first() {
            draw!(
                first,
                at 4.0, 4.0, -1.0;
                Scale(2.0, 2.0),
                ColorSet(Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW),
                AlphaMode::Additive,
            );
        }
        Ok(())
    }

    fn needs_cursor(&self) -> bool {
        true
    }

    fn button_down(&mut self, window: &mut Window, button: Button) -> GameResult<()> {
        match button {
            Button::Escape => window.close(),
            Button::Tab => {
                let input = window.input_mut();
                if input.text_input().is_some() {
                    input.set_text_input(None);
                    log::info!("Text input disabled");
                } else {
                    input.set_text_input(Some(TextInput::new()));
                    log::info!("Text input enabled");
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Checkerboard sheet of 4x2 tiles used when no file is given
fn generated_sheet() -> Bitmap {
    let colors = [
        Color::RED,
        Color::GREEN,
        Color::BLUE,
        Color::YELLOW,
        Color::AQUA,
        Color::FUCHSIA,
        Color::GRAY,
        Color::WHITE,
    ];
    let size = TILE_SIZE as u32;
    let mut sheet = Bitmap::new(size * 4, size * 2, Color::NONE);
    for y in 0..sheet.height() {
        for x in 0..sheet.width() {
            let tile = (y / size * 4 + x / size) as usize;
            let checker = (x / 4 + y / 4) % 2 == 0;
            let color = if checker { colors[tile] } else { colors[tile].with_alpha(128) };
            sheet.set_pixel(x, y, color);
        }
    }
    sheet
}

fn run() -> Result<(), DemoError> {
    let mut args = std::env::args().skip(1);
    let sheet_path = args.next();
    let config_path = args.next().unwrap_or_else(|| "tiles_demo.toml".to_string());

    let config = WindowConfig::load_or_default(&config_path)?.with_caption("Tiles Demo");
    logging::init_with_level(&config.log_level);
    log::info!("Starting tiles demo with {:?}", config);

    let mut window = Window::new(&config)?;
    let tiles = match sheet_path {
        Some(path) => {
            let sheet = Bitmap::from_file(&path)?;
            load_tiles(window.graphics(), &sheet, TILE_SIZE, TILE_SIZE, ImageFlags::smooth())?
        }
        None => load_tiles(window.graphics(), &generated_sheet(), -4, -2, ImageFlags::tileable())?,
    };
    log::info!("Loaded {} tiles", tiles.len());

    let mut demo = TilesDemo::new(tiles);
    window.show(&mut demo)?;
    log::info!("Demo finished after {} ticks", demo.ticks);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        log::error!("{}", err);
        eprintln!("tiles_demo: {}", err);
        std::process::exit(1);
    }
}
