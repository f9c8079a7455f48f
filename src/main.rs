// Brand logo painter.
// • Left mouse paints with the current brush; keys 1-6 pick black, red,
//   green, blue, yellow, eraser. +/- change the brush size.
// • S saves the canvas as the brand's logo, L reloads it, C clears. ESC quits.

mod draw;

use anyhow::{Context, Result};
use clap::Parser;
use draw::{Command, Drawer, Frame, PointerEvent, compose_frame};
use log::{error, info, warn};
use logo_painter::{BlobStore, BrandId, Config, Editor, FsBlobStore};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "logo-painter")]
#[command(version, about = "Paint and store brand logos")]
struct Cli {
    /// Brand whose logo is edited
    #[arg(long, short = 'b', value_name = "ID")]
    brand: BrandId,

    /// Directory holding stored logos (overrides the config file)
    #[arg(long, value_name = "DIR")]
    store: Option<PathBuf>,

    /// PNG or JPEG file to center on the canvas after loading
    #[arg(long, short = 'i', value_name = "FILE")]
    import: Option<PathBuf>,

    /// Write the canvas to this PNG file and exit without opening a window
    #[arg(long, short = 'e', value_name = "FILE")]
    export: Option<PathBuf>,

    /// Config file to use instead of ~/.config/logo-painter/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let store_dir = match cli.store {
        Some(dir) => dir,
        None => config.store_dir()?,
    };
    let mut store = FsBlobStore::new(store_dir);
    let mut editor = Editor::from_config(&config)?;

    reload(&mut editor, &store, cli.brand)?;

    if let Some(path) = &cli.import {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        editor
            .load(&bytes)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        info!("Imported {}", path.display());
    }

    if let Some(path) = &cli.export {
        let bytes = editor.export()?;
        fs::write(path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Exported {} bytes to {}", bytes.len(), path.display());
        return Ok(());
    }

    run_window(&mut editor, &mut store, cli.brand)
}

/// Pull the brand's logo from the store. Undecodable bytes leave a blank
/// canvas and a warning; store I/O failures are fatal.
fn reload(editor: &mut Editor, store: &FsBlobStore, brand: BrandId) -> Result<()> {
    let bytes = store
        .load(brand)
        .with_context(|| format!("Failed to read logo for brand {brand}"))?
        .unwrap_or_default();
    if bytes.is_empty() {
        info!("Brand {} has no logo yet, starting blank", brand);
    }
    if let Err(e) = editor.load(&bytes) {
        warn!("Stored logo for brand {} is unreadable ({}); starting blank", brand, e);
    }
    Ok(())
}

fn save(editor: &Editor, store: &mut FsBlobStore, brand: BrandId) -> Result<()> {
    let bytes = editor.export()?;
    store.save(brand, &bytes)?;
    Ok(())
}

fn title(editor: &Editor, brand: BrandId, tool: &str) -> String {
    format!(
        "Logo Painter | brand {} | {} | {:.0} px",
        brand,
        tool,
        editor.brush().radius()
    )
}

fn run_window(editor: &mut Editor, store: &mut FsBlobStore, brand: BrandId) -> Result<()> {
    let (w, h) = (editor.canvas().width(), editor.canvas().height());
    let mut tool_name = editor
        .palette()
        .get(0)
        .map_or("pen", |e| e.name)
        .to_string();
    let mut drawer = Drawer::new(&title(editor, brand, &tool_name), w, h)?;
    let mut frame = Frame::for_canvas(editor.canvas());

    while drawer.is_open() {
        match drawer.poll_pointer() {
            Some(PointerEvent::Down(x, y)) => editor.pointer_down(x, y),
            Some(PointerEvent::Move(x, y)) => editor.pointer_move(x, y),
            Some(PointerEvent::Up) => editor.pointer_up(),
            None => {}
        }

        let mut retitle = false;
        for cmd in drawer.poll_commands() {
            match cmd {
                Command::SelectTool(slot) => {
                    if editor.select_tool(slot) {
                        if let Some(entry) = editor.palette().get(slot) {
                            tool_name = entry.name.to_string();
                        }
                        retitle = true;
                    }
                }
                Command::GrowBrush => {
                    editor.adjust_radius(1);
                    retitle = true;
                }
                Command::ShrinkBrush => {
                    editor.adjust_radius(-1);
                    retitle = true;
                }
                Command::Clear => editor.clear(),
                Command::Save => match save(editor, store, brand) {
                    Ok(()) => info!("Logo for brand {} saved", brand),
                    Err(e) => error!("Saving logo failed: {:#}", e),
                },
                Command::Reload => {
                    if let Err(e) = reload(editor, store, brand) {
                        error!("{:#}", e);
                    }
                }
            }
        }
        if retitle {
            drawer.set_title(&title(editor, brand, &tool_name));
        }

        let moved = drawer.mouse_moved();
        if editor.take_redraw() || moved {
            compose_frame(&mut frame, editor, drawer.mouse_pos());
            drawer.present(&frame)?;
        } else {
            drawer.idle();
        }
    }

    Ok(())
}
