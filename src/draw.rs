// Host window: shows the canvas, turns mouse/keyboard into editor calls.
// Overlays (crosshair, brush ring) go into the presented frame only,
// never into the editor's pixel buffer.

use anyhow::{Context, Result};
use logo_painter::{Editor, PixelBuffer};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Presentation frame, 0x00RRGGBB per pixel like minifb wants.
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Frame {
    pub fn for_canvas(canvas: &PixelBuffer) -> Self {
        let mut pixels = Vec::with_capacity(canvas.width() * canvas.height());
        canvas.write_0rgb(&mut pixels);
        Self {
            width: canvas.width(),
            height: canvas.height(),
            pixels,
        }
    }

    pub fn refresh(&mut self, canvas: &PixelBuffer) {
        canvas.write_0rgb(&mut self.pixels);
    }

    /// Overlay pixel; anything off the frame is dropped.
    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: u32) {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return;
        };
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    /// Axis-aligned run from `a` to `b` inclusive, in either order.
    ///
    /// Visual (horizontal, a=-2, b=2):
    /// ```text
    /// #####
    /// ```
    fn span(&mut self, horizontal: bool, fixed: i32, a: i32, b: i32, color: u32) {
        for t in a.min(b)..=a.max(b) {
            if horizontal {
                self.plot(t, fixed, color);
            } else {
                self.plot(fixed, t, color);
            }
        }
    }

    /// Cursor marker: four arms of length `arm` around an open center.
    ///
    /// Visual (arm=4, gap=1):
    /// ```text
    ///     #
    ///     #
    ///     #
    ///
    /// ###   ###
    ///
    ///     #
    ///     #
    ///     #
    /// ```
    fn crosshair(&mut self, cx: i32, cy: i32, arm: i32, gap: i32, color: u32) {
        self.span(true, cy, cx - arm, cx - gap - 1, color);
        self.span(true, cy, cx + gap + 1, cx + arm, color);
        self.span(false, cx, cy - arm, cy - gap - 1, color);
        self.span(false, cx, cy + gap + 1, cy + arm, color);
    }

    /// Midpoint circle outline, one pixel wide.
    fn ring(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        let (mut x, mut y) = (r, 0);
        let mut err = 1 - r;
        while x >= y {
            for (px, py) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
                self.plot(cx + px, cy + py, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }
}

/// Pointer transitions derived from the left button between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(f32, f32),
    Move(f32, f32),
    Up,
}

/// One-shot key commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SelectTool(usize),
    GrowBrush,
    ShrinkBrush,
    Clear,
    Save,
    Reload,
}

pub struct Drawer {
    window: Window,
    was_down: bool,
    last_mouse: Option<(f32, f32)>,
}

impl Drawer {
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("Failed to open window")?;
        window.set_target_fps(60);
        Ok(Self {
            window,
            was_down: false,
            last_mouse: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// Push the frame to the screen (also pumps window events).
    pub fn present(&mut self, frame: &Frame) -> Result<()> {
        self.window
            .update_with_buffer(&frame.pixels, frame.width, frame.height)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("Failed to update window")
    }

    /// Pump window events without uploading a new frame.
    pub fn idle(&mut self) {
        self.window.update();
    }

    /// Mouse position in canvas pixels; may lie outside the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Pass)
    }

    /// True when the mouse moved since the previous call.
    pub fn mouse_moved(&mut self) -> bool {
        let now = self.mouse_pos();
        let moved = now != self.last_mouse;
        self.last_mouse = now;
        moved
    }

    /// Edge-detect the left button into down/move/up.
    pub fn poll_pointer(&mut self) -> Option<PointerEvent> {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let pos = self.mouse_pos();
        let event = match (self.was_down, down, pos) {
            (false, true, Some((x, y))) => Some(PointerEvent::Down(x, y)),
            (true, true, Some((x, y))) => Some(PointerEvent::Move(x, y)),
            (true, false, _) => Some(PointerEvent::Up),
            _ => None,
        };
        self.was_down = down;
        event
    }

    pub fn poll_commands(&self) -> Vec<Command> {
        const TOOL_KEYS: [Key; 6] = [Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Key5, Key::Key6];

        let mut out = Vec::new();
        for (slot, key) in TOOL_KEYS.iter().enumerate() {
            if self.pressed(&[*key], false) {
                out.push(Command::SelectTool(slot));
            }
        }
        if self.pressed(&[Key::Equal, Key::NumPadPlus], true) {
            out.push(Command::GrowBrush);
        }
        if self.pressed(&[Key::Minus, Key::NumPadMinus], true) {
            out.push(Command::ShrinkBrush);
        }
        if self.pressed(&[Key::C], false) {
            out.push(Command::Clear);
        }
        if self.pressed(&[Key::S], false) {
            out.push(Command::Save);
        }
        if self.pressed(&[Key::L], false) {
            out.push(Command::Reload);
        }
        out
    }

    fn pressed(&self, keys: &[Key], repeat: bool) -> bool {
        keys.iter().any(|k| {
            let repeat = if repeat { KeyRepeat::Yes } else { KeyRepeat::No };
            self.window.is_key_pressed(*k, repeat)
        })
    }
}

/// Rebuild the frame from the editor and draw the cursor overlays on top.
pub fn compose_frame(frame: &mut Frame, editor: &Editor, mouse: Option<(f32, f32)>) {
    frame.refresh(editor.canvas());
    if let Some((mx, my)) = mouse {
        let (cx, cy) = (mx.floor() as i32, my.floor() as i32);
        let ring = editor.brush().radius().min(4096.0).floor() as i32;
        frame.ring(cx, cy, ring.max(1) + 1, RING_COLOR);
        frame.crosshair(cx, cy, 6, 1, CROSSHAIR_COLOR);
    }
}

const RING_COLOR: u32 = 0x00_80_80_80;
const CROSSHAIR_COLOR: u32 = 0x00_FF_CC_33;
