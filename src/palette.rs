// Preset drawing tools: five pen colors plus the eraser.

use crate::types::Color;

/// What a palette slot does when picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Pen(Color),
    /// Paints with the canvas background color.
    Eraser,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: &'static str,
    pub tool: Tool,
}

/// Ordered list of tools, addressed by slot index (keys 1..=6 in the host).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Black, red, green, blue, yellow, eraser.
    pub fn standard() -> Self {
        let pen = |name, color| PaletteEntry {
            name,
            tool: Tool::Pen(color),
        };
        Self {
            entries: vec![
                pen("black", Color::BLACK),
                pen("red", Color::rgb(255, 0, 0)),
                pen("green", Color::rgb(0, 200, 0)),
                pen("blue", Color::rgb(0, 0, 255)),
                pen("yellow", Color::rgb(255, 255, 0)),
                PaletteEntry {
                    name: "eraser",
                    tool: Tool::Eraser,
                },
            ],
        }
    }

    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

/// Map a color name from the palette (or "white") to its color.
pub fn name_to_color(name: &str) -> Option<Color> {
    let name = name.trim().to_lowercase();
    if name == "white" {
        return Some(Color::WHITE);
    }
    Palette::standard().iter().find_map(|e| match e.tool {
        Tool::Pen(c) if e.name == name => Some(c),
        _ => None,
    })
}
