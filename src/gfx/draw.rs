use super::math::{Color, Rect};

/// Immediate-mode 2D drawing target. The real canvas lives outside this
/// crate; scenes only ever see this trait.
pub trait Surface {
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    /// Filled circle when `stroke` is `None`, otherwise a ring of that width.
    fn circle(&mut self, x: f32, y: f32, radius: f32, color: Color, stroke: Option<f32>);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Color,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
        stroke: Option<f32>,
    },
}

/// A surface that records what was drawn during the current frame.
#[derive(Debug, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
    viewport: [f32; 2],
}

impl CommandList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
            viewport: [0.0, 0.0],
        }
    }

    pub fn begin(&mut self, viewport_px: [f32; 2]) {
        self.viewport = viewport_px;
        self.commands.clear();
    }

    pub fn viewport(&self) -> [f32; 2] {
        self.viewport
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }
}

impl Surface for CommandList {
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            rect: Rect::new(x, y, w, h),
            color,
        });
    }

    fn circle(&mut self, x: f32, y: f32, radius: f32, color: Color, stroke: Option<f32>) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
            stroke,
        });
    }
}

/// Colors for the frame shared by every sketch.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub panel: Color,
    pub foreground: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            // hsl(0, 0%, 98%)
            background: Color::rgba(250, 250, 250, 255),
            panel: Color::rgba(0xe5, 0xb5, 0xb5, 255),
            foreground: Color::WHITE,
        }
    }
}

/// Background plus the inset panel the scene is drawn on.
pub fn backdrop(surface: &mut dyn Surface, viewport: Rect, margin: f32, palette: &Palette) {
    surface.rect(viewport.x, viewport.y, viewport.width, viewport.height, palette.background);
    let panel = viewport.inset(margin);
    surface.rect(panel.x, panel.y, panel.width, panel.height, palette.panel);
}

/// Timeline bar along the bottom of the panel, `playhead` of the way across.
pub fn progress_bar(
    surface: &mut dyn Surface,
    viewport: Rect,
    playhead: f32,
    margin: f32,
    color: Color,
) {
    surface.rect(
        viewport.x + margin * 2.0,
        viewport.y + viewport.height - margin * 2.0,
        (viewport.width - margin * 4.0) * playhead,
        4.0,
        color,
    );
}
