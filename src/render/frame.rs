use serde::{Deserialize, Serialize};

use crate::core::{ScreenRect, WindowSize};
use crate::error::{PlotError, PlotResult};
use crate::render::{CirclePrimitive, Color, LinePrimitive, RectOutlinePrimitive, TextPrimitive};

/// Draw phases of one frame, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    Border,
    Grid,
    Series,
    Titles,
    Legend,
    Overlay,
}

impl LayerKind {
    pub const CANONICAL_ORDER: [Self; 6] = [
        Self::Border,
        Self::Grid,
        Self::Series,
        Self::Titles,
        Self::Legend,
        Self::Overlay,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line(LinePrimitive),
    Circle(CirclePrimitive),
    RectOutline(RectOutlinePrimitive),
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> PlotResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::RectOutline(rect) => rect.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

/// Commands of one phase, in submission order, with an optional scissor rect.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLayer {
    pub kind: LayerKind,
    pub clip: Option<ScreenRect>,
    pub commands: Vec<DrawCommand>,
}

impl RenderLayer {
    #[must_use]
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            clip: None,
            commands: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Backend-agnostic scene for one draw pass.
///
/// Layers are fixed to [`LayerKind::CANONICAL_ORDER`]; backends draw them in
/// sequence so later phases are never hidden by earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub window: WindowSize,
    pub clear_color: Color,
    pub layers: Vec<RenderLayer>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn new(window: WindowSize, clear_color: Color) -> Self {
        Self {
            window,
            clear_color,
            layers: LayerKind::CANONICAL_ORDER
                .iter()
                .copied()
                .map(RenderLayer::new)
                .collect(),
        }
    }

    pub fn push(&mut self, kind: LayerKind, command: DrawCommand) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.commands.push(command);
        }
    }

    pub fn set_clip(&mut self, kind: LayerKind, clip: ScreenRect) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.clip = Some(clip);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> Option<&RenderLayer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    #[must_use]
    pub fn command_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.commands.len()).sum()
    }

    /// All commands in draw order.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.layers.iter().flat_map(|layer| layer.commands.iter())
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.window.is_valid() {
            return Err(PlotError::InvalidWindow {
                width: self.window.width,
                height: self.window.height,
            });
        }
        self.clear_color.validate()?;
        for layer in &self.layers {
            for command in &layer.commands {
                command.validate()?;
            }
        }
        Ok(())
    }

    fn layer_mut(&mut self, kind: LayerKind) -> Option<&mut RenderLayer> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCommand, LayerKind, LayeredRenderFrame};
    use crate::core::{ScreenPoint, ScreenRect, WindowSize};
    use crate::render::{Color, LinePrimitive, RectOutlinePrimitive};

    #[test]
    fn commands_flatten_in_canonical_layer_order() {
        let mut frame = LayeredRenderFrame::new(WindowSize::new(100, 50), Color::WHITE);
        frame.push(
            LayerKind::Overlay,
            DrawCommand::RectOutline(RectOutlinePrimitive::new(
                ScreenRect::new(1.0, 1.0, 5.0, 5.0),
                1.0,
                Color::GRAY,
            )),
        );
        frame.push(
            LayerKind::Grid,
            DrawCommand::Line(LinePrimitive::new(
                ScreenPoint::new(0.0, 1.0),
                ScreenPoint::new(5.0, 1.0),
                1.0,
                Color::BLACK,
            )),
        );

        let kinds: Vec<bool> = frame
            .commands()
            .map(|command| matches!(command, DrawCommand::Line(_)))
            .collect();
        assert_eq!(kinds, vec![true, false]);
        assert_eq!(frame.command_count(), 2);
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn zero_window_is_rejected() {
        let frame = LayeredRenderFrame::new(WindowSize::new(0, 10), Color::WHITE);
        assert!(frame.validate().is_err());
    }
}
