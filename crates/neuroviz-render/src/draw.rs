// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Drawing primitives
//!
//! Views never write markup directly. They call the primitives of a
//! [`DrawingSurface`]; [`DrawCommands`] records those calls so a frame can be
//! inspected in tests or replayed onto any other surface later.
//!
//! All coordinates are surface coordinates (y grows downward).

use neuroviz_math::Vec2;

/// Fill and stroke of a shape
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paint {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
    /// Dash pattern, e.g. `"6 6"`
    pub dash: Option<String>,
}

impl Paint {
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn stroke(color: impl Into<String>, width: f64) -> Self {
        Self {
            stroke: Some(color.into()),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(color.into());
        self.stroke_width = Some(width);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn dashed(mut self, pattern: impl Into<String>) -> Self {
        self.dash = Some(pattern.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextStyle {
    pub fill: Option<String>,
    /// CSS font size, e.g. `"14px"`
    pub font_size: Option<String>,
    pub anchor: TextAnchor,
    /// Offset from the anchor point in surface units
    pub dx: f64,
    pub dy: f64,
    /// Rotation in degrees about the surface origin, applied before positioning
    pub rotate: Option<f64>,
}

/// Pie slice from `center` to the rim between `start` and `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Vec2,
    pub radius: f64,
    /// Rim point where the slice begins
    pub start: Vec2,
    /// Rim point where the slice ends
    pub end: Vec2,
    /// Take the long way round (more than half a turn)
    pub large_arc: bool,
    /// Clockwise on screen from `start` to `end`
    pub clockwise: bool,
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f64,
        paint: Paint,
        tooltip: Option<String>,
    },
    Rect {
        origin: Vec2,
        width: f64,
        height: f64,
        paint: Paint,
    },
    Polygon {
        points: Vec<Vec2>,
        paint: Paint,
    },
    Line {
        from: Vec2,
        to: Vec2,
        paint: Paint,
        arrowhead: bool,
    },
    Sector {
        arc: Arc,
        paint: Paint,
    },
    Text {
        position: Vec2,
        content: String,
        style: TextStyle,
    },
}

/// Target of every view
pub trait DrawingSurface {
    /// Circle; `tooltip` is shown on hover where the surface supports it
    fn circle(&mut self, center: Vec2, radius: f64, paint: &Paint, tooltip: Option<&str>);

    /// Axis-aligned rectangle with its top-left corner at `origin`
    fn rect(&mut self, origin: Vec2, width: f64, height: f64, paint: &Paint);

    /// Closed polygon
    fn polygon(&mut self, points: &[Vec2], paint: &Paint);

    /// Straight segment, optionally ending in an arrowhead coloured like the stroke
    fn line(&mut self, from: Vec2, to: Vec2, paint: &Paint, arrowhead: bool);

    /// Filled pie slice
    fn sector(&mut self, arc: &Arc, paint: &Paint);

    fn text(&mut self, position: Vec2, content: &str, style: &TextStyle);
}

/// Recorder surface
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawCommands {
    commands: Vec<DrawCommand>,
}

impl DrawCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
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

    /// Issue every recorded primitive, in order, on `surface`
    pub fn replay<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::Circle {
                    center,
                    radius,
                    paint,
                    tooltip,
                } => surface.circle(*center, *radius, paint, tooltip.as_deref()),
                DrawCommand::Rect {
                    origin,
                    width,
                    height,
                    paint,
                } => surface.rect(*origin, *width, *height, paint),
                DrawCommand::Polygon { points, paint } => surface.polygon(points, paint),
                DrawCommand::Line {
                    from,
                    to,
                    paint,
                    arrowhead,
                } => surface.line(*from, *to, paint, *arrowhead),
                DrawCommand::Sector { arc, paint } => surface.sector(arc, paint),
                DrawCommand::Text {
                    position,
                    content,
                    style,
                } => surface.text(*position, content, style),
            }
        }
    }

    /// Recorded text contents, in drawing order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for DrawCommands {
    fn circle(&mut self, center: Vec2, radius: f64, paint: &Paint, tooltip: Option<&str>) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            paint: paint.clone(),
            tooltip: tooltip.map(str::to_string),
        });
    }

    fn rect(&mut self, origin: Vec2, width: f64, height: f64, paint: &Paint) {
        self.push(DrawCommand::Rect {
            origin,
            width,
            height,
            paint: paint.clone(),
        });
    }

    fn polygon(&mut self, points: &[Vec2], paint: &Paint) {
        self.push(DrawCommand::Polygon {
            points: points.to_vec(),
            paint: paint.clone(),
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, paint: &Paint, arrowhead: bool) {
        self.push(DrawCommand::Line {
            from,
            to,
            paint: paint.clone(),
            arrowhead,
        });
    }

    fn sector(&mut self, arc: &Arc, paint: &Paint) {
        self.push(DrawCommand::Sector {
            arc: *arc,
            paint: paint.clone(),
        });
    }

    fn text(&mut self, position: Vec2, content: &str, style: &TextStyle) {
        self.push(DrawCommand::Text {
            position,
            content: content.to_string(),
            style: style.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DrawCommands {
        let mut cmds = DrawCommands::new();
        cmds.circle(Vec2::new(1.0, 2.0), 3.0, &Paint::fill("red"), Some("tip"));
        cmds.line(Vec2::ZERO, Vec2::new(4.0, 4.0), &Paint::stroke("blue", 2.0), true);
        cmds.text(Vec2::new(5.0, 5.0), "hello", &TextStyle::default());
        cmds
    }

    #[test]
    fn test_records_in_order() {
        let cmds = sample();
        assert_eq!(cmds.len(), 3);
        assert!(matches!(cmds.commands()[0], DrawCommand::Circle { .. }));
        assert!(matches!(cmds.commands()[1], DrawCommand::Line { arrowhead: true, .. }));
        assert_eq!(cmds.texts(), vec!["hello"]);
    }

    #[test]
    fn test_replay_reproduces_recording() {
        let original = sample();
        let mut copy = DrawCommands::new();
        original.replay(&mut copy);
        assert_eq!(original, copy);
    }

    #[test]
    fn test_paint_builders() {
        let paint = Paint::fill("#fff").with_stroke("#333", 2.0).with_opacity(0.5).dashed("6 6");
        assert_eq!(paint.fill.as_deref(), Some("#fff"));
        assert_eq!(paint.stroke.as_deref(), Some("#333"));
        assert_eq!(paint.stroke_width, Some(2.0));
        assert_eq!(paint.opacity, Some(0.5));
        assert_eq!(paint.dash.as_deref(), Some("6 6"));
    }
}
