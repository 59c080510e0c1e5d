// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Projection visualizer view
//!
//! Draws the weight vector `w` as an axis inside a circle of radius `R`, a
//! translucent cone around it, the feature arrows `f1`/`f2`, and the dashed
//! direction of their sum. Every frame also carries the numeric summary of
//! the projections.
//!
//! Frames are a pure function of the parameters and style: rendering the same
//! input twice gives identical commands and identical SVG bytes.

use neuroviz_config::NeurovizConfig;
use neuroviz_math::{ParamUpdate, ProjectionParams, ProjectionState, Vec2, Viewport};
use tracing::debug;

use crate::draw::{Arc, DrawCommands, DrawingSurface, Paint, TextStyle};
use crate::svg::to_svg;

const LABEL_DX: f64 = 8.0;
const LABEL_DY: f64 = -4.0;
const WEIGHT_WIDTH: f64 = 3.0;
const FEATURE_WIDTH: f64 = 2.0;
const BOUNDARY_WIDTH: f64 = 1.0;
const SUM_DASH: &str = "6 6";

/// Canvas geometry and colours of the view
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionStyle {
    pub width: f64,
    pub height: f64,
    /// Length of a unit vector on the canvas
    pub radius: f64,
    pub background: Option<String>,
    pub weight_color: String,
    pub feature_one_color: String,
    pub feature_two_color: String,
    pub sum_color: String,
    pub boundary_color: String,
    pub cone_opacity: f64,
}

impl Default for ProjectionStyle {
    fn default() -> Self {
        Self::from_config(&NeurovizConfig::default())
    }
}

impl ProjectionStyle {
    pub fn from_config(config: &NeurovizConfig) -> Self {
        let palette = &config.palette;
        Self {
            width: config.canvas.width,
            height: config.canvas.height,
            radius: config.canvas.radius,
            background: config.canvas.background.clone(),
            weight_color: palette.weight.clone(),
            feature_one_color: palette.feature_one.clone(),
            feature_two_color: palette.feature_two.clone(),
            sum_color: palette.sum.clone(),
            boundary_color: palette.boundary.clone(),
            cone_opacity: palette.cone_opacity,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::centered(self.width, self.height, self.radius)
    }
}

/// One rendered state of the visualizer
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionFrame {
    pub params: ProjectionParams,
    pub state: ProjectionState,
    pub commands: DrawCommands,
    /// Human-readable projection summary, one entry per line
    pub summary: Vec<String>,
    width: f64,
    height: f64,
    background: Option<String>,
}

impl ProjectionFrame {
    pub fn to_svg(&self) -> String {
        to_svg(&self.commands, self.width, self.height, self.background.as_deref())
    }
}

/// Three decimals, never printing a negative zero
fn fixed3(v: f64) -> String {
    let s = format!("{:.3}", v);
    if s == "-0.000" {
        "0.000".to_string()
    } else {
        s
    }
}

/// Summary lines for a derived state
pub fn summary_lines(state: &ProjectionState) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Linear projections: w·f₁={}, w·f₂={}, w·(f₁+f₂)={}",
            fixed3(state.a1),
            fixed3(state.a2),
            fixed3(state.a_sum)
        ),
        format!(
            "ReLU outputs: {}, {}, joint={} → interference = {}",
            fixed3(state.y1),
            fixed3(state.y2),
            fixed3(state.y_sum),
            fixed3(state.interference)
        ),
    ];
    if state.show_signed {
        lines.push(format!(
            "Signed readout (ReLU(w·x)−ReLU(−w·x)) = {}",
            fixed3(state.signed)
        ));
    }
    lines
}

fn arrow<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    from: Vec2,
    tip: Vec2,
    paint: &Paint,
    label: &str,
    color: &str,
) {
    surface.line(from, tip, paint, true);
    surface.text(
        tip,
        label,
        &TextStyle {
            fill: Some(color.to_string()),
            dx: LABEL_DX,
            dy: LABEL_DY,
            ..TextStyle::default()
        },
    );
}

/// Draw the diagram for `state` onto any surface
///
/// The cone spans `w_angle ± cone_half_deg` and turns the same way as the
/// arrows, counterclockwise on screen for increasing angles. A half-width of
/// 180° or more fills the whole circle.
pub fn draw_projection<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    params: &ProjectionParams,
    state: &ProjectionState,
    style: &ProjectionStyle,
) {
    let viewport = style.viewport();
    let origin = viewport.center;

    surface.circle(
        origin,
        viewport.radius,
        &Paint::stroke(&style.boundary_color, BOUNDARY_WIDTH),
        None,
    );

    let half = params.cone_half_deg;
    let cone_paint = Paint::fill(&style.weight_color).with_opacity(style.cone_opacity);
    if half * 2.0 >= 360.0 {
        // an arc with coincident endpoints is dropped by SVG renderers
        surface.circle(origin, viewport.radius, &cone_paint, None);
    } else {
        surface.sector(
            &Arc {
                center: origin,
                radius: viewport.radius,
                start: viewport.rim_point(params.w_angle - half),
                end: viewport.rim_point(params.w_angle + half),
                large_arc: half * 2.0 > 180.0,
                clockwise: false,
            },
            &cone_paint,
        );
    }

    arrow(
        surface,
        origin,
        viewport.to_surface(state.w),
        &Paint::stroke(&style.weight_color, WEIGHT_WIDTH),
        "w",
        &style.weight_color,
    );

    if params.f1_on {
        arrow(
            surface,
            origin,
            viewport.to_surface(state.f1.unit()),
            &Paint::stroke(&style.feature_one_color, FEATURE_WIDTH),
            "f₁",
            &style.feature_one_color,
        );
    }

    if params.f2_on {
        arrow(
            surface,
            origin,
            viewport.to_surface(state.f2.unit()),
            &Paint::stroke(&style.feature_two_color, FEATURE_WIDTH),
            "f₂",
            &style.feature_two_color,
        );
    }

    // Always drawn; collapses onto the origin when both features are off
    arrow(
        surface,
        origin,
        viewport.to_surface(state.x_sum.unit()),
        &Paint::stroke(&style.sum_color, FEATURE_WIDTH).dashed(SUM_DASH),
        "f₁+f₂",
        &style.sum_color,
    );
}

/// Derive and draw one frame
pub fn render(params: &ProjectionParams, style: &ProjectionStyle) -> ProjectionFrame {
    let state = params.derive();
    let mut commands = DrawCommands::new();
    draw_projection(&mut commands, params, &state, style);
    debug!(
        "Rendered projection frame: {} commands, interference={:.3}",
        commands.len(),
        state.interference
    );

    ProjectionFrame {
        params: *params,
        summary: summary_lines(&state),
        state,
        commands,
        width: style.width,
        height: style.height,
        background: style.background.clone(),
    }
}

/// Host-side owner of the parameter snapshot
///
/// Every applied update recomputes the whole frame; nothing is cached.
#[derive(Debug, Clone)]
pub struct ProjectionVisualizer {
    params: ProjectionParams,
    style: ProjectionStyle,
    frame: ProjectionFrame,
}

impl ProjectionVisualizer {
    pub fn new(params: ProjectionParams, style: ProjectionStyle) -> Self {
        let frame = render(&params, &style);
        Self { params, style, frame }
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    pub fn style(&self) -> &ProjectionStyle {
        &self.style
    }

    pub fn frame(&self) -> &ProjectionFrame {
        &self.frame
    }

    /// Apply one control change and re-render
    ///
    /// Returns `true` if the parameter value actually changed.
    pub fn apply(&mut self, update: ParamUpdate) -> bool {
        let changed = self.params.apply(update);
        debug!("Parameter update {:?} (changed: {})", update, changed);
        self.frame = render(&self.params, &self.style);
        changed
    }

    /// Apply a batch of updates, re-rendering after each
    pub fn apply_all<I: IntoIterator<Item = ParamUpdate>>(&mut self, updates: I) -> usize {
        updates.into_iter().filter(|u| self.apply(*u)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawCommand;

    fn params(w: f64, f1: f64, f2: f64) -> ProjectionParams {
        ProjectionParams {
            w_angle: w,
            f1_angle: f1,
            f2_angle: f2,
            ..ProjectionParams::default()
        }
    }

    #[test]
    fn test_draw_order_with_both_features() {
        let frame = render(&ProjectionParams::default(), &ProjectionStyle::default());
        let cmds = frame.commands.commands();
        assert_eq!(cmds.len(), 10);
        assert!(matches!(cmds[0], DrawCommand::Circle { radius, .. } if radius == 200.0));
        assert!(matches!(cmds[1], DrawCommand::Sector { .. }));
        assert!(matches!(cmds[2], DrawCommand::Line { .. }));
        assert_eq!(frame.commands.texts(), vec!["w", "f₁", "f₂", "f₁+f₂"]);
    }

    #[test]
    fn test_toggled_off_feature_is_not_drawn() {
        let mut p = ProjectionParams::default();
        p.f2_on = false;
        let frame = render(&p, &ProjectionStyle::default());
        assert_eq!(frame.commands.texts(), vec!["w", "f₁", "f₁+f₂"]);
    }

    #[test]
    fn test_weight_tip_and_label_offset() {
        let frame = render(&params(0.0, 0.0, 180.0), &ProjectionStyle::default());
        let cmds = frame.commands.commands();
        match &cmds[2] {
            DrawCommand::Line { from, to, paint, arrowhead } => {
                assert_eq!(*from, Vec2::new(360.0, 260.0));
                assert!((to.x - 560.0).abs() < 1e-9);
                assert!((to.y - 260.0).abs() < 1e-9);
                assert_eq!(paint.stroke_width, Some(3.0));
                assert!(*arrowhead);
            }
            other => panic!("expected weight arrow, got {:?}", other),
        }
        match &cmds[3] {
            DrawCommand::Text { style, content, .. } => {
                assert_eq!(content, "w");
                assert_eq!((style.dx, style.dy), (8.0, -4.0));
            }
            other => panic!("expected label, got {:?}", other),
        }
    }

    #[test]
    fn test_cone_geometry() {
        let mut p = ProjectionParams::default();
        p.w_angle = 90.0;
        p.cone_half_deg = 100.0;
        let frame = render(&p, &ProjectionStyle::default());
        match &frame.commands.commands()[1] {
            DrawCommand::Sector { arc, paint } => {
                assert!(arc.large_arc);
                assert!(!arc.clockwise);
                // start at -10 deg sits just below the horizontal on screen
                assert!(arc.start.x > 360.0 && arc.start.y > 260.0);
                assert_eq!(paint.opacity, Some(0.15));
            }
            other => panic!("expected sector, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_lines() {
        let frame = render(&params(0.0, 0.0, 180.0), &ProjectionStyle::default());
        assert_eq!(
            frame.summary,
            vec![
                "Linear projections: w·f₁=1.000, w·f₂=-1.000, w·(f₁+f₂)=0.000".to_string(),
                "ReLU outputs: 1.000, 0.000, joint=0.000 → interference = 1.000".to_string(),
            ]
        );

        let mut p = params(0.0, 0.0, 0.0);
        p.show_signed = true;
        let frame = render(&p, &ProjectionStyle::default());
        assert_eq!(frame.summary.len(), 3);
        assert_eq!(frame.summary[2], "Signed readout (ReLU(w·x)−ReLU(−w·x)) = 2.000");
    }

    #[test]
    fn test_render_is_deterministic() {
        let style = ProjectionStyle::default();
        let p = params(33.3, -12.0, 147.5);
        let a = render(&p, &style);
        let b = render(&p, &style);
        assert_eq!(a, b);
        assert_eq!(a.to_svg(), b.to_svg());
    }

    #[test]
    fn test_visualizer_rerenders_on_update() {
        let mut viz = ProjectionVisualizer::new(ProjectionParams::default(), ProjectionStyle::default());
        assert_eq!(viz.frame().commands.texts().len(), 4);

        assert!(viz.apply(ParamUpdate::F1On(false)));
        assert_eq!(viz.frame().commands.texts().len(), 3);
        assert_eq!(viz.frame().state.a1, 0.0);

        assert!(!viz.apply(ParamUpdate::F1On(false)));
        let changed = viz.apply_all([ParamUpdate::ShowSigned(true), ParamUpdate::WAngle(25.0)]);
        assert_eq!(changed, 1);
        assert_eq!(viz.frame().summary.len(), 3);
        assert_eq!(*viz.frame(), render(viz.params(), viz.style()));
    }

    #[test]
    fn test_full_cone_fills_the_circle() {
        let mut p = ProjectionParams::default();
        p.cone_half_deg = 180.0;
        let frame = render(&p, &ProjectionStyle::default());
        match &frame.commands.commands()[1] {
            DrawCommand::Circle { center, radius, paint, .. } => {
                assert_eq!(*center, Vec2::new(360.0, 260.0));
                assert_eq!(*radius, 200.0);
                assert_eq!(paint.opacity, Some(0.15));
                assert!(paint.fill.is_some());
            }
            other => panic!("expected filled circle, got {:?}", other),
        }
        assert!(frame.to_svg().contains("opacity=\"0.15\""));

        p.cone_half_deg = 179.5;
        let frame = render(&p, &ProjectionStyle::default());
        match &frame.commands.commands()[1] {
            DrawCommand::Sector { arc, .. } => {
                assert!(arc.large_arc);
                assert!((arc.start - arc.end).norm() > 1.0);
            }
            other => panic!("expected sector, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_never_prints_negative_zero() {
        // cos(270°) leaves a tiny negative residue
        let frame = render(&params(0.0, 0.0, 270.0), &ProjectionStyle::default());
        assert!(frame.state.a2 < 0.0);
        assert_eq!(
            frame.summary[0],
            "Linear projections: w·f₁=1.000, w·f₂=0.000, w·(f₁+f₂)=1.000"
        );
        assert!(frame.summary.iter().all(|line| !line.contains("-0.000")));
        assert_eq!(fixed3(-0.0004), "0.000");
        assert_eq!(fixed3(-0.25), "-0.250");
    }
}
