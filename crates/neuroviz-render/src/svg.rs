// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! SVG serialisation of drawing primitives
//!
//! Numbers are written with at most three decimals and no trailing zeros so
//! identical frames serialise to identical bytes.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use neuroviz_math::Vec2;

use crate::draw::{Arc, DrawCommands, DrawingSurface, Paint, TextAnchor, TextStyle};

const DEFAULT_STROKE: &str = "black";

/// Surface that accumulates an SVG document
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    background: Option<String>,
    body: String,
    /// Arrowhead markers keyed by id, one per stroke colour
    markers: BTreeMap<String, String>,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: None,
            body: String::new(),
            markers: BTreeMap::new(),
        }
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Close the document and return it
    pub fn finish(self) -> String {
        let w = num(self.width);
        let h = num(self.height);
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
        );

        if !self.markers.is_empty() {
            out.push_str("<defs>\n");
            for (id, color) in &self.markers {
                let _ = writeln!(
                    out,
                    "<marker id=\"{}\" markerWidth=\"10\" markerHeight=\"7\" refX=\"10\" refY=\"3.5\" orient=\"auto\"><polygon points=\"0 0, 10 3.5, 0 7\" fill=\"{}\"/></marker>",
                    id,
                    escape(color)
                );
            }
            out.push_str("</defs>\n");
        }

        if let Some(bg) = &self.background {
            let _ = writeln!(out, "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>", escape(bg));
        }

        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    fn marker_for(&mut self, color: &str) -> String {
        let suffix: String = color.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        let id = format!("arrowhead-{}", suffix);
        self.markers.entry(id.clone()).or_insert_with(|| color.to_string());
        id
    }
}

/// Serialise recorded commands into a standalone SVG document
pub fn to_svg(commands: &DrawCommands, width: f64, height: f64, background: Option<&str>) -> String {
    let mut surface = SvgSurface::new(width, height);
    if let Some(bg) = background {
        surface = surface.with_background(bg);
    }
    commands.replay(&mut surface);
    surface.finish()
}

/// Compact, deterministic number formatting
pub(crate) fn num(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// ` fill=".." stroke=".." ...` for closed shapes; missing fill means none
fn shape_attrs(paint: &Paint) -> String {
    let mut attrs = format!(" fill=\"{}\"", escape(paint.fill.as_deref().unwrap_or("none")));
    stroke_attrs(&mut attrs, paint);
    attrs
}

fn stroke_attrs(attrs: &mut String, paint: &Paint) {
    if let Some(stroke) = &paint.stroke {
        let _ = write!(attrs, " stroke=\"{}\"", escape(stroke));
    }
    if let Some(width) = paint.stroke_width {
        let _ = write!(attrs, " stroke-width=\"{}\"", num(width));
    }
    if let Some(dash) = &paint.dash {
        let _ = write!(attrs, " stroke-dasharray=\"{}\"", escape(dash));
    }
    if let Some(opacity) = paint.opacity {
        let _ = write!(attrs, " opacity=\"{}\"", num(opacity));
    }
}

impl DrawingSurface for SvgSurface {
    fn circle(&mut self, center: Vec2, radius: f64, paint: &Paint, tooltip: Option<&str>) {
        let _ = write!(
            self.body,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}",
            num(center.x),
            num(center.y),
            num(radius),
            shape_attrs(paint)
        );
        match tooltip {
            Some(tip) => {
                let _ = writeln!(self.body, "><title>{}</title></circle>", escape(tip));
            }
            None => self.body.push_str("/>\n"),
        }
    }

    fn rect(&mut self, origin: Vec2, width: f64, height: f64, paint: &Paint) {
        let _ = writeln!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{}/>",
            num(origin.x),
            num(origin.y),
            num(width),
            num(height),
            shape_attrs(paint)
        );
    }

    fn polygon(&mut self, points: &[Vec2], paint: &Paint) {
        let points: Vec<String> = points
            .iter()
            .map(|p| format!("{},{}", num(p.x), num(p.y)))
            .collect();
        let _ = writeln!(
            self.body,
            "<polygon points=\"{}\"{}/>",
            points.join(" "),
            shape_attrs(paint)
        );
    }

    fn line(&mut self, from: Vec2, to: Vec2, paint: &Paint, arrowhead: bool) {
        let mut attrs = String::new();
        let mut paint = paint.clone();
        let stroke = paint.stroke.get_or_insert_with(|| DEFAULT_STROKE.to_string()).clone();
        stroke_attrs(&mut attrs, &paint);
        if arrowhead {
            let id = self.marker_for(&stroke);
            let _ = write!(attrs, " marker-end=\"url(#{})\"", id);
        }
        let _ = writeln!(
            self.body,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"{}/>",
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            attrs
        );
    }

    fn sector(&mut self, arc: &Arc, paint: &Paint) {
        let r = num(arc.radius);
        let _ = writeln!(
            self.body,
            "<path d=\"M {} {} L {} {} A {} {} 0 {} {} {} {} Z\"{}/>",
            num(arc.center.x),
            num(arc.center.y),
            num(arc.start.x),
            num(arc.start.y),
            r,
            r,
            u8::from(arc.large_arc),
            u8::from(arc.clockwise),
            num(arc.end.x),
            num(arc.end.y),
            shape_attrs(paint)
        );
    }

    fn text(&mut self, position: Vec2, content: &str, style: &TextStyle) {
        let mut attrs = format!(" x=\"{}\" y=\"{}\"", num(position.x), num(position.y));
        if style.dx != 0.0 {
            let _ = write!(attrs, " dx=\"{}\"", num(style.dx));
        }
        if style.dy != 0.0 {
            let _ = write!(attrs, " dy=\"{}\"", num(style.dy));
        }
        if let Some(angle) = style.rotate {
            let _ = write!(attrs, " transform=\"rotate({})\"", num(angle));
        }
        if style.anchor != TextAnchor::Start {
            let _ = write!(attrs, " text-anchor=\"{}\"", style.anchor.as_str());
        }
        if let Some(size) = &style.font_size {
            let _ = write!(attrs, " font-size=\"{}\"", escape(size));
        }
        if let Some(fill) = &style.fill {
            let _ = write!(attrs, " fill=\"{}\"", escape(fill));
        }
        let _ = writeln!(self.body, "<text{}>{}</text>", attrs, escape(content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_formatting() {
        assert_eq!(num(360.0), "360");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(1.23456), "1.235");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(-12.5), "-12.5");
        assert_eq!(num(100.0), "100");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
        assert_eq!(escape("f₁+f₂"), "f₁+f₂");
    }

    #[test]
    fn test_document_shell() {
        let svg = SvgSurface::new(720.0, 520.0).finish();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"720\" height=\"520\""));
        assert!(svg.ends_with("</svg>\n"));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn test_arrow_markers_per_colour() {
        let mut surface = SvgSurface::new(100.0, 100.0);
        let green = Paint::stroke("#22c55e", 3.0);
        surface.line(Vec2::ZERO, Vec2::new(10.0, 0.0), &green, true);
        surface.line(Vec2::ZERO, Vec2::new(0.0, 10.0), &green, true);
        surface.line(Vec2::ZERO, Vec2::new(5.0, 5.0), &Paint::stroke("#eab308", 2.0).dashed("6 6"), true);
        let svg = surface.finish();

        assert_eq!(svg.matches("<marker ").count(), 2);
        assert!(svg.contains("marker-end=\"url(#arrowhead-22c55e)\""));
        assert!(svg.contains("stroke-dasharray=\"6 6\""));
        assert!(svg.contains("refX=\"10\" refY=\"3.5\""));
    }

    #[test]
    fn test_shapes() {
        let mut surface = SvgSurface::new(10.0, 10.0);
        surface.circle(Vec2::new(5.0, 5.0), 2.0, &Paint::stroke("#333", 1.0), Some("a & b"));
        surface.polygon(
            &[Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
            &Paint::fill("#69b3a2"),
        );
        let svg = surface.finish();
        assert!(svg.contains("<circle cx=\"5\" cy=\"5\" r=\"2\" fill=\"none\" stroke=\"#333\" stroke-width=\"1\"><title>a &amp; b</title></circle>"));
        assert!(svg.contains("<polygon points=\"0,0 1,0 0,1\" fill=\"#69b3a2\"/>"));
    }

    #[test]
    fn test_rotated_text() {
        let mut surface = SvgSurface::new(10.0, 10.0);
        let style = TextStyle {
            anchor: TextAnchor::Middle,
            font_size: Some("14px".to_string()),
            rotate: Some(-90.0),
            ..TextStyle::default()
        };
        surface.text(Vec2::new(-175.0, 20.0), "Neuron Response", &style);
        let svg = surface.finish();
        assert!(svg.contains(
            "<text x=\"-175\" y=\"20\" transform=\"rotate(-90)\" text-anchor=\"middle\" font-size=\"14px\">Neuron Response</text>"
        ));
    }
}
