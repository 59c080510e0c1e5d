// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Whole-document checks of the three diagrams

use neuroviz_math::{ParamUpdate, ProjectionParams};
use neuroviz_render::{
    render, render_scatter, DrawCommands, DrawingSurface, LayerDiagram, LayerVariant,
    ProjectionStyle, ProjectionVisualizer, ScatterStyle, SvgSurface,
};

#[test]
fn test_projection_svg_contents() {
    let frame = render(&ProjectionParams::default(), &ProjectionStyle::default());
    let svg = frame.to_svg();

    assert!(svg.contains("<circle cx=\"360\" cy=\"260\" r=\"200\" fill=\"none\" stroke=\"#333\""));
    assert!(svg.contains("<path d=\"M 360 260 L "));
    assert!(svg.contains("fill=\"#22c55e\" opacity=\"0.15\""));
    assert!(svg.contains("stroke=\"#22c55e\" stroke-width=\"3\""));
    assert!(svg.contains("stroke=\"#eab308\" stroke-width=\"2\" stroke-dasharray=\"6 6\""));
    assert!(svg.contains(">f₁+f₂</text>"));
    assert!(svg.contains("dx=\"8\" dy=\"-4\""));
    // one arrowhead marker per arrow colour
    assert_eq!(svg.matches("<marker ").count(), 4);
}

#[test]
fn test_zero_sum_arrow_collapses_to_origin() {
    let params = ProjectionParams {
        f1_on: false,
        f2_on: false,
        ..ProjectionParams::default()
    };
    let frame = render(&params, &ProjectionStyle::default());
    assert_eq!(frame.commands.texts(), vec!["w", "f₁+f₂"]);
    assert!(frame
        .to_svg()
        .contains("<line x1=\"360\" y1=\"260\" x2=\"360\" y2=\"260\""));
}

#[test]
fn test_visualizer_session_matches_fresh_render() {
    let mut viz = ProjectionVisualizer::new(ProjectionParams::default(), ProjectionStyle::default());
    for update in [
        ParamUpdate::WAngle(0.0),
        ParamUpdate::F1Angle(0.0),
        ParamUpdate::F2Angle(180.0),
        ParamUpdate::ShowSigned(true),
    ] {
        viz.apply(update);
    }

    let state = viz.frame().state;
    assert!((state.interference - 1.0).abs() < 1e-9);
    assert_eq!(viz.frame().to_svg(), render(viz.params(), viz.style()).to_svg());
}

#[test]
fn test_replay_onto_svg_matches_direct_draw() {
    let diagram = LayerDiagram::preset(LayerVariant::Primary);

    let mut direct = SvgSurface::new(500.0, 500.0);
    diagram.draw(&mut direct);

    let mut recorded = DrawCommands::new();
    diagram.draw(&mut recorded);
    let mut replayed = SvgSurface::new(500.0, 500.0);
    recorded.replay(&mut replayed);

    assert_eq!(direct.finish(), replayed.finish());
}

#[test]
fn test_layer_svg() {
    let svg = LayerDiagram::default().to_svg();
    assert_eq!(svg.matches("<rect ").count(), 3);
    assert_eq!(svg.matches("<circle ").count(), 2);
    assert!(svg.contains(
        "<rect x=\"75\" y=\"90\" width=\"50\" height=\"50\" fill=\"#69b3a2\" stroke=\"#333\" stroke-width=\"2\"/>"
    ));
    assert!(svg.contains("points=\"312.5,102.5 312.5,127.5 337.5,115\""));
}

#[test]
fn test_scatter_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let vit = dir.path().join("vit.json");
    let neuron = dir.path().join("neuron.json");
    std::fs::write(&vit, "[0.5, 1.5, -2.0, 3.25]").unwrap();
    std::fs::write(&neuron, "[0.2, 0.8, 0.4, 0.6]").unwrap();

    let dataset = neuroviz_data::ScoreDataset::load(&vit, &neuron, "thumbs").unwrap();
    let frame = render_scatter(&dataset, &ScatterStyle::default()).unwrap();
    let svg = frame.to_svg();

    assert_eq!(svg.matches("<title>").count(), 4);
    assert!(svg.contains("thumbs/scene_003.png\nImage: 3\nViT PC1: 3.25\nNeuron: 0.600"));
    assert_eq!(svg.matches("fill=\"#EA2B7F\"").count(), 3);
    assert_eq!(svg.matches("fill=\"#9AD1D4\"").count(), 1);
}
