use crate::config::{Config, RenderConfig};
use crate::diagram::{ConnectorRecord, Diagram};
use crate::layout::{ConnectorPath, RouteDiagnostics, plan_diagram};
use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Render a topology document to a complete SVG string: run the geometry
/// pass, then draw connectors, interface labels, and device nodes.
pub fn render_svg(diagram: &Diagram, config: &Config) -> String {
    let mut diagnostics = RouteDiagnostics::new();
    let paths = plan_diagram(diagram, &config.geometry, &mut diagnostics);
    render_svg_with_paths(diagram, &paths, config)
}

/// Render pre-planned connector paths. Useful when the caller keeps its
/// own `RouteDiagnostics` across passes.
pub fn render_svg_with_paths(
    diagram: &Diagram,
    paths: &[ConnectorPath],
    config: &Config,
) -> String {
    let theme = &config.theme;
    let (width, height) = document_bounds(diagram, &config.render);
    let connectors: HashMap<&str, &ConnectorRecord> = diagram
        .connectors
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for path in paths {
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            path.svg_path, theme.line_color, config.render.connector_stroke_width
        ));

        let Some(connector) = connectors.get(path.id.as_str()) else {
            continue;
        };
        if !connector.show_labels {
            continue;
        }
        for (anchor, text) in [
            (path.source_label_anchor, &connector.source_label),
            (path.target_label_anchor, &connector.target_label),
        ] {
            if text.is_empty() {
                continue;
            }
            svg.push_str(&interface_label_svg(anchor, text, config));
        }
    }

    for node in &diagram.nodes {
        if !node.is_measured() {
            continue;
        }
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{rx}\" ry=\"{rx}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            node.x,
            node.y,
            node.width,
            node.height,
            theme.node_fill,
            theme.node_border,
            rx = config.render.node_corner_radius,
        ));
        if !node.label.is_empty() {
            let (cx, cy) = node.center();
            let baseline = cy + theme.font_size * 0.35;
            svg.push_str(&format!(
                "<text x=\"{cx:.2}\" y=\"{baseline:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
                theme.font_family,
                theme.font_size,
                theme.node_text_color,
                escape_xml(&node.label)
            ));
        }
    }

    svg.push_str("</svg>");
    svg
}

fn interface_label_svg(anchor: (f32, f32), text: &str, config: &Config) -> String {
    let theme = &config.theme;
    // Approximate glyph width; good enough for a backing rect without a
    // font database.
    let text_width = text.chars().count() as f32 * theme.font_size * 0.6;
    let rect_h = theme.font_size + 6.0;
    let rect_x = anchor.0 - text_width / 2.0 - 4.0;
    let rect_y = anchor.1 - rect_h / 2.0;
    let baseline = anchor.1 + theme.font_size * 0.35;
    let mut out = String::new();
    out.push_str(&format!(
        "<rect x=\"{rect_x:.2}\" y=\"{rect_y:.2}\" width=\"{:.2}\" height=\"{rect_h:.2}\" rx=\"3\" ry=\"3\" fill=\"{}\"/>",
        text_width + 8.0,
        theme.label_background
    ));
    out.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{baseline:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        anchor.0,
        theme.font_family,
        theme.font_size,
        theme.label_color,
        escape_xml(text)
    ));
    out
}

fn document_bounds(diagram: &Diagram, render: &RenderConfig) -> (f32, f32) {
    let mut max_x = 0.0f32;
    let mut max_y = 0.0f32;
    for node in &diagram.nodes {
        max_x = max_x.max(node.x + node.width);
        max_y = max_y.max(node.y + node.height);
    }
    (
        (max_x + render.padding).max(200.0),
        (max_y + render.padding).max(200.0),
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Verdana".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
