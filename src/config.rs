use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the connector geometry engine. All lengths are in the same
/// units as node coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Spacing budget between parallel connectors; shrinks as more
    /// connectors pack into the same pair.
    pub max_parallel_spacing: f32,
    /// Floor the spacing never shrinks below.
    pub min_parallel_spacing: f32,
    /// Corner radius for smooth-step routes.
    pub corner_radius: f32,
    /// Minimum directional clearance for a 90-degree route to be feasible.
    pub min_angle_clearance: f32,
    /// Distance from an endpoint to its interface-label anchor.
    pub label_distance: f32,
    /// Tolerance for boundary-side classification.
    pub boundary_epsilon: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            max_parallel_spacing: 8.0,
            min_parallel_spacing: 2.0,
            corner_radius: 16.0,
            min_angle_clearance: 20.0,
            label_distance: 40.0,
            boundary_epsilon: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    /// Margin added around the diagram bounds.
    pub padding: f32,
    pub node_corner_radius: f32,
    pub connector_stroke_width: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            padding: 24.0,
            node_corner_radius: 10.0,
            connector_stroke_width: 1.4,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub geometry: GeometryConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    node_fill: Option<String>,
    node_border: Option<String>,
    node_text_color: Option<String>,
    line_color: Option<String>,
    label_color: Option<String>,
    label_background: Option<String>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeometryFile {
    max_parallel_spacing: Option<f32>,
    min_parallel_spacing: Option<f32>,
    corner_radius: Option<f32>,
    min_angle_clearance: Option<f32>,
    label_distance: Option<f32>,
    boundary_epsilon: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    node_corner_radius: Option<f32>,
    connector_stroke_width: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    geometry: Option<GeometryFile>,
    render: Option<RenderFile>,
}

/// Load a config overlay from an optional JSON file onto the defaults.
/// Absent fields keep their default values.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "classic" || theme_name == "default" {
            config.theme = Theme::classic();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.node_fill {
            config.theme.node_fill = v;
        }
        if let Some(v) = vars.node_border {
            config.theme.node_border = v;
        }
        if let Some(v) = vars.node_text_color {
            config.theme.node_text_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
        if let Some(v) = vars.label_background {
            config.theme.label_background = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
    }

    if let Some(geometry) = parsed.geometry {
        if let Some(v) = geometry.max_parallel_spacing {
            config.geometry.max_parallel_spacing = v;
        }
        if let Some(v) = geometry.min_parallel_spacing {
            config.geometry.min_parallel_spacing = v;
        }
        if let Some(v) = geometry.corner_radius {
            config.geometry.corner_radius = v;
        }
        if let Some(v) = geometry.min_angle_clearance {
            config.geometry.min_angle_clearance = v;
        }
        if let Some(v) = geometry.label_distance {
            config.geometry.label_distance = v;
        }
        if let Some(v) = geometry.boundary_epsilon {
            config.geometry.boundary_epsilon = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
        if let Some(v) = render.node_corner_radius {
            config.render.node_corner_radius = v;
        }
        if let Some(v) = render.connector_stroke_width {
            config.render.connector_stroke_width = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_documented_constants() {
        let geometry = GeometryConfig::default();
        assert_eq!(geometry.max_parallel_spacing, 8.0);
        assert_eq!(geometry.min_parallel_spacing, 2.0);
        assert_eq!(geometry.corner_radius, 16.0);
        assert_eq!(geometry.min_angle_clearance, 20.0);
        assert_eq!(geometry.label_distance, 40.0);
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.theme.background, Theme::classic().background);
        assert_eq!(config.render.width, 1200.0);
    }
}
