use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub node_fill: String,
    pub node_border: String,
    pub node_text_color: String,
    pub line_color: String,
    pub label_color: String,
    pub label_background: String,
    pub background: String,
}

impl Theme {
    /// Default look: soft blue device boxes on white, close to the classic
    /// network-diagram palette.
    pub fn classic() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 14.0,
            node_fill: "#ECECFF".to_string(),
            node_border: "#9370DB".to_string(),
            node_text_color: "#333333".to_string(),
            line_color: "#333333".to_string(),
            label_color: "#333333".to_string(),
            label_background: "#E8E8E8".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            node_fill: "#F8FAFF".to_string(),
            node_border: "#C7D2E5".to_string(),
            node_text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            label_color: "#1C2430".to_string(),
            label_background: "#FFFFFF".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::classic()
    }
}
