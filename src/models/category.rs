use chrono::{DateTime, Utc};
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::ListItem,
};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_COLOR: &str = "#428cff";

/// Colors offered by the category form.
pub const AVAILABLE_COLORS: [&str; 12] = [
    "#428cff", "#50c8ff", "#6a64ff", "#7c7aff", "#ff4961", "#ff6b9d", "#c8e6c9", "#ffd54f",
    "#ffb74d", "#a1887f", "#90a4ae", "#78909c",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub color: String,
}

/// Reads a nullable string, treating `null` like a missing value.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request body for creating or updating a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpsertDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub color: String,
}

/// Paged lookup of categories, sent to `GET /api/categories`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCriteria {
    pub page: u32,
    pub size: u32,
    pub sort: String,
    pub name: Option<String>,
}

impl Default for CategoryCriteria {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: "name,asc".to_string(),
            name: None,
        }
    }
}

impl CategoryCriteria {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort.clone()),
        ];
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            params.push(("name", name.to_string()));
        }
        params
    }
}

/// Unpaged lookup of categories, sent to `GET /api/categories/all`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllCategoriesCriteria {
    pub name: Option<String>,
    pub sort: Option<String>,
}

impl AllCategoriesCriteria {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            params.push(("name", name.to_string()));
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            params.push(("sort", sort.to_string()));
        }
        params
    }
}

impl Category {
    /// Terminal color for the category's hex color, white when it does not parse.
    /// The category's color, or the default color when it has none.
    pub fn display_color(&self) -> Color {
        parse_hex_color(&self.color)
            .or_else(|| parse_hex_color(DEFAULT_COLOR))
            .unwrap_or(Color::White)
    }

    pub fn to_list_item(&self) -> ListItem {
        ListItem::new(Line::from(vec![
            Span::styled("■ ", Style::default().fg(self.display_color())),
            Span::raw(self.name.clone()),
        ]))
    }
}

pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
