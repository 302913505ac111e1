mod draft;

pub use draft::{DraftField, DraftForm, NewProperty};

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Image shown for listings that have none of their own
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x250";

/// Server-assigned identifier. The listing service may hand out numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum PropertyId {
    Number(i64),
    Text(String),
}

impl PropertyId {
    /// Compare against an id typed in by the user
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            PropertyId::Number(n) => raw.trim().parse::<i64>().map_or(false, |r| r == *n),
            PropertyId::Text(s) => s == raw.trim(),
        }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyId::Number(n) => write!(f, "{n}"),
            PropertyId::Text(s) => f.write_str(s),
        }
    }
}

/// A listing as stored by the remote service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    /// Free-text category label
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "nan", deserialize_with = "number_or_nan")]
    pub price: f64,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl Property {
    pub fn image_or_placeholder(&self) -> &str {
        match self.image.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => PLACEHOLDER_IMAGE,
        }
    }

    /// Both halves of the pair must be present; a lone lat or lng counts as no location.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    pub fn map_embed_url(&self) -> Option<String> {
        self.coordinates().map(|(lat, lng)| {
            format!("https://www.google.com/maps?q={lat},{lng}&hl=es;z=14&output=embed")
        })
    }
}

fn nan() -> f64 {
    f64::NAN
}

// A price created from unparsable input round-trips through the server as `null`.
fn number_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing(lat: Option<f64>, lng: Option<f64>) -> Property {
        Property {
            id: PropertyId::Number(1),
            name: "Lake House".to_string(),
            kind: "Villa".to_string(),
            price: 4_500_000.0,
            location: "Goa".to_string(),
            description: String::new(),
            image: None,
            lat,
            lng,
        }
    }

    #[test]
    fn test_deserializes_server_record() {
        let property: Property = serde_json::from_value(json!({
            "id": "a1",
            "name": "City Flat",
            "type": "Apartment",
            "price": 3200000,
            "location": "Pune",
            "description": "Two bedrooms",
            "image": "https://img.example/flat.jpg",
            "lat": 18.52,
            "lng": 73.85
        }))
        .unwrap();

        assert_eq!(property.id, PropertyId::Text("a1".to_string()));
        assert_eq!(property.kind, "Apartment");
        assert_eq!(property.price, 3_200_000.0);
        assert_eq!(property.coordinates(), Some((18.52, 73.85)));
    }

    #[test]
    fn test_null_price_and_missing_optionals() {
        let property: Property = serde_json::from_value(json!({
            "id": 7,
            "name": "Shack",
            "type": "Hut",
            "price": null,
            "location": "Nowhere"
        }))
        .unwrap();

        assert!(property.price.is_nan());
        assert_eq!(property.description, "");
        assert_eq!(property.image, None);
        assert_eq!(property.coordinates(), None);
    }

    #[test]
    fn test_record_without_price_does_not_break_list() {
        let properties: Vec<Property> = serde_json::from_value(json!([
            {"id": 1, "name": "A", "type": "Villa", "price": 10, "location": "Goa"},
            {"id": 2, "name": "B", "type": "Plot", "location": "Pune"}
        ]))
        .unwrap();

        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].price, 10.0);
        assert!(properties[1].price.is_nan());
        assert_eq!(properties[1].name, "B");
    }

    #[test]
    fn test_partial_coordinates_disable_map() {
        assert_eq!(listing(Some(15.5), None).map_embed_url(), None);
        assert_eq!(listing(None, Some(73.8)).map_embed_url(), None);
        assert_eq!(
            listing(Some(15.5), Some(73.8)).map_embed_url().as_deref(),
            Some("https://www.google.com/maps?q=15.5,73.8&hl=es;z=14&output=embed")
        );
    }

    #[test]
    fn test_empty_image_falls_back_to_placeholder() {
        let mut property = listing(None, None);
        assert_eq!(property.image_or_placeholder(), PLACEHOLDER_IMAGE);

        property.image = Some(String::new());
        assert_eq!(property.image_or_placeholder(), PLACEHOLDER_IMAGE);

        property.image = Some("https://img.example/lake.jpg".to_string());
        assert_eq!(property.image_or_placeholder(), "https://img.example/lake.jpg");
    }

    #[test]
    fn test_id_matches_user_input() {
        assert!(PropertyId::Number(12).matches("12"));
        assert!(PropertyId::Number(12).matches(" 12 "));
        assert!(!PropertyId::Number(12).matches("012x"));
        assert!(PropertyId::Text("ab-3".to_string()).matches("ab-3"));
        assert_eq!(PropertyId::Text("ab-3".to_string()).to_string(), "ab-3");
    }
}
