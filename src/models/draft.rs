use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Fields of the "Add Property" form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Type,
    Price,
    Location,
    Description,
    Image,
    Lat,
    Lng,
}

impl DraftField {
    pub const ALL: [DraftField; 8] = [
        DraftField::Name,
        DraftField::Type,
        DraftField::Price,
        DraftField::Location,
        DraftField::Description,
        DraftField::Image,
        DraftField::Lat,
        DraftField::Lng,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Type => "type",
            DraftField::Price => "price",
            DraftField::Location => "location",
            DraftField::Description => "description",
            DraftField::Image => "image",
            DraftField::Lat => "lat",
            DraftField::Lng => "lng",
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, DraftField::Lat | DraftField::Lng)
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown form field: {s}"))
    }
}

/// Unsaved form state. Every field stays raw text until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    pub name: String,
    pub kind: String,
    pub price: String,
    pub location: String,
    pub description: String,
    pub image: String,
    pub lat: String,
    pub lng: String,
}

impl DraftForm {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Type => &self.kind,
            DraftField::Price => &self.price,
            DraftField::Location => &self.location,
            DraftField::Description => &self.description,
            DraftField::Image => &self.image,
            DraftField::Lat => &self.lat,
            DraftField::Lng => &self.lng,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::Name => &mut self.name,
            DraftField::Type => &mut self.kind,
            DraftField::Price => &mut self.price,
            DraftField::Location => &mut self.location,
            DraftField::Description => &mut self.description,
            DraftField::Image => &mut self.image,
            DraftField::Lat => &mut self.lat,
            DraftField::Lng => &mut self.lng,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        *self == DraftForm::default()
    }

    /// Build the creation payload. No validation happens here: a price that
    /// does not parse becomes NaN, and blank coordinates are left out.
    pub fn to_payload(&self) -> NewProperty {
        NewProperty {
            name: self.name.clone(),
            kind: self.kind.clone(),
            price: coerce_number(&self.price),
            location: self.location.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            lat: optional_number(&self.lat),
            lng: optional_number(&self.lng),
        }
    }
}

/// Body of `POST <endpoint>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
    pub location: String,
    pub description: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

fn optional_number(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        None
    } else {
        Some(coerce_number(raw))
    }
}

/// Numeric coercion with browser form semantics: whitespace is ignored,
/// blank means zero and anything unparsable is NaN.
fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if let Some(value) = radix_literal(trimmed) {
        return value;
    }
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust also accepts "inf" and "nan" spellings, a form field does not
        _ if trimmed.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E') => f64::NAN,
        _ => trimmed.parse().unwrap_or(f64::NAN),
    }
}

/// Unsigned `0x`/`0o`/`0b` literals; `None` when there is no such prefix
fn radix_literal(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }
    let value = digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
    Some(value)
}
