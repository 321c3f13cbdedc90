use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

pub mod history;
pub mod interest;

pub use history::{ViewedHistory, MAX_VIEWED_HISTORY};
pub use interest::{InterestOption, InterestSelection, InterestTag};

/// Identifier of a trip in the backend catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(pub u64);

impl Display for TripId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trip as published by the backend catalog
///
/// Owned by the backend; the engine reads it but never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub id: TripId,
    pub title: String,
    pub location: String,
    #[serde(default, deserialize_with = "deserialize_description")]
    pub description: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A trip paired with the score of the latest ranking pass
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredTrip {
    #[serde(flatten)]
    pub trip: Trip,
    #[serde(rename = "_score")]
    pub score: u32,
}

impl ScoredTrip {
    pub fn id(&self) -> TripId {
        self.trip.id
    }
}

/// Prices arrive either as JSON numbers or as decimal strings ("1000.00")
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Text(String),
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(value) => value,
        RawPrice::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid price {:?}: {}", text, e)))?,
    };

    if !value.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "price must be finite, got {}",
            value
        )));
    }
    Ok(value)
}

fn deserialize_description<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trip_id_display() {
        assert_eq!(format!("{}", TripId(42)), "42");
    }

    #[test]
    fn test_trip_accepts_decimal_string_price() {
        let trip: Trip = serde_json::from_value(json!({
            "id": 7,
            "title": "Kyoto Temples",
            "location": "Kyoto",
            "description": "Ancient heritage walk",
            "price": "1250.50",
            "duration_days": 5,
            "is_active": true
        }))
        .unwrap();

        assert_eq!(trip.id, TripId(7));
        assert_eq!(trip.price, 1250.5);
        assert_eq!(trip.duration_days, 5);
        assert_eq!(trip.country, None);
    }

    #[test]
    fn test_trip_accepts_numeric_price_and_null_description() {
        let trip: Trip = serde_json::from_value(json!({
            "id": 1,
            "title": "Beach Paradise",
            "location": "Goa",
            "description": null,
            "price": 1000
        }))
        .unwrap();

        assert_eq!(trip.price, 1000.0);
        assert_eq!(trip.description, "");
    }

    #[test]
    fn test_trip_rejects_garbage_price() {
        let result = serde_json::from_value::<Trip>(json!({
            "id": 1,
            "title": "Beach Paradise",
            "location": "Goa",
            "price": "call us"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_trip_rejects_non_finite_price() {
        for price in ["NaN", "inf", "-inf", "infinity"] {
            let result = serde_json::from_value::<Trip>(json!({
                "id": 1,
                "title": "Beach Paradise",
                "location": "Goa",
                "price": price
            }));
            assert!(result.is_err(), "price {:?} should be rejected", price);
        }
    }

    #[test]
    fn test_catalog_with_non_finite_price_is_rejected() {
        let result = serde_json::from_str::<Vec<Trip>>(
            r#"[
                {"id": 1, "title": "Beach Paradise", "location": "Goa", "price": "1000.00"},
                {"id": 2, "title": "Mountain Trek", "location": "Manali", "price": "NaN"}
            ]"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_scored_trip_serializes_flat_with_score_field() {
        let scored = ScoredTrip {
            trip: Trip {
                id: TripId(3),
                title: "Mountain Trek".to_string(),
                location: "Manali".to_string(),
                description: String::new(),
                price: 1100.0,
                duration_days: 4,
                country: Some("India".to_string()),
                image: None,
            },
            score: 6,
        };

        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["title"], "Mountain Trek");
        assert_eq!(value["_score"], 6);
    }
}
