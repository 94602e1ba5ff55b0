//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. Note that these may differ from API-specific models:
//! insert payloads omit generated columns, and listing rows carry aggregates
//! computed at query time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `users` table.
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Never serialized back out of this layer.
    #[serde(skip_serializing)]
    pub password: String,
}

/// Payload for inserting a new user.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A row of the `properties` table.
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Property {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly price in minor currency units (cents).
    pub cost_per_night: i64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
}

/// Payload for inserting a new property.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewProperty {
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly price in minor currency units (cents).
    pub cost_per_night: i64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
}

/// A property search result: the property columns plus the mean rating of
/// its reviews, computed per group at query time.
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct PropertyListing {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub property: Property,
    pub average_rating: f64,
}

/// A reservation listing row for one guest, joined with the reserved
/// property and its aggregated review rating.
#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct ReservationSummary {
    pub id: i64,
    pub title: String,
    pub start_date: NaiveDate,
    pub cost_per_night: i64,
    pub average_rating: f64,
}

/// Optional criteria for the property search.
///
/// Absent fields mean "do not filter on this dimension"; prices are given in
/// whole currency units and converted to minor units when the query is
/// built.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct PropertyFilters {
    pub city: Option<String>,
    pub owner_id: Option<i64>,
    pub minimum_price_per_night: Option<f64>,
    pub maximum_price_per_night: Option<f64>,
    pub minimum_rating: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_deserialize_with_absent_fields() {
        let filters: PropertyFilters =
            serde_json::from_str(r#"{"city": "Vancouver", "minimum_rating": 4}"#).unwrap();
        assert_eq!(filters.city.as_deref(), Some("Vancouver"));
        assert_eq!(filters.minimum_rating, Some(4.0));
        assert!(filters.owner_id.is_none());
        assert!(filters.minimum_price_per_night.is_none());
        assert!(filters.maximum_price_per_night.is_none());
    }

    #[test]
    fn empty_filters_deserialize_to_default() {
        let filters: PropertyFilters = serde_json::from_str("{}").unwrap();
        assert!(filters.city.is_none());
        assert!(filters.owner_id.is_none());
        assert!(filters.minimum_rating.is_none());
    }

    #[test]
    fn user_serialization_omits_password() {
        let user = User {
            id: 1,
            name: "Eva Stanley".to_string(),
            email: "sebastianguerra@ymail.com".to_string(),
            password: "hashed".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "sebastianguerra@ymail.com");
    }
}
