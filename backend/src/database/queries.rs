//! Database query functions (Data Access Objects).
//!
//! This module centralizes all direct database operations, providing reusable
//! functions for interacting with the database and abstracting the query logic
//! from higher-level services and API handlers.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use crate::config::DatabaseConfig;
use crate::errors::{DatabaseError, DatabaseResult};

use super::models::{
    NewProperty, NewUser, Property, PropertyFilters, PropertyListing, ReservationSummary, User,
};
use super::plan::{BindValue, QueryPlan};

/// Result-count cap applied when a caller does not supply one.
pub const DEFAULT_RESULT_LIMIT: i64 = 10;

const SELECT_USER_BY_EMAIL: &str = "SELECT id, name, email, password FROM users WHERE email = $1";

const SELECT_USER_BY_ID: &str = "SELECT id, name, email, password FROM users WHERE id = $1";

const INSERT_USER: &str = "\
INSERT INTO users (name, email, password)
VALUES ($1, $2, $3)
RETURNING id, name, email, password";

const SELECT_RESERVATIONS_FOR_GUEST: &str = "\
SELECT reservations.id, properties.title, reservations.start_date,
       properties.cost_per_night,
       avg(property_reviews.rating)::float8 AS average_rating
FROM reservations
JOIN properties ON reservations.property_id = properties.id
JOIN property_reviews ON properties.id = property_reviews.property_id
WHERE reservations.guest_id = $1
GROUP BY reservations.id, properties.title, reservations.start_date,
         properties.cost_per_night
ORDER BY reservations.start_date
LIMIT $2";

const INSERT_PROPERTY: &str = "\
INSERT INTO properties (owner_id, title, description, thumbnail_photo_url,
                        cover_photo_url, cost_per_night, street, city,
                        province, post_code, country, parking_spaces,
                        number_of_bathrooms, number_of_bedrooms)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
RETURNING *";

const PROPERTY_SEARCH_BASE: &str = "\
SELECT properties.*, avg(property_reviews.rating)::float8 AS average_rating
FROM properties
JOIN property_reviews ON properties.id = property_reviews.property_id
WHERE 1 = 1";

/// The operations the HTTP layer consumes.
///
/// "No matching row" is a successful absent result, never an error. Every
/// database failure is logged once where it happens and then returned with
/// the driver error intact; retry and backoff policy belong to the caller.
#[async_trait]
pub trait RentalStore {
    /// Fetches a single user by email address.
    async fn get_user_with_email(&self, email: &str) -> DatabaseResult<Option<User>>;

    /// Fetches a single user by id.
    async fn get_user_with_id(&self, id: i64) -> DatabaseResult<Option<User>>;

    /// Inserts a new user and returns the stored row.
    async fn add_user(&self, user: NewUser) -> DatabaseResult<User>;

    /// Fetches a guest's reservations, oldest start date first.
    async fn get_all_reservations(
        &self,
        guest_id: i64,
        limit: Option<i64>,
    ) -> DatabaseResult<Vec<ReservationSummary>>;

    /// Searches properties by the given criteria, cheapest first.
    async fn get_all_properties(
        &self,
        filters: &PropertyFilters,
        limit: Option<i64>,
    ) -> DatabaseResult<Vec<PropertyListing>>;

    /// Inserts a new property and returns the stored row.
    async fn add_property(&self, property: NewProperty) -> DatabaseResult<Property>;
}

/// Data-access handle owning the injected connection pool.
///
/// Cloning is cheap; the pool multiplexes concurrent calls internally and
/// no query state is shared between invocations.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool from `config` and wraps it.
    pub async fn connect(config: &DatabaseConfig) -> DatabaseResult<Self> {
        Ok(Self::new(super::connect(config).await?))
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RentalStore for Database {
    async fn get_user_with_email(&self, email: &str) -> DatabaseResult<Option<User>> {
        sqlx::query_as::<_, User>(SELECT_USER_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                error!("error fetching user by email: {err}");
                DatabaseError::Query(err)
            })
    }

    async fn get_user_with_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        sqlx::query_as::<_, User>(SELECT_USER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                error!("error fetching user by id: {err}");
                DatabaseError::Query(err)
            })
    }

    async fn add_user(&self, user: NewUser) -> DatabaseResult<User> {
        sqlx::query_as::<_, User>(INSERT_USER)
            .bind(user.name)
            .bind(user.email)
            .bind(user.password)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                error!("error adding user: {err}");
                DatabaseError::Query(err)
            })
    }

    async fn get_all_reservations(
        &self,
        guest_id: i64,
        limit: Option<i64>,
    ) -> DatabaseResult<Vec<ReservationSummary>> {
        sqlx::query_as::<_, ReservationSummary>(SELECT_RESERVATIONS_FOR_GUEST)
            .bind(guest_id)
            .bind(limit.unwrap_or(DEFAULT_RESULT_LIMIT))
            .fetch_all(&self.pool)
            .await
            .map_err(|err| {
                error!("error fetching reservations: {err}");
                DatabaseError::Query(err)
            })
    }

    async fn get_all_properties(
        &self,
        filters: &PropertyFilters,
        limit: Option<i64>,
    ) -> DatabaseResult<Vec<PropertyListing>> {
        let plan = build_property_query(filters, limit.unwrap_or(DEFAULT_RESULT_LIMIT));
        let (sql, values) = plan.into_parts();

        let mut query = sqlx::query_as::<_, PropertyListing>(&sql);
        for value in values {
            query = match value {
                BindValue::Int(value) => query.bind(value),
                BindValue::Real(value) => query.bind(value),
                BindValue::Text(value) => query.bind(value),
            };
        }

        query.fetch_all(&self.pool).await.map_err(|err| {
            error!("error fetching properties: {err}");
            DatabaseError::Query(err)
        })
    }

    async fn add_property(&self, property: NewProperty) -> DatabaseResult<Property> {
        sqlx::query_as::<_, Property>(INSERT_PROPERTY)
            .bind(property.owner_id)
            .bind(property.title)
            .bind(property.description)
            .bind(property.thumbnail_photo_url)
            .bind(property.cover_photo_url)
            .bind(property.cost_per_night)
            .bind(property.street)
            .bind(property.city)
            .bind(property.province)
            .bind(property.post_code)
            .bind(property.country)
            .bind(property.parking_spaces)
            .bind(property.number_of_bathrooms)
            .bind(property.number_of_bedrooms)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                error!("error adding property: {err}");
                DatabaseError::Query(err)
            })
    }
}

/// Assembles the property-search plan for the given criteria.
///
/// Filters are appended in a fixed order: city, owner, minimum price,
/// maximum price, then, after grouping, minimum rating. The rating
/// predicate has to apply to the per-property average, so it is emitted as
/// a `HAVING` on the aggregate rather than a `WHERE` on the raw review
/// column. The limit is always the final placeholder.
fn build_property_query(filters: &PropertyFilters, limit: i64) -> QueryPlan {
    let mut plan = QueryPlan::new(PROPERTY_SEARCH_BASE);

    if let Some(city) = &filters.city {
        plan.push_predicate(
            "AND properties.city LIKE",
            BindValue::Text(format!("%{city}%")),
        );
    }
    if let Some(owner_id) = filters.owner_id {
        plan.push_predicate("AND properties.owner_id =", BindValue::Int(owner_id));
    }
    if let Some(minimum) = filters.minimum_price_per_night {
        plan.push_predicate(
            "AND properties.cost_per_night >=",
            BindValue::Int(to_minor_units(minimum)),
        );
    }
    if let Some(maximum) = filters.maximum_price_per_night {
        plan.push_predicate(
            "AND properties.cost_per_night <=",
            BindValue::Int(to_minor_units(maximum)),
        );
    }

    plan.push_clause("GROUP BY properties.id");

    if let Some(rating) = filters.minimum_rating {
        plan.push_predicate(
            "HAVING avg(property_reviews.rating) >=",
            BindValue::Real(rating),
        );
    }

    plan.push_clause("ORDER BY properties.cost_per_night");
    plan.push_predicate("LIMIT", BindValue::Int(limit));

    plan
}

/// Prices arrive in whole currency units; storage compares integer cents.
fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}
