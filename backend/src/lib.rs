//! Core library crate for the Shorestay backend.
//!
//! This crate implements the data-access layer of the vacation-rental
//! listing application: parameterized SQL queries against PostgreSQL for
//! users, reservations, and properties, executed through a shared
//! connection pool. The HTTP route handlers and view layer live outside
//! this crate and consume it through the types exported here.

pub mod config;
pub mod database;
pub mod errors;
