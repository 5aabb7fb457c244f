//! Portfolio site backend: project listing API, contact-form mail relay, and
//! the client-side pieces (HTTP client, contact form state) that talk to it.

pub mod client;
pub mod config;
pub mod contact;
pub mod db;
pub mod errors;
pub mod mailer;
pub mod projects;
pub mod routes;
pub mod state;
pub mod ui;
