//! Domain models shared by the integration logic and the API client.

pub mod integration;
