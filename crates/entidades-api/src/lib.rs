// Entidades API Library
//
// This crate provides the REST API layer for Entidades,
// including HTTP handlers, routes, and response models.

pub mod handlers;
pub mod routes;
