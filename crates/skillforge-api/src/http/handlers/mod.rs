//! HTTP request handlers for the REST API.

pub mod domain;
pub mod health;
pub mod skill_tree;
