//! RaizTech API - data and reporting backend for the irrigation dashboard
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod routes;
