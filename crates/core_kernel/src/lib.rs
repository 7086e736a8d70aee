//! Core Kernel - Foundational types and utilities for the connector
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Remote object snapshots and property maps exchanged with the CRM
//! - The uniform CRM error type every port implementation reports
//! - Health-check contracts for adapters

pub mod error;
pub mod health;
pub mod object;

pub use error::CrmError;
pub use health::{AdapterHealth, HealthCheckResult, HealthCheckable};
pub use object::{AssociationRequest, PropertyMap, RemoteObject};
