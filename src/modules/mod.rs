//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the object-storage client and its abstraction.

pub mod storage;
