//! Utility functions for controller request handling.

pub mod get_principal;
