//! Test fixture modules for mock section payloads and upstream endpoints.

pub mod section;
