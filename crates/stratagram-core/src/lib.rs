//! Stratagram Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Stratagram
//! resolver and renderer. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: CSS color validation for node fills ([`color::Color`])
//! - **Manifest**: The cloud assembly manifest and its metadata store ([`manifest`] module)
//! - **Paths**: Construct path splitting ([`path::ManifestPath`])
//! - **Resources**: Stack resources and their type tags ([`resource`] module)
//! - **Icons**: Type tag to icon lookup ([`icon`] module)

pub mod color;
pub mod icon;
pub mod identifier;
pub mod manifest;
pub mod path;
pub mod resource;
