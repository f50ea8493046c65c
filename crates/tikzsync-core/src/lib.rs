//! tikzsync Core Types and Definitions
//!
//! This crate provides the foundational types shared by the tikzsync code
//! generator, code parser and preview. It includes:
//!
//! - **Colors**: RGB colors with hex and CSS parsing ([`color::Color`])
//! - **Geometry**: Points, sizes and the logical ↔ pixel mapper ([`geometry`] module)
//! - **Scene**: The editable model of drawable elements and their styles ([`scene`] module)

pub mod color;
pub mod geometry;
pub mod scene;
