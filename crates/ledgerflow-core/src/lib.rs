//! Ledgerflow Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Ledgerflow chart
//! pipeline. It includes:
//!
//! - **Identifiers**: Interned node keys ([`identifier::Id`])
//! - **Colors**: CSS colors, `rgba` channels and hex parsing ([`color`] module)
//! - **Palette**: Node categories and their colors ([`palette`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Layered SVG drawing primitives ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod palette;
