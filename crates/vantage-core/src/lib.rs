//! Vantage Core Types
//!
//! This crate provides the foundational types shared by Vantage node
//! renderers and their hosts. It includes:
//!
//! - **Geometry**: Points, sizes and boxes ([`geometry`] module)
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Signals**: Listener registration with scoped release ([`signal`] module)
//! - **Model**: Nodes, ports and change notifications ([`model`] module)
//! - **Viewport**: Pan/zoom projection and visibility ([`viewport`] module)
//! - **Events**: Host-independent pointer events ([`event`] module)

pub mod event;
pub mod geometry;
pub mod identifier;
pub mod model;
pub mod signal;
pub mod viewport;
