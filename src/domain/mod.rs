//! Domain layer: value objects, the order draft, pricing and record normalization
pub mod adapter;
pub mod aggregates;
pub mod events;
pub mod pricing;
pub mod value_objects;
