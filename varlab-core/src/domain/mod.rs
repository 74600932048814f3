//! Domain types for VarLab

pub mod trade;

pub use trade::Trade;
