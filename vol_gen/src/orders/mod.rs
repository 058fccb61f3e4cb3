//! Orders in which samples are visited

mod linear_order;

pub use linear_order::LinearCoordIterator;
