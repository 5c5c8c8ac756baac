//! Sliding-Window Sample History
//!
//! Fixed-capacity FIFO over recent per-frame samples. The motion detector
//! keeps one history per signal channel and inspects consecutive-pair
//! differences, so the buffer exposes ordered iteration and pair iteration
//! rather than random access.

mod buffer;

pub use buffer::History;
