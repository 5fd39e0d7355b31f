//! Functional core of the todolist service.
//!
//! Pure domain types, the error taxonomy shared by every layer, the
//! repository contract and the mapping from errors to HTTP status codes.
//! Nothing in this crate performs I/O.

pub mod storage;
pub mod todo;
