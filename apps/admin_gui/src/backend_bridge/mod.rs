//! Backend worker plumbing: the command queue contract and the worker runtime.

pub mod commands;
pub mod runtime;
