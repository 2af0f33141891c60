#![doc = include_str!("../README.md")]

pub mod client;
mod error;
pub mod logical;
pub mod mfa;

pub use client::{Client, ClientSettings};
pub use error::{ApiError, ClientError};
