//! Data types shared between the storefront backend and its clients.

pub mod domain;
pub mod enums;
pub mod shared;
pub mod system;
