//! ViettelPay Gateway - Payment gateway integration service
//!
//! Builds signed payment-initiation links for the ViettelPay gateway and
//! authenticates, verifies and reconciles its asynchronous payment
//! notifications against externally owned transaction records.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
