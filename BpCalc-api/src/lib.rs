// BpCalc-api lib.rs
//
// HTTP surface of the BpCalc service: configuration, handlers, router and API docs.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
