// Public entities for the BpCalc API
// Wire shapes only; domain types never cross the HTTP boundary directly

// Blood pressure reading requests and responses
pub mod reading;

// Status envelope shared by every non-list response
pub mod common;
