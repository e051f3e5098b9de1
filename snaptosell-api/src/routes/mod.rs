/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `ai`: Content generation endpoints
/// - `history`: Generation history endpoints

pub mod ai;
pub mod health;
pub mod history;
