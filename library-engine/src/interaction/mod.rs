//! User input that drives navigation.
//!
//! Mouse picking and keyboard shortcuts emit `NavigationRequest` events;
//! the breadcrumb overlay mirrors where the user currently is.

/// Native breadcrumb text overlay.
pub mod breadcrumb;

/// Keyboard shortcuts for going back and resetting (native builds only).
pub mod keyboard;

/// Click-to-navigate picking filtered by the clickable level.
pub mod picking;

/// Ray intersection against oriented boxes.
pub mod ray;
