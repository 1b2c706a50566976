//! Interactive 3D library with hierarchical navigation.
//!
//! The user drills from an overview of the library into a section, a shelf and
//! finally a single item, and back out again. Every step moves the camera with
//! an interruptible eased transition.

pub mod engine;
pub mod interaction;
pub mod navigation;
pub mod rpc;

pub use engine::core::app_setup::create_app;
