//! JSON-RPC 2.0 communication layer for frontend integration.
//!
//! Implements bidirectional messaging between Bevy engine and the web UI via
//! iframe postMessage, supporting both request-response and notification patterns.
//!
//! ## Architecture
//!
//! The RPC system uses standard JSON-RPC 2.0 protocol with:
//! - **Requests**: Expect responses with matching IDs
//! - **Notifications**: One-way messages without responses
//! - **Responses**: Reply to requests with results or errors
//!
//! ## Message Flow
//!
//! ```text
//! Web UI (parent window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Navigation Requests
//!
//! Requests are applied synchronously through the same all-or-nothing path
//! as clicks, so a response always describes the state actually reached:
//!
//! ```typescript
//! iframe.contentWindow.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "select_section",
//!   params: { index: 2 },
//!   id: 1
//! }), "*");
//! ```
//!
//! A successful navigation result carries `state`, `breadcrumb`, `clickable`
//! and the camera `transition` id (null when nothing moved).
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes plus navigation failures:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params, including negative indices and empty item ids
//! - `-32603`: Internal error (library not loaded yet)
//! - `-32000`: Invalid transition, a required ancestor level is unset
//! - `-32001`: Target not found, the scene has no object for the selection
//!
//! ## Existing Methods
//!
//! ### Navigation
//! - `select_section { index }`: Drill into a section from any level
//! - `select_shelf { index }`: Drill into a shelf of the selected section
//! - `select_item { id }`: Open an item on the selected shelf
//! - `go_back`: Step one level towards the overview
//! - `reset`: Return to the overview
//! - `get_navigation_state`: Current state without changing it
//!
//! ### Notifications
//! - `navigation_state_changed`: State, previous level, breadcrumb, clickable kind
//! - `navigation_failed`: A click or shortcut was refused
//! - `camera_settled`: A camera transition reached its target
//! - `catalog_loaded`: Sections and item count once the manifest is in

/// JSON-RPC 2.0 bidirectional communication system for frontend integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
