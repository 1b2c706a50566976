use crate::engine::assets::catalog::LibraryCatalog;
use crate::engine::camera::choreographer::CameraChoreographer;
use crate::engine::camera::systems::CameraSettled;
use crate::engine::core::app_state::AppState;
use crate::engine::scene::layout::LibraryLayout;
use crate::navigation::controller::{
    BreadcrumbLabels, NavigationController, NavigationRequest, breadcrumb_for, clickable_below,
};
use crate::navigation::error::NavigationError;
use crate::navigation::navigator::Navigator;
use crate::navigation::plugin::{NavigationChanged, NavigationFailed};
use crate::navigation::state::{Level, NavigationState};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the frontend and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the frontend without expecting response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the frontend.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(OnEnter(AppState::SceneReady), notify_catalog_loaded)
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    forward_navigation_events,
                    forward_camera_settled,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        // Filter messages to ensure they contain string data.
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
        }
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the frontend.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Everything a navigation RPC call needs, borrowed from the world for one message.
pub struct NavigationRpc<'a> {
    pub controller: &'a mut NavigationController,
    pub camera: &'a mut CameraChoreographer,
    pub layout: Option<&'a LibraryLayout>,
    pub catalog: Option<&'a LibraryCatalog>,
}

impl NavigationRpc<'_> {
    /// Run one method. Navigation methods are applied before this returns,
    /// so the result reflects the real outcome.
    pub fn dispatch(
        &mut self,
        method: &str,
        params: &serde_json::Value,
    ) -> Result<serde_json::Value, RpcError> {
        let request = match method {
            "select_section" => NavigationRequest::select_section(index_param(params)?)?,
            "select_shelf" => NavigationRequest::select_shelf(index_param(params)?)?,
            "select_item" => self.item_request(params)?,
            "go_back" => NavigationRequest::GoBack,
            "reset" => NavigationRequest::Reset,
            "get_navigation_state" => return Ok(self.describe()),
            _ => return Err(RpcError::method_not_found(method)),
        };

        let Some(layout) = self.layout else {
            return Err(RpcError::internal_error("Library not loaded"));
        };
        let name = request.name();
        let transition =
            Navigator::new(&mut *self.controller, &mut *self.camera, layout).navigate(request)?;
        info!("RPC {} applied, now at {}", name, self.controller.level().as_str());

        let mut result = self.describe();
        result["success"] = serde_json::Value::Bool(true);
        result["transition"] = match transition {
            Some(transition) => serde_json::json!(transition.id),
            None => serde_json::Value::Null,
        };
        Ok(result)
    }

    fn item_request(&self, params: &serde_json::Value) -> Result<NavigationRequest, RpcError> {
        #[derive(serde::Deserialize)]
        struct ItemParams {
            id: String,
        }

        let item_params = serde_json::from_value::<ItemParams>(params.clone())
            .map_err(|_| RpcError::invalid_params("Expected 'id' parameter"))?;
        if item_params.id.trim().is_empty() {
            return Err(NavigationError::InvalidIndex { kind: "item" }.into());
        }

        let state = self.controller.state();
        let (Some(section), Some(shelf)) = (state.section_index(), state.shelf_index()) else {
            return Err(NavigationError::InvalidTransition {
                current: state.level(),
                requested: Level::Item,
            }
            .into());
        };

        let snapshot = self
            .catalog
            .and_then(|catalog| catalog.snapshot(section, shelf, &item_params.id))
            .ok_or(NavigationError::TargetNotFound { level: Level::Item })?;
        Ok(NavigationRequest::select_item(item_params.id, snapshot)?)
    }

    fn describe(&self) -> serde_json::Value {
        describe_state(self.controller.state(), self.catalog)
    }
}

/// State, breadcrumb and clickable kind as sent to the frontend.
pub fn describe_state(
    state: &NavigationState,
    catalog: Option<&LibraryCatalog>,
) -> serde_json::Value {
    let labels = catalog.map(|catalog| catalog as &dyn BreadcrumbLabels);
    serde_json::json!({
        "state": state,
        "breadcrumb": breadcrumb_for(state, labels),
        "clickable": clickable_below(state.level()),
    })
}

fn index_param(params: &serde_json::Value) -> Result<i64, RpcError> {
    #[derive(serde::Deserialize)]
    struct IndexParams {
        index: i64,
    }

    serde_json::from_value::<IndexParams>(params.clone())
        .map(|p| p.index)
        .map_err(|_| RpcError::invalid_params("Expected integer 'index' parameter"))
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut controller: ResMut<NavigationController>,
    mut camera: ResMut<CameraChoreographer>,
    layout: Option<Res<LibraryLayout>>,
    catalog: Option<Res<LibraryCatalog>>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Unparseable RPC message: {}", parse_error);
                continue;
            }
        };
        debug!("Processing RPC method: {}", request.method);

        let mut navigation = NavigationRpc {
            controller: &mut *controller,
            camera: &mut *camera,
            layout: layout.as_deref(),
            catalog: catalog.as_deref(),
        };
        if let Some(response) = handle_rpc_request(&request, &mut navigation) {
            rpc_interface.queue_response(response);
        }
    }
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(
    request: &RpcRequest,
    navigation: &mut NavigationRpc<'_>,
) -> Option<RpcResponse> {
    let result = navigation.dispatch(&request.method, &request.params);
    if let Err(error) = &result {
        warn!("RPC {} failed: {}", request.method, error.message);
    }

    // Only generate responses for requests with IDs (notifications have no ID).
    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn forward_navigation_events(
    mut changes: EventReader<NavigationChanged>,
    mut failures: EventReader<NavigationFailed>,
    catalog: Option<Res<LibraryCatalog>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for change in changes.read() {
        let mut params = describe_state(&change.state, catalog.as_deref());
        params["previous_level"] = serde_json::json!(change.previous_level);
        rpc_interface.send_notification("navigation_state_changed", params);
    }

    for failure in failures.read() {
        let error = RpcError::from(failure.error.clone());
        rpc_interface.send_notification(
            "navigation_failed",
            serde_json::json!({
                "request": failure.request,
                "code": error.code,
                "message": error.message,
            }),
        );
    }
}

fn forward_camera_settled(
    mut settled: EventReader<CameraSettled>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in settled.read() {
        rpc_interface.send_notification(
            "camera_settled",
            serde_json::json!({ "transition": event.transition }),
        );
    }
}

fn notify_catalog_loaded(
    catalog: Option<Res<LibraryCatalog>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(catalog) = catalog else {
        return;
    };
    let sections: Vec<serde_json::Value> = catalog
        .sections()
        .iter()
        .map(|section| {
            let shelves: Vec<&str> = section
                .shelves
                .iter()
                .map(|shelf| shelf.label.as_str())
                .collect();
            serde_json::json!({
                "id": section.id,
                "label": section.label,
                "shelves": shelves,
            })
        })
        .collect();

    rpc_interface.send_notification(
        "catalog_loaded",
        serde_json::json!({
            "sections": sections,
            "item_count": catalog.item_count(),
        }),
    );
}

/// Send queued notifications and responses to the frontend.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    // Send notifications first.
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Send responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window (frontend).
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Ok(json) = serde_json::to_string(message) {
            debug!("RPC out (no parent window): {}", json);
        }
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

impl From<NavigationError> for RpcError {
    fn from(error: NavigationError) -> Self {
        Self {
            code: error.rpc_code(),
            message: error.to_string(),
            data: None,
        }
    }
}
