use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::notifications::{
    notify_loading_progress, notify_placement_transitions, notify_target_picks,
};
use super::xr_messages::parse_xr_notification;
use crate::engine::core::app_state::ViewerSet;
use crate::tools::interaction::InteractionTargets;
use crate::tools::placement::PlacementController;
use crate::xr::XrInbox;

#[cfg(target_arch = "wasm32")]
use super::notifications::notify_source_requests;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure. Requests without an `id` are notifications.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default)]
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

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC traffic between the host page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    /// Notifications queued since the last send, oldest first.
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    /// Responses queued since the last send, oldest first.
    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Plugin establishing the postMessage bridge to the host page.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (process_incoming_messages, handle_rpc_messages)
                    .chain()
                    .in_set(ViewerSet::Inbox),
            )
            .add_systems(
                Update,
                (
                    (
                        notify_loading_progress,
                        notify_placement_transitions,
                        notify_target_picks,
                    ),
                    send_outgoing_messages,
                )
                    .chain()
                    .in_set(ViewerSet::Outbox),
            );

        // Native builds hand source requests to the desktop preview instead.
        #[cfg(target_arch = "wasm32")]
        app.add_systems(
            Update,
            notify_source_requests
                .in_set(ViewerSet::Outbox)
                .before(send_outgoing_messages),
        )
        .add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue filled by the JS message callback.
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

    match window() {
        Some(window) => {
            if let Err(e) =
                window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
            }
        }
        None => error!("Window object not available, host messages will be ignored"),
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing one raw message from the host page.
#[derive(Event, Debug, Clone)]
pub struct IncomingRpcMessage {
    pub content: String,
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

/// Routes host messages: XR protocol notifications into platform events,
/// requests into responses. Bad traffic is reported and dropped.
pub fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut inbox: XrInbox,
    controller: Res<PlacementController>,
    targets: Res<InteractionTargets>,
) {
    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                report_malformed(&mut rpc_interface, &event.content, &parse_error.to_string());
                continue;
            }
        };
        debug!("Processing method: {}", request.method);

        match parse_xr_notification(&request.method, &request.params) {
            Ok(Some(message)) => {
                inbox.deliver(message);
                if let Some(id) = request.id {
                    rpc_interface.queue_response(create_result_response(id, json!({"success": true})));
                }
            }
            Ok(None) => {
                if let Some(response) = handle_rpc_request(&request, &controller, &targets) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(err) => {
                warn!("Rejected {} message: {}", request.method, err);
                match request.id {
                    Some(id) => rpc_interface.queue_response(create_error_response(
                        id,
                        -32602,
                        "Invalid params",
                        Some(json!({"method": request.method, "reason": err.to_string()})),
                    )),
                    None => rpc_interface.send_notification(
                        "debug_message",
                        json!({"message": format!("Invalid {} params: {}", request.method, err)}),
                    ),
                }
            }
        }
    }
}

/// Unparseable message. Answers with -32600 if an id can still be recovered.
fn report_malformed(rpc_interface: &mut WebRpcInterface, content: &str, reason: &str) {
    warn!("Malformed RPC message: {}", reason);
    let id = serde_json::from_str::<serde_json::Value>(content)
        .ok()
        .and_then(|value| value.get("id").cloned())
        .filter(|id| !id.is_null());

    match id {
        Some(id) => rpc_interface.queue_response(create_error_response(
            id,
            -32600,
            "Invalid request",
            Some(json!({"reason": reason})),
        )),
        None => rpc_interface.send_notification(
            "debug_message",
            json!({"message": format!("Parse error: {}", reason)}),
        ),
    }
}

/// Handle individual RPC request and generate response based on method.
fn handle_rpc_request(
    request: &RpcRequest,
    controller: &PlacementController,
    targets: &InteractionTargets,
) -> Option<RpcResponse> {
    // Only generate responses for requests with IDs (notifications have no ID).
    let Some(id) = request.id.clone() else {
        warn!("Ignoring unknown notification: {}", request.method);
        return None;
    };

    let result = match request.method.as_str() {
        "get_placement_state" => handle_get_placement_state(controller, targets),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                -32601,
                "Method not found",
                Some(json!({"method": request.method})),
            ));
        }
    };

    match result {
        Ok(result_value) => Some(create_result_response(id, result_value)),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

/// Snapshot of placement for hosts that join late or poll.
fn handle_get_placement_state(
    controller: &PlacementController,
    targets: &InteractionTargets,
) -> Result<serde_json::Value, RpcError> {
    Ok(json!({
        "state": controller.state(),
        "has_placed": controller.has_placed(),
        "reticle_visible": controller.reticle().visible,
        "targets": targets.names(),
        "targets_ready": targets.is_cached(),
    }))
}

fn create_result_response(id: serde_json::Value, result: serde_json::Value) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: Some(result),
        error: None,
        id: Some(id),
    }
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the host page.
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

/// Send serialized message to the parent window (host page).
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
        // No host page on native builds.
        let _ = message;
    }
}
