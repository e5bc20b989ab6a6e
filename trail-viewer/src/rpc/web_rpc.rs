use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::AppState;
use crate::engine::systems::fps_tracking::smoothed_fps;
use crate::recording::path_store::RecordedPaths;
use crate::recording::recorder::{
    InputSource, PathRecorder, RecordToggleEvent, SetSampleRateEvent,
};
use crate::recording::sample_rate::SampleRate;

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

/// Resource managing bidirectional RPC communication with the host page.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
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

    #[cfg(test)]
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    #[cfg(test)]
    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Recorder changes requested over RPC, dispatched as events after the
/// request is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecorderCommand {
    ToggleRecording,
    SetSampleRate(SampleRate),
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
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

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC listener not registered");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // JS owns the closure from here on.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
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

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    recorder: Res<PathRecorder>,
    paths: Res<RecordedPaths>,
    state: Res<State<AppState>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut toggle_events: EventWriter<RecordToggleEvent>,
    mut rate_events: EventWriter<SetSampleRateEvent>,
) {
    let mut commands = Vec::new();
    let running = *state.get() == AppState::Running;

    for event in events.read() {
        rpc_interface.send_notification(
            "debug_message",
            serde_json::json!({
                "message": format!("Received RPC: {}", event.content)
            }),
        );

        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(
                    &request,
                    &recorder,
                    &paths,
                    &diagnostics,
                    running,
                    &mut commands,
                ) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                rpc_interface.send_notification(
                    "debug_message",
                    serde_json::json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
            }
        }
    }

    for command in commands {
        match command {
            RecorderCommand::ToggleRecording => {
                toggle_events.write(RecordToggleEvent {
                    source: InputSource::Rpc,
                });
            }
            RecorderCommand::SetSampleRate(rate) => {
                rate_events.write(SetSampleRateEvent {
                    rate,
                    source: InputSource::Rpc,
                });
            }
        }
    }
}

/// Handle individual RPC request. Notifications (no ID) still run but get no response.
/// Recorder commands are refused until the viewer is running, since nothing
/// consumes them before then.
fn handle_rpc_request(
    request: &RpcRequest,
    recorder: &PathRecorder,
    paths: &RecordedPaths,
    diagnostics: &DiagnosticsStore,
    running: bool,
    commands: &mut Vec<RecorderCommand>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "toggle_recording" | "set_sample_rate" if !running => {
            Err(RpcError::viewer_loading(&request.method))
        }
        "toggle_recording" => handle_toggle_recording(commands),
        "set_sample_rate" => handle_set_sample_rate(&request.params, commands),
        "get_recorder_state" => handle_get_recorder_state(recorder, paths),
        "get_recorded_paths" => handle_get_recorded_paths(paths),
        "get_fps" => handle_get_fps(diagnostics),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return request.id.clone().map(|id| {
                create_error_response(
                    id,
                    -32601,
                    "Method not found",
                    Some(serde_json::json!({"method": request.method})),
                )
            });
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

fn handle_toggle_recording(
    commands: &mut Vec<RecorderCommand>,
) -> Result<serde_json::Value, RpcError> {
    commands.push(RecorderCommand::ToggleRecording);
    Ok(serde_json::json!({ "queued": true }))
}

fn handle_set_sample_rate(
    params: &serde_json::Value,
    commands: &mut Vec<RecorderCommand>,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct SampleRateParams {
        sample_rate_ms: u32,
    }

    let parsed = serde_json::from_value::<SampleRateParams>(params.clone()).map_err(|_| {
        RpcError::invalid_params("Expected non-negative integer 'sample_rate_ms' parameter")
    })?;

    let rate = SampleRate::new(parsed.sample_rate_ms);
    commands.push(RecorderCommand::SetSampleRate(rate));
    info!(
        "Sample rate {} ms requested over RPC (applied as {} ms)",
        parsed.sample_rate_ms,
        rate.millis()
    );

    Ok(serde_json::json!({ "sample_rate_ms": rate.millis() }))
}

fn handle_get_recorder_state(
    recorder: &PathRecorder,
    paths: &RecordedPaths,
) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::json!({
        "recording": recorder.is_recording(),
        "sample_rate_ms": recorder.sample_rate().millis(),
        "buffered_points": recorder.buffered().len(),
        "path_count": paths.len(),
    }))
}

fn handle_get_recorded_paths(paths: &RecordedPaths) -> Result<serde_json::Value, RpcError> {
    let paths: Vec<serde_json::Value> = paths.iter().map(|path| path.to_json()).collect();
    Ok(serde_json::json!({ "paths": paths }))
}

fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = smoothed_fps(diagnostics).unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

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

/// Send queued notifications, then responses, to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

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
        let _ = message;
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    /// Server-defined error for commands that arrive while the config is loading.
    pub fn viewer_loading(method: &str) -> Self {
        Self {
            code: -32002,
            message: "Viewer still loading".to_string(),
            data: Some(serde_json::json!({ "method": method })),
        }
    }
}
