use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::error::McpError;
use super::prompt::PromptHandler;
use super::protocol::{
    DEFAULT_PROTOCOL_VERSION, GetPromptParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListPromptsResult, PromptsCapability, ServerCapabilities, ServerInfo,
};

pub const SERVER_NAME: &str = "GitHub Activity Summarizer";

/// MCP server exposing the prompts of a [`PromptHandler`].
pub struct McpServer<P> {
    handler: P,
}

impl<P: PromptHandler> McpServer<P> {
    pub fn new(handler: P) -> Self {
        Self { handler }
    }

    /// Handle one raw message. Returns None for notifications.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparseable message");
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(format!("Parse error: {e}")),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!("Invalid request: {e}")),
            )),
        }
    }

    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "notification received");
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);

        info!(method = %request.method, "request received");
        let response = match request.method.as_str() {
            "initialize" => Self::initialize(id, request.params.as_ref()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "prompts/list" => JsonRpcResponse::from_result(
                id,
                &ListPromptsResult {
                    prompts: self.handler.prompts(),
                },
            ),
            "prompts/get" => self.get_prompt(id, request.params).await,
            method => {
                warn!(method, "unknown method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(method))
            }
        };
        Some(response)
    }

    fn initialize(id: Value, params: Option<&Value>) -> JsonRpcResponse {
        let protocol_version = params
            .and_then(|params| params.get("protocolVersion"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);

        JsonRpcResponse::from_result(
            id,
            &InitializeResult {
                protocol_version: protocol_version.to_string(),
                capabilities: ServerCapabilities {
                    prompts: PromptsCapability::default(),
                },
                server_info: ServerInfo {
                    name: SERVER_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
        )
    }

    async fn get_prompt(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: GetPromptParams = match params.map(serde_json::from_value).transpose() {
            Ok(Some(params)) => params,
            Ok(None) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing prompt params"),
                );
            }
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid prompt params: {e}")),
                );
            }
        };

        match self.handler.get_prompt(&params.name).await {
            Some(result) => JsonRpcResponse::from_result(id, &result),
            None => JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown prompt: {}", params.name)),
            ),
        }
    }

    /// Serve newline-delimited JSON-RPC until `reader` reaches EOF.
    ///
    /// Messages are handled one at a time; each response is written as a
    /// single line and flushed.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }
            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_message(line).await,
                Err(e) => {
                    warn!(error = %e, "message is not valid UTF-8");
                    Some(JsonRpcResponse::error(
                        Value::Null,
                        JsonRpcError::parse_error(format!("Parse error: {e}")),
                    ))
                }
            };
            if let Some(response) = response {
                let mut payload = serde_json::to_vec(&response)?;
                payload.push(b'\n');
                writer.write_all(&payload).await?;
                writer.flush().await?;
            }
        }
        info!("input closed, shutting down");
        Ok(())
    }

    pub async fn serve_stdio(&self) -> Result<(), McpError> {
        info!(server = SERVER_NAME, "serving MCP over stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}
