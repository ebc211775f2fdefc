use dockscope_types::TargetIdentity;

/// Endpoint used when no agent address is configured
pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:8642";

/// Builds the WebSocket URLs exposed by a dockscope agent
#[derive(Clone, Debug)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Create endpoints rooted at the given base address
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// URL of the live log stream for one container
    pub fn container_logs(&self, target: &TargetIdentity) -> String {
        format!(
            "{}/servers/{}/containers/{}/logs/ws",
            self.base, target.server_id, target.container_id
        )
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}
