//! Shared test utilities for the studio orchestrators.
#![allow(dead_code)]

mod mock_gateway;
mod mock_host;

pub use mock_gateway::{MockGateway, MockReply, three_scene_storyboard};
pub use mock_host::{MockHost, MockSelection};

use std::sync::Arc;
use storyboard_studio::{PresentationController, StudioOptions};

/// Persona used by every test controller.
pub const CHAT_SYSTEM: &str = "You are a helpful creative assistant for a storyboard app.";

/// Controller wired to a mock gateway and host.
pub fn controller(
    gateway: Arc<MockGateway>,
    host: Option<Arc<MockHost>>,
) -> PresentationController<MockGateway, MockHost> {
    PresentationController::new(gateway, host, StudioOptions::new(CHAT_SYSTEM))
}
