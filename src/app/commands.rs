//! Inbound commands to the application service.
//!
//! Actions requested by an operator or a test harness that the
//! [`BotService`](super::service::BotService) interprets and acts upon.

use crate::config::BotConfig;
use crate::fsm::Mode;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Switch to a specific mode immediately, bypassing timers and the button.
    ForceMode(Mode),

    /// Hot-reload configuration.  Rejected if it fails validation.
    UpdateConfig(BotConfig),
}
