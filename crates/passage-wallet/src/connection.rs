//! Wallet connection provider
//!
//! Folds extension events into a [`WalletConnectionState`]. `is_correct_chain`
//! is derived after every event, never set directly.

use crate::events::WalletEvent;
use crate::state::WalletConnectionState;
use passage_core::{TargetChain, WalletConfig, WalletSnapshot, WalletSource};
use tracing::debug;

/// Wallet connection tracked against a target chain.
#[derive(Debug, Clone)]
pub struct WalletConnection {
    target: TargetChain,
    state: WalletConnectionState,
}

impl WalletConnection {
    /// Start disconnected, expecting `target`.
    pub fn new(target: TargetChain) -> Self {
        Self {
            target,
            state: WalletConnectionState::default(),
        }
    }

    /// Start disconnected with the configured target chain.
    pub fn from_config(config: &WalletConfig) -> Self {
        Self::new(config.target_chain())
    }

    /// Current state.
    pub fn state(&self) -> &WalletConnectionState {
        &self.state
    }

    /// Chain the wallet is expected to be on.
    pub fn target_chain(&self) -> &TargetChain {
        &self.target
    }

    /// Change the expected chain.
    pub fn set_target(&mut self, target: TargetChain) {
        self.target = target;
        self.refresh_chain_match();
    }

    /// Connected, on the wrong chain, and no switch pending.
    pub fn needs_switch(&self) -> bool {
        self.state.is_connected && !self.state.is_correct_chain && !self.state.is_switching
    }

    /// Apply one extension event.
    pub fn apply(&mut self, event: WalletEvent) {
        let kind = event.kind();
        let state = &mut self.state;
        match event {
            WalletEvent::Connected { address, chain_id } => {
                state.address = Some(address);
                state.is_connected = true;
                state.chain_id = Some(chain_id);
                state.last_error = None;
            }
            WalletEvent::AccountsChanged { accounts } => match accounts.into_iter().next() {
                None => *state = WalletConnectionState::default(),
                Some(active) if state.is_connected => state.address = Some(active),
                Some(_) => debug!("Ignoring account change while disconnected"),
            },
            WalletEvent::ChainChanged { chain_id } => {
                if state.is_connected {
                    state.chain_id = Some(chain_id);
                    state.is_switching = false;
                    state.last_error = None;
                }
            }
            WalletEvent::Disconnected => *state = WalletConnectionState::default(),
            WalletEvent::SwitchRequested => {
                if state.is_connected {
                    state.is_switching = true;
                    state.last_error = None;
                }
            }
            WalletEvent::SwitchCompleted { chain_id } => {
                state.is_switching = false;
                if state.is_connected {
                    state.chain_id = Some(chain_id);
                }
            }
            WalletEvent::SwitchFailed { reason } => {
                state.is_switching = false;
                state.last_error = Some(reason);
            }
        }
        self.refresh_chain_match();

        debug!(
            event = kind,
            connected = self.state.is_connected,
            correct_chain = self.state.is_correct_chain,
            switching = self.state.is_switching,
            "Wallet state updated"
        );
    }

    /// Apply a sequence of events in order.
    pub fn apply_all(&mut self, events: impl IntoIterator<Item = WalletEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    fn refresh_chain_match(&mut self) {
        let on_target = self
            .state
            .chain_id
            .is_some_and(|chain_id| self.target.matches(chain_id));
        self.state.is_correct_chain = self.state.is_connected && on_target;
    }
}

impl Default for WalletConnection {
    fn default() -> Self {
        Self::new(TargetChain::default())
    }
}

impl WalletSource for WalletConnection {
    fn snapshot(&self) -> WalletSnapshot {
        WalletSnapshot {
            address: self.state.address.clone(),
            is_connected: self.state.is_connected,
            is_correct_chain: self.state.is_correct_chain,
            is_switching: self.state.is_switching,
            target_chain_name: self.target.name.clone(),
        }
    }
}
