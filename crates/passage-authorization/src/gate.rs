//! Route gate
//!
//! Wraps the decision procedure with what a router needs: a loading state
//! while upstream work is in flight, a redirect target on denial, and a
//! route table deciding which paths are guarded at all.
//!
//! # Usage
//!
//! ```rust,ignore
//! let gate = RouteGate::from_config(&config);
//! match gate.navigate(&RoutePath::new("/generate"), &session_store, &wallet) {
//!     RouteOutcome::Loading => { /* spinner */ }
//!     RouteOutcome::Render { auth_method } => { /* render page */ }
//!     RouteOutcome::Redirect(redirect) => { /* go to redirect.to, keep redirect.from */ }
//! }
//! ```

use crate::decision::{AuthorizationDecision, PendingState, RouteOutcome};
use crate::inputs::GateInputs;
use crate::routes::{RouteProtection, RouteTable};
use crate::rules;
use passage_core::{PassageConfig, RoutePath, SessionSource, WalletSource};
use tracing::debug;

/// Authorization gate for navigable routes.
#[derive(Debug, Clone)]
pub struct RouteGate {
    home: RoutePath,
    routes: RouteTable,
}

impl RouteGate {
    /// Gate redirecting denials to `home`, with an empty route table.
    pub fn new(home: RoutePath) -> Self {
        Self {
            home,
            routes: RouteTable::new(),
        }
    }

    /// Gate built from `[gate]` and `[[routes]]` configuration.
    pub fn from_config(config: &PassageConfig) -> Self {
        Self {
            home: config.gate.home(),
            routes: RouteTable::from_rules(&config.routes, config.gate.require_correct_chain),
        }
    }

    /// Replace the route table.
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Redirect target for denials.
    pub fn home(&self) -> &RoutePath {
        &self.home
    }

    /// Route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decide on already-captured inputs.
    pub fn evaluate(&self, inputs: &GateInputs) -> AuthorizationDecision {
        rules::evaluate(inputs)
    }

    /// Capture both sources and decide.
    pub fn check<S, W>(
        &self,
        session: &S,
        wallet: &W,
        require_correct_chain: bool,
    ) -> AuthorizationDecision
    where
        S: SessionSource + ?Sized,
        W: WalletSource + ?Sized,
    {
        self.evaluate(&GateInputs::from_sources(
            session,
            wallet,
            require_correct_chain,
        ))
    }

    /// Outcome for a protected route given captured inputs.
    ///
    /// While anything upstream is pending the decision tree is not evaluated.
    pub fn protect(
        &self,
        from: &RoutePath,
        inputs: &GateInputs,
        pending: PendingState,
    ) -> RouteOutcome {
        if pending.is_pending() {
            debug!(route = %from, ?pending, "Route gate waiting on upstream state");
            return RouteOutcome::Loading;
        }

        let decision = self.evaluate(inputs);
        match decision.redirect(self.home.clone(), from.clone()) {
            Some(redirect) => RouteOutcome::Redirect(redirect),
            None => RouteOutcome::Render {
                auth_method: decision.auth_method,
            },
        }
    }

    /// Outcome for a protected route, reading both sources.
    pub fn guard<S, W>(
        &self,
        from: &RoutePath,
        session: &S,
        wallet: &W,
        require_correct_chain: bool,
    ) -> RouteOutcome
    where
        S: SessionSource + ?Sized,
        W: WalletSource + ?Sized,
    {
        let snapshot = wallet.snapshot();
        let pending = PendingState {
            is_authenticating: session.is_authenticating(),
            is_initializing: session.is_initializing(),
            is_switching: snapshot.is_switching,
        };
        let inputs = GateInputs::from_sources(session, &snapshot, require_correct_chain);
        self.protect(from, &inputs, pending)
    }

    /// Outcome for navigating to `path`, consulting the route table.
    pub fn navigate<S, W>(&self, path: &RoutePath, session: &S, wallet: &W) -> RouteOutcome
    where
        S: SessionSource + ?Sized,
        W: WalletSource + ?Sized,
    {
        match self.routes.protection_for(path) {
            RouteProtection::Public => RouteOutcome::Render { auth_method: None },
            RouteProtection::Protected {
                require_correct_chain,
            } => self.guard(path, session, wallet, require_correct_chain),
        }
    }
}

impl Default for RouteGate {
    fn default() -> Self {
        Self::new(RoutePath::home())
    }
}
