//! Session management for the General lingo.
//!
//! A [`Session`] owns one device and one dispatcher and feeds requests through
//! them one at a time. The dispatcher itself is stateless; the session only
//! observes the traffic to keep statistics and track how far the accessory
//! got through identification and authentication.

use std::time::Instant;

use super::device::GeneralDevice;
use super::dispatch::Dispatcher;
use super::message::{ProtocolMessage, Request};
use super::response::{Outbound, ResponseMessage};
use super::types::{DevAuthInfoStatus, DevAuthStatus, IdpsStatus};

/// Progress of the accessory through IDPS and device authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No IDPS started yet
    Initial,
    /// IDPS in progress
    Identifying,
    /// IDPS done, device authentication requested
    Authenticating,
    /// Device authentication passed
    Authenticated,
    /// Identification or authentication refused
    Rejected,
}

/// General lingo session
pub struct Session<D> {
    /// Session ID
    id: String,
    /// Observed handshake state
    state: SessionState,
    /// Device holding all protocol state
    device: D,
    /// Message router
    dispatcher: Dispatcher,
    /// Session start
    started: Instant,
    /// Requests handled
    requests_received: u64,
    /// Outbound messages produced
    messages_sent: u64,
    /// Requests that produced no response
    silent_requests: u64,
    /// Times IDPS was started
    idps_attempts: u64,
    /// Device authentication was requested from the accessory
    dev_auth_requested: bool,
}

impl<D: GeneralDevice> Session<D> {
    /// Create a session with the default dispatcher
    pub fn new(device: D) -> Self {
        Self::with_dispatcher(device, Dispatcher::default())
    }

    /// Create a session with a configured dispatcher
    pub fn with_dispatcher(device: D, dispatcher: Dispatcher) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            state: SessionState::Initial,
            device,
            dispatcher,
            started: Instant::now(),
            requests_received: 0,
            messages_sent: 0,
            silent_requests: 0,
            idps_attempts: 0,
            dev_auth_requested: false,
        }
    }

    /// Get session ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if device authentication passed
    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// Device backing this session
    pub fn device(&self) -> &D {
        &self.device
    }

    /// End the session and hand back the device
    pub fn into_device(self) -> D {
        self.device
    }

    /// Process one request and return the outbound messages in send order
    pub fn process(&mut self, request: &Request) -> Vec<Outbound> {
        let mut out = Vec::new();
        self.dispatcher.handle(request, &mut self.device, &mut out);

        self.requests_received += 1;
        self.messages_sent += out.len() as u64;
        if out.is_empty() {
            self.silent_requests += 1;
        }
        if matches!(request.message, ProtocolMessage::StartIDPS) {
            self.idps_attempts += 1;
            self.state = SessionState::Identifying;
        }
        for outbound in &out {
            self.observe(&outbound.message);
        }

        out
    }

    /// Track handshake progress from an outbound message
    fn observe(&mut self, message: &ResponseMessage) {
        let next = match message {
            ResponseMessage::IDPSStatus {
                status: IdpsStatus::WillNotAccept,
            } => SessionState::Rejected,
            ResponseMessage::GetDevAuthenticationInfo => {
                self.dev_auth_requested = true;
                SessionState::Authenticating
            },
            ResponseMessage::AckDevAuthenticationInfo { status }
                if *status != DevAuthInfoStatus::Supported =>
            {
                SessionState::Rejected
            },
            ResponseMessage::AckDevAuthenticationStatus { status } => match status {
                DevAuthStatus::Passed => SessionState::Authenticated,
                DevAuthStatus::Failed => SessionState::Rejected,
            },
            _ => return,
        };

        if next != self.state {
            tracing::info!("Session {} {:?} -> {:?}", self.id, self.state, next);
            self.state = next;
        }
    }

    /// Get session statistics
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            session_id: self.id.clone(),
            state: self.state,
            requests_received: self.requests_received,
            messages_sent: self.messages_sent,
            silent_requests: self.silent_requests,
            idps_attempts: self.idps_attempts,
            dev_auth_requested: self.dev_auth_requested,
            uptime_secs: self.started.elapsed().as_secs(),
        }
    }
}

/// Session statistics
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// Session ID
    pub session_id: String,
    /// Current state
    pub state: SessionState,
    /// Requests handled
    pub requests_received: u64,
    /// Outbound messages produced
    pub messages_sent: u64,
    /// Requests that produced no response
    pub silent_requests: u64,
    /// Times IDPS was started
    pub idps_attempts: u64,
    /// Whether `GetDevAuthenticationInfo` was sent
    pub dev_auth_requested: bool,
    /// Session uptime in seconds
    pub uptime_secs: u64,
}
