//! Error types for the zoning client
//!
//! Provides structured error types for all components including the REST
//! transport, identifier codec, zoning repository, activation controller,
//! and the provisioning orchestrator.

use thiserror::Error;

/// Unified error type for the zoning client
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed: {oid} (status {status})")]
    Transport { oid: String, status: u16 },

    #[error("Response decode error for {oid}: {reason}")]
    Decode { oid: String, reason: String },

    // =========================================================================
    // Zoning Errors
    // =========================================================================
    #[error("Not found: {kind}/{name}")]
    NotFound { kind: String, name: String },

    #[error("Already exists: {kind}/{name}")]
    Conflict { kind: String, name: String },

    #[error("Invalid identifier: {reason}")]
    InvalidIdentifier { reason: String },

    #[error("Stale reference: {id}")]
    StaleReference { id: String },

    // =========================================================================
    // Orchestration Errors
    // =========================================================================
    #[error("Provisioning failed at {step} step: {source}")]
    Provision {
        step: ProvisionStep,
        #[source]
        source: Box<Error>,
    },
}

/// Logical step of a provisioning run, carried on orchestration failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionStep {
    /// Zone group creation in the config database
    Group,
    /// Zone creation for a host
    Zone,
    /// Host member addition
    HostMember,
    /// Subsystem member addition
    SubsystemMember,
    /// Zone group activation
    Activation,
}

impl std::fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProvisionStep::Group => write!(f, "group"),
            ProvisionStep::Zone => write!(f, "zone"),
            ProvisionStep::HostMember => write!(f, "host-member"),
            ProvisionStep::SubsystemMember => write!(f, "subsystem-member"),
            ProvisionStep::Activation => write!(f, "activation"),
        }
    }
}

impl Error {
    /// Wrap an error with the provisioning step it occurred in
    pub fn at_step(self, step: ProvisionStep) -> Self {
        Error::Provision {
            step,
            source: Box::new(self),
        }
    }

    /// Check if this error is transient (a later identical call may succeed)
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Http(_) | Error::Transport { .. } => true,
            Error::Provision { source, .. } => source.is_transient(),
            _ => false,
        }
    }

    /// The provisioning step this error occurred in, if any
    pub fn provision_step(&self) -> Option<ProvisionStep> {
        match self {
            Error::Provision { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Result type alias for the zoning client
pub type Result<T> = std::result::Result<T, Error>;
