use std::fmt;

use super::request::{RequestId, RequestKind};

// === ConfigError ===

/// Errors related to loading, validating, or persisting the shell configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the config file.
    IoError(String),
    /// Failed to serialize or deserialize the config file.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
    /// The destination URL is not something the browser surface can load.
    InvalidUrl(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::SerializationError(msg) => {
                write!(f, "Config serialization error: {}", msg)
            }
            ConfigError::InvalidKey(key) => write!(f, "Invalid config key: {}", key),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
            ConfigError::InvalidUrl(url) => write!(f, "Invalid destination URL: {}", url),
        }
    }
}

impl std::error::Error for ConfigError {}

// === BridgeError ===

/// Errors raised while pairing engine requests with OS results.
#[derive(Debug, PartialEq)]
pub enum BridgeError {
    /// A request of this kind is already waiting for the OS.
    SlotOccupied(RequestKind),
    /// Nothing of this kind is pending.
    NoPendingRequest(RequestKind),
    /// An OS result arrived for a request that is no longer pending.
    StaleResult(RequestKind, RequestId),
    /// The OS returned a payload the bridge cannot hand to the engine.
    MalformedResult(String),
    /// A page bridge message could not be decoded.
    MalformedMessage(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::SlotOccupied(kind) => {
                write!(f, "A {} request is already pending", kind)
            }
            BridgeError::NoPendingRequest(kind) => {
                write!(f, "No {} request is pending", kind)
            }
            BridgeError::StaleResult(kind, id) => {
                write!(f, "Stale {} result for request {}", kind, id)
            }
            BridgeError::MalformedResult(msg) => write!(f, "Malformed OS result: {}", msg),
            BridgeError::MalformedMessage(msg) => {
                write!(f, "Malformed bridge message: {}", msg)
            }
        }
    }
}

impl std::error::Error for BridgeError {}

// === HostError ===

/// Errors reported by the host platform (browser engine, windowing, OS activities).
#[derive(Debug)]
pub enum HostError {
    /// The browser surface has not been built or was already released.
    SurfaceUnavailable,
    /// The host failed to construct the screen's views.
    BuildFailed(String),
    /// No activity/application can handle the request.
    ActivityNotFound(String),
    /// The embedded engine rejected an operation.
    EngineError(String),
    /// The link contains characters that must never reach an OS launcher.
    UnsafeUrl(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::SurfaceUnavailable => write!(f, "Browser surface unavailable"),
            HostError::BuildFailed(msg) => write!(f, "Failed to build screen: {}", msg),
            HostError::ActivityNotFound(msg) => write!(f, "No activity found: {}", msg),
            HostError::EngineError(msg) => write!(f, "Browser engine error: {}", msg),
            HostError::UnsafeUrl(url) => write!(f, "Refusing to launch unsafe link: {}", url),
        }
    }
}

impl std::error::Error for HostError {}

// === ShellError ===

/// Top-level error for screen controller operations.
#[derive(Debug)]
pub enum ShellError {
    Config(ConfigError),
    Bridge(BridgeError),
    Host(HostError),
    /// The screen was torn down; the event arrived too late.
    Destroyed,
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Config(e) => write!(f, "{}", e),
            ShellError::Bridge(e) => write!(f, "{}", e),
            ShellError::Host(e) => write!(f, "{}", e),
            ShellError::Destroyed => write!(f, "Screen already destroyed"),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Config(e) => Some(e),
            ShellError::Bridge(e) => Some(e),
            ShellError::Host(e) => Some(e),
            ShellError::Destroyed => None,
        }
    }
}

impl From<ConfigError> for ShellError {
    fn from(e: ConfigError) -> Self {
        ShellError::Config(e)
    }
}

impl From<BridgeError> for ShellError {
    fn from(e: BridgeError) -> Self {
        ShellError::Bridge(e)
    }
}

impl From<HostError> for ShellError {
    fn from(e: HostError) -> Self {
        ShellError::Host(e)
    }
}
