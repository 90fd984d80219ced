//! # System Constants
//!
//! Protocol names and operational defaults shared across modules.

/// Interface implemented by Spring remoting invocation handlers
pub const SPRING_REMOTING_INTERFACE: &str = "org.springframework.remoting.rmi.RmiInvocationHandler";

/// Marker interface every remote proxy implements; never reported as the interface name
pub const REMOTE_MARKER_INTERFACE: &str = "java.rmi.Remote";

/// Printed between a map key and its value by the response visitor
pub const MAP_RELATION_MARKER: &str = "  --> ";

/// Prefix of environment variables that override configuration values
pub const ENV_PREFIX: &str = "RMG";

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_VAR: &str = "RMG_LOG";

/// Set to `json` for line-delimited JSON diagnostics
pub const LOG_FORMAT_ENV_VAR: &str = "RMG_LOG_FORMAT";

pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_THREADS: usize = 5;

/// Ports probed by `scan` when none are given
pub const DEFAULT_SCAN_PORTS: &[u16] = &[
    1090, 1098, 1099, 1100, 1101, 1199, 1299, 1999, 2010, 3000, 4444, 4445, 4446, 5000, 5001,
    7999, 8000, 8001, 8002, 8003, 9000, 9001, 9002, 9003, 9010, 9011, 9099, 9999, 10001, 10099,
];
