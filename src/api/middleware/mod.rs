//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. CORS: answers preflight requests
//! 2. Access logger: method, path, status, latency

pub mod access_log;
