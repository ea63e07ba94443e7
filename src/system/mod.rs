//! # System Interaction Layer
//!
//! The boundary between application logic and the operating system.
//!
//! - **`executor`**: a bounded engine for spawning external toolchain
//!   processes. It enforces wall-clock timeouts and output-size caps,
//!   captures both streams, and always passes arguments as an explicit
//!   vector — no command interpreter is ever involved.

pub mod executor;
