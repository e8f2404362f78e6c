//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements   | Connects to                     |
//! |----------------|--------------|---------------------------------|
//! | `config_file`  | ConfigPort   | JSON file on disk               |
//! | `dev_node`     | SoilPort     | external soil driver char node  |
//! | `log_sink`     | EventSink    | `log` facade                    |
//!
//! The in-process [`SoilDevice`](crate::device::SoilDevice) and the pump
//! drivers in [`drivers`](crate::drivers) implement their ports directly.

pub mod config_file;
pub mod dev_node;
pub mod log_sink;
