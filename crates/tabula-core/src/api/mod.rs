//! Typed endpoints on top of the transport

mod forms;
mod machines;

pub use forms::FormApi;
pub use machines::MachineApi;
