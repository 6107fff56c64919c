//! Record model
//!
//! Records travel in two shapes: the wire shape, where the status is a
//! boolean, and the display shape held by the table, where the status is one
//! of two named options.

mod machine;
mod status;
mod values;

pub use machine::{Machine, MachineWire, NewMachine, fields};
pub use status::Status;
pub use values::FormValues;
