pub mod affordance;
pub mod controller;
pub mod machine;

pub use affordance::{AffordanceOverride, CursorStyle, InputAffordances};
pub use controller::ModeController;
pub use machine::{ModeEvent, ModeMachine, ModeState, ModeTransition};
