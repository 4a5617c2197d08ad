pub mod activation;
pub mod compose;
pub mod evaluate;
pub mod gadgets;
pub mod reversal;
pub mod threshold;
pub mod types;

pub use activation::{active_flags, flatten_modules, toggle, with_active_flags, ModuleInstance};
pub use compose::{compose_instability, compose_power, compose_resistance, stack_unit_multipliers};
pub use evaluate::{evaluate, evaluate_group};
pub use gadgets::{accumulate, accumulate_instability};
pub use reversal::{reversal_multiplier, reverse};
pub use threshold::required_power;
pub use types::*;
