//! Small pure helpers shared by the browser and the non-interactive
//! commands.

pub mod duration;
pub mod task_input;
