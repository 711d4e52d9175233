mod task;

pub use task::{Filter, Statistics, Task};
