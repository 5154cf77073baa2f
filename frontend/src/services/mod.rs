pub mod dom;
pub mod logging;
pub mod scheduler;
