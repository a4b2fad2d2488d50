pub mod timer;
pub mod viewport;
