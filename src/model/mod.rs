pub mod participant;
pub mod step;
pub mod trace;
