pub mod cursor;
pub mod engine;
pub mod projection;
pub mod protocol;
