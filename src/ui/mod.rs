pub mod app;
pub mod diagram;
pub mod json_tree;
pub mod left_panel;
pub mod right_panel;
pub mod settings;
pub mod settings_io;
