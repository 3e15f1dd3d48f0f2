pub mod facade;
pub mod options;
pub mod settings;
