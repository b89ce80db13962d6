pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod error;
pub mod fit;
pub mod frame;
pub mod mesh;
pub mod picture;
pub mod renderer;
pub mod scene;
pub mod texture;
pub mod types;
pub mod ui;
pub mod upload;

pub use error::{Result, ViewerError};
pub use fit::{fit, fit_image, ScaleResult, SourceImage, TargetRect};
