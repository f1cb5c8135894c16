pub mod acquire;
pub mod generator;
pub mod image_cache;
pub mod prompt;
pub mod sky;
pub mod weather;

pub use acquire::{Acquired, ImageAcquirer};
pub use generator::ImageGenerator;
pub use image_cache::{slugify, ImageCache};
pub use prompt::PromptBuilder;
pub use weather::WeatherClient;
