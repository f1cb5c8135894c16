pub mod conditions;
pub mod config;

pub use conditions::{Conditions, MoonPhase, Season, TimeOfDay};
pub use config::{
    AppConfig, DisplayConfig, GeneratorConfig, LocationConfig, PromptConfig, WeatherConfig,
};
