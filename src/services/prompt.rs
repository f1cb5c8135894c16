//! Setting choice and prompt rendering.

use std::collections::BTreeMap;

use rand::seq::IteratorRandom;
use rand::Rng;
use tera::{Context, Tera};

use crate::error::AcquireError;
use crate::models::{Conditions, PromptConfig};

/// Builds generation prompts from a Tera template.
pub struct PromptBuilder {
    template: String,
    settings: BTreeMap<String, String>,
}

impl PromptBuilder {
    pub fn new(config: &PromptConfig) -> Self {
        Self {
            template: config.template.clone(),
            settings: config.settings.clone(),
        }
    }

    /// Pick a setting uniformly at random.
    ///
    /// Returns `(key, description)`, or `None` if no settings are configured.
    pub fn choose_setting<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(&str, &str)> {
        self.settings
            .iter()
            .choose(rng)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render the prompt for the given conditions.
    ///
    /// The template sees `setting` (the description), `setting_key`,
    /// `season`, `time_of_day`, `weather` and `moon_phase`.
    pub fn render(&self, conditions: &Conditions) -> Result<String, AcquireError> {
        let mut context = Context::new();
        context.insert("setting", &conditions.setting_description);
        context.insert("setting_key", &conditions.setting);
        context.insert("season", &conditions.season);
        context.insert("time_of_day", &conditions.time_of_day);
        context.insert("weather", &conditions.weather);
        context.insert("moon_phase", &conditions.moon_phase);

        Ok(Tera::one_off(&self.template, &context, false)?)
    }
}
