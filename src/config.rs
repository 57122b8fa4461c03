/// Process-start settings.  Nothing here changes once the frame loop runs.

use std::str::FromStr;
use std::time::Duration;

use crate::effect::DEFAULT_LIFETIME;
use crate::error::ConfigError;
use crate::geometry::{Field, Rect};
use crate::render::Rgb;

pub const ENV_WIDTH: &str = "BLAST_FIELD_WIDTH";
pub const ENV_HEIGHT: &str = "BLAST_FIELD_HEIGHT";
pub const ENV_HAZARDS: &str = "BLAST_FIELD_HAZARDS";
pub const ENV_FPS: &str = "BLAST_FIELD_FPS";
pub const ENV_SEED: &str = "BLAST_FIELD_SEED";

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub hazard_count: usize,
    /// Target frame rate; each frame is budgeted `1 / fps` seconds.
    pub fps: u32,
    /// Fixed RNG seed for hazard placement.  `None` draws from entropy.
    pub seed: Option<u64>,
    /// Center of the actor at game start.
    pub actor_start: (i32, i32),
    pub actor_size: (i32, i32),
    pub hazard_radius: i32,
    pub hazard_colour: Rgb,
    /// Unrotated beam image size (pointing right).
    pub beam_size: (i32, i32),
    pub explosion_size: (i32, i32),
    /// Explosion lifetime in frames.
    pub effect_lifetime: u32,
    pub game_over_hold: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 1100,
            height: 650,
            hazard_count: 5,
            fps: 50,
            seed: None,
            actor_start: (300, 200),
            actor_size: (90, 90),
            hazard_radius: 10,
            hazard_colour: Rgb::RED,
            beam_size: (40, 10),
            explosion_size: (60, 60),
            effect_lifetime: DEFAULT_LIFETIME,
            game_over_hold: Duration::from_secs(5),
        }
    }
}

impl GameConfig {
    /// Defaults, overridden by `BLAST_FIELD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] but reading from an arbitrary source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = GameConfig::default();

        if let Some(w) = parse_var::<u16>(&lookup, ENV_WIDTH)? {
            config.width = i32::from(w);
        }
        if let Some(h) = parse_var::<u16>(&lookup, ENV_HEIGHT)? {
            config.height = i32::from(h);
        }
        if let Some(n) = parse_var(&lookup, ENV_HAZARDS)? {
            config.hazard_count = n;
        }
        if let Some(fps) = parse_var(&lookup, ENV_FPS)? {
            config.fps = fps;
        }
        if let Some(seed) = parse_var(&lookup, ENV_SEED)? {
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "field must have a positive size, got {}x{}",
                self.width, self.height
            )));
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be at least 1".into()));
        }
        let (cx, cy) = self.actor_start;
        let (aw, ah) = self.actor_size;
        if !self.field().contains(&Rect::centered_at(cx, cy, aw, ah)) {
            return Err(ConfigError::Invalid(format!(
                "actor start ({cx}, {cy}) does not fit a {}x{} field",
                self.width, self.height
            )));
        }
        let diameter = self.hazard_radius * 2;
        if self.hazard_radius <= 0 || diameter > self.width || diameter > self.height {
            return Err(ConfigError::Invalid(format!(
                "hazard radius {} does not fit the field",
                self.hazard_radius
            )));
        }
        Ok(())
    }

    pub fn field(&self) -> Field {
        Field::new(self.width, self.height)
    }

    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidSetting { key, value: raw }),
    }
}
