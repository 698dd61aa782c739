use std::fmt;

use boid_core::{FlockParams, LaneBias, Vector2D};
use serde::{Deserialize, Serialize};

/// Reasons a settings document cannot drive a simulation
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// A numeric field is NaN or infinite
    NonFinite { field: &'static str },
    /// The world needs a positive width and height
    EmptyWorld { width: f32, height: f32 },
    /// The document is not valid settings JSON
    Json(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NonFinite { field } => write!(f, "{} must be a finite number", field),
            SettingsError::EmptyWorld { width, height } => {
                write!(f, "world must have positive extents, got {}x{}", width, height)
            }
            SettingsError::Json(message) => write!(f, "invalid settings JSON: {}", message),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Serializable form of [`FlockParams`], as stored in settings files and sent by hosts.
///
/// Every field is optional in JSON; missing ones take the simulation defaults.
/// A missing cursor sits in the centre of the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlockSettings {
    pub agent_count: usize,
    pub visual_range: f32,
    pub protected_range: f32,
    pub centering_factor: f32,
    pub avoid_factor: f32,
    pub matching_factor: f32,
    pub turn_factor: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub follow_cursor: bool,
    pub cursor_bias: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor_x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor_y: Option<f32>,
    pub width: f32,
    pub height: f32,
    pub lane_max_bias: f32,
    pub lane_bias_increment: f32,
    /// Split the flock into two opposing lanes after each reset
    pub lanes: bool,
}

impl Default for FlockSettings {
    fn default() -> Self {
        let mut settings = FlockSettings::from(&FlockParams::default());
        settings.cursor_x = None;
        settings.cursor_y = None;
        settings
    }
}

impl From<&FlockParams> for FlockSettings {
    fn from(params: &FlockParams) -> Self {
        Self {
            agent_count: params.agent_count,
            visual_range: params.visual_range,
            protected_range: params.protected_range,
            centering_factor: params.centering_factor,
            avoid_factor: params.avoid_factor,
            matching_factor: params.matching_factor,
            turn_factor: params.turn_factor,
            min_speed: params.min_speed,
            max_speed: params.max_speed,
            follow_cursor: params.follow_cursor,
            cursor_bias: params.cursor_bias,
            cursor_x: Some(params.cursor.x),
            cursor_y: Some(params.cursor.y),
            width: params.width,
            height: params.height,
            lane_max_bias: params.lane_bias.max_bias,
            lane_bias_increment: params.lane_bias.bias_increment,
            lanes: false,
        }
    }
}

impl FlockSettings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: FlockSettings =
            serde_json::from_str(json).map_err(|e| SettingsError::Json(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_pretty(&self) -> String {
        // Plain numbers and bools always serialize
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values that would poison the simulation with NaN or leave no world.
    ///
    /// Negative ranges and factors pass: they only make the motion degenerate.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let numbers = [
            ("visualRange", self.visual_range),
            ("protectedRange", self.protected_range),
            ("centeringFactor", self.centering_factor),
            ("avoidFactor", self.avoid_factor),
            ("matchingFactor", self.matching_factor),
            ("turnFactor", self.turn_factor),
            ("minSpeed", self.min_speed),
            ("maxSpeed", self.max_speed),
            ("cursorBias", self.cursor_bias),
            ("cursorX", self.cursor_x.unwrap_or(0.0)),
            ("cursorY", self.cursor_y.unwrap_or(0.0)),
            ("width", self.width),
            ("height", self.height),
            ("laneMaxBias", self.lane_max_bias),
            ("laneBiasIncrement", self.lane_bias_increment),
        ];

        if let Some((field, _)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            return Err(SettingsError::NonFinite { field: *field });
        }

        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(SettingsError::EmptyWorld {
                width: self.width,
                height: self.height,
            });
        }

        Ok(())
    }

    /// Validated conversion into the parameters a step reads
    pub fn to_params(&self) -> Result<FlockParams, SettingsError> {
        self.validate()?;

        let mut params = FlockParams::new(self.width, self.height);
        params.agent_count = self.agent_count;
        params.visual_range = self.visual_range;
        params.protected_range = self.protected_range;
        params.centering_factor = self.centering_factor;
        params.avoid_factor = self.avoid_factor;
        params.matching_factor = self.matching_factor;
        params.turn_factor = self.turn_factor;
        params.min_speed = self.min_speed;
        params.max_speed = self.max_speed;
        params.follow_cursor = self.follow_cursor;
        params.cursor_bias = self.cursor_bias;
        params.cursor = Vector2D::new(
            self.cursor_x.unwrap_or(self.width / 2.0),
            self.cursor_y.unwrap_or(self.height / 2.0),
        );
        params.lane_bias = LaneBias {
            max_bias: self.lane_max_bias,
            bias_increment: self.lane_bias_increment,
        };

        Ok(params)
    }
}
