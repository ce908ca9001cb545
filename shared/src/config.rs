//! Board configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::DrawMode;
use crate::Size;

pub const DEFAULT_WIDTH: f64 = 560.0;
pub const DEFAULT_HEIGHT: f64 = 360.0;
pub const DEFAULT_STROKE_COLOR: &str = "black";
pub const DEFAULT_LINE_WIDTH: f64 = 1.0;
pub const MAX_COLOR_LEN: usize = 32;
/// Backing stores are whole pixels, so anything under one pixel truncates
/// to an empty canvas.
pub const MIN_SURFACE_PX: f64 = 1.0;

/// What a pointer leaving the surface (or a cancelled touch) does to an
/// in-progress drag.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeavePolicy {
    /// Treat it as a release: clamp and commit.
    #[default]
    Commit,
    /// Drop the drag without committing.
    Discard,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub line_width: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid surface size: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },

    #[error("invalid line width: {0}")]
    InvalidLineWidth(f64),

    #[error("stroke color must not be empty")]
    EmptyStrokeColor,

    #[error("stroke color too long: {len} bytes (max {max})")]
    StrokeColorTooLong { len: usize, max: usize },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    pub width: f64,
    pub height: f64,
    pub stroke_color: String,
    pub line_width: f64,
    pub leave_policy: LeavePolicy,
    pub initial_mode: DrawMode,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            line_width: DEFAULT_LINE_WIDTH,
            leave_policy: LeavePolicy::default(),
            initial_mode: DrawMode::default(),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_size(self.size())?;
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ConfigError::InvalidLineWidth(self.line_width));
        }
        if self.stroke_color.trim().is_empty() {
            return Err(ConfigError::EmptyStrokeColor);
        }
        if self.stroke_color.len() > MAX_COLOR_LEN {
            return Err(ConfigError::StrokeColorTooLong {
                len: self.stroke_color.len(),
                max: MAX_COLOR_LEN,
            });
        }
        Ok(())
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.stroke_color.clone(),
            line_width: self.line_width,
        }
    }
}

pub(crate) fn validate_size(size: Size) -> Result<(), ConfigError> {
    let valid = |value: f64| value.is_finite() && value >= MIN_SURFACE_PX;
    if valid(size.width) && valid(size.height) {
        Ok(())
    } else {
        Err(ConfigError::InvalidSize {
            width: size.width,
            height: size.height,
        })
    }
}
