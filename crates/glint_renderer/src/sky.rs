//! Background radiance for rays that leave the scene.

use crate::{Color, Ray};
use glint_math::{unit_vector, Vec3};

/// Directional sun added on top of the gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sun {
    /// Unit direction toward the sun
    pub direction: Vec3,
    /// Exponent of the falloff; larger means a smaller disk
    pub sharpness: f32,
    pub color: Color,
}

impl Sun {
    pub fn new(direction: Vec3, sharpness: f32, color: Color) -> Self {
        Self {
            direction: unit_vector(direction),
            sharpness,
            color,
        }
    }
}

/// Vertical gradient from `horizon` (straight down) to `zenith` (straight up),
/// with an optional sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sky {
    pub horizon: Color,
    pub zenith: Color,
    pub sun: Option<Sun>,
}

impl Sky {
    pub fn new(horizon: Color, zenith: Color) -> Self {
        Self {
            horizon,
            zenith,
            sun: None,
        }
    }

    pub fn with_sun(mut self, sun: Sun) -> Self {
        self.sun = Some(sun);
        self
    }

    /// Radiance arriving along `ray` from infinitely far away.
    pub fn color(&self, ray: &Ray) -> Color {
        let unit_direction = unit_vector(ray.direction());
        let a = 0.5 * (unit_direction.y + 1.0);
        let gradient = (1.0 - a) * self.horizon + a * self.zenith;

        match &self.sun {
            Some(sun) => {
                let alignment = unit_direction.dot(sun.direction).max(0.0);
                gradient + alignment.powf(sun.sharpness) * sun.color
            }
            None => gradient,
        }
    }
}

impl Default for Sky {
    /// White near the ground fading to light blue overhead.
    fn default() -> Self {
        Self::new(Color::new(1.0, 1.0, 1.0), Color::new(0.5, 0.7, 1.0))
    }
}
