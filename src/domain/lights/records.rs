//! Registry records for lights, groups, scenes and schedules.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DeviceId, GroupId, SceneId, ScheduleId};

use super::registry::RegistryRecord;

/// Color state of a light, as reported by the producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LightColor {
    /// Full color light in RGB space.
    Rgb { r: u8, g: u8, b: u8 },
    /// White light given as a color temperature in mireds.
    ColorTemperature { mireds: u16 },
}

impl LightColor {
    const COOLEST_MIREDS: u16 = 153;
    const WARMEST_MIREDS: u16 = 500;

    /// Returns a CSS color usable as a swatch background.
    pub fn to_css(&self) -> String {
        match *self {
            LightColor::Rgb { r, g, b } => format!("#{:02x}{:02x}{:02x}", r, g, b),
            LightColor::ColorTemperature { mireds } => {
                let clamped = mireds.clamp(Self::COOLEST_MIREDS, Self::WARMEST_MIREDS);
                let t = f64::from(clamped - Self::COOLEST_MIREDS)
                    / f64::from(Self::WARMEST_MIREDS - Self::COOLEST_MIREDS);
                let lerp = |cool: u8, warm: u8| -> u8 {
                    (f64::from(cool) + (f64::from(warm) - f64::from(cool)) * t).round() as u8
                };
                format!(
                    "#{:02x}{:02x}{:02x}",
                    lerp(201, 255),
                    lerp(226, 166),
                    lerp(255, 87)
                )
            }
        }
    }
}

/// A single dimmable light.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Light {
    pub id: DeviceId,
    pub name: String,
    #[serde(default)]
    pub on: bool,
    /// Raw brightness level, 0-255.
    #[serde(default)]
    pub brightness: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<LightColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Light {
    /// Creates a light that is off, at zero brightness, with no color.
    pub fn new(id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            on: false,
            brightness: 0,
            color: None,
            model: None,
        }
    }
}

impl RegistryRecord for Light {
    type Id = DeviceId;

    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A named set of lights switched together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub lights: Vec<DeviceId>,
    /// Whether at least one member is on, maintained by the producer.
    #[serde(default)]
    pub any_on: bool,
}

impl Group {
    pub fn new(id: GroupId, name: impl Into<String>, lights: Vec<DeviceId>) -> Self {
        Self {
            id,
            name: name.into(),
            lights,
            any_on: false,
        }
    }

    pub fn contains(&self, light: &DeviceId) -> bool {
        self.lights.contains(light)
    }
}

impl RegistryRecord for Group {
    type Id = GroupId;

    fn id(&self) -> &GroupId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A stored light preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub name: String,
    #[serde(default)]
    pub lights: Vec<DeviceId>,
}

impl RegistryRecord for Scene {
    type Id = SceneId;

    fn id(&self) -> &SceneId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A timed action configured on the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub name: String,
    /// Human readable trigger, e.g. "every day at 07:00".
    #[serde(default)]
    pub time: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl RegistryRecord for Schedule {
    type Id = ScheduleId;

    fn id(&self) -> &ScheduleId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
