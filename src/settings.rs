//! Tunable parameters and display preferences
//!
//! Persisted to LocalStorage on wasm; plain defaults elsewhere. Slider range
//! validation lives here so the kinematics model can stay total.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::DemoParams;

/// User-tunable parameters for the demos plus display preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Projectile launch angle (degrees, 10-80)
    pub angle_degrees: f32,
    /// Launch/track speed (units, 10-100)
    pub launch_speed: f32,
    /// Show the FPS counter in the HUD
    pub show_fps: bool,
    /// Skip decorative parallax layers (accessibility)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            angle_degrees: 45.0,
            launch_speed: 50.0,
            show_fps: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "motion_lab_settings";

    /// Clamp and set the launch angle
    pub fn set_angle(&mut self, degrees: f32) {
        self.angle_degrees = degrees.clamp(ANGLE_MIN_DEGREES, ANGLE_MAX_DEGREES);
    }

    /// Clamp and set the launch speed
    pub fn set_launch_speed(&mut self, speed: f32) {
        self.launch_speed = speed.clamp(LAUNCH_SPEED_MIN, LAUNCH_SPEED_MAX);
    }

    /// Parameters handed to the kinematics model
    pub fn demo_params(&self) -> DemoParams {
        DemoParams {
            angle_degrees: self.angle_degrees,
            speed: self.launch_speed,
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
