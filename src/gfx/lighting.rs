//! Lights declared in the `<lights>` block
//!
//! The host exposes a fixed number of hardware light slots. Lights beyond
//! that count are still validated but never bound.
//!
//! The enabled flag is the only piece of scene state the UI may change while
//! frames are being drawn. [`LightSwitches`] holds it behind a lock; the
//! frame step takes one [`LightSwitches::snapshot`] and uses only that copy
//! for the whole frame.

use cgmath::{Point3, Vector3, Vector4};
use std::sync::{Arc, PoisonError, RwLock};

/// Number of light slots a host renderer provides
pub const MAX_LIGHT_SLOTS: usize = 8;

/// Omni or spot specific light data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Omni,
    Spot {
        /// Cut-off angle in degrees
        cutoff: f32,
        exponent: f32,
        target: Point3<f32>,
    },
}

/// A validated `<omni>` or `<spot>` declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub id: String,
    pub enabled: bool,
    /// Homogeneous position, w = 0 for directional lights
    pub location: Vector4<f32>,
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    pub kind: LightKind,
}

impl Light {
    /// Direction from the light towards its target, for spot lights
    pub fn spot_direction(&self) -> Option<Vector3<f32>> {
        match self.kind {
            LightKind::Spot { target, .. } => {
                let position = Point3::new(self.location.x, self.location.y, self.location.z);
                Some(target - position)
            }
            LightKind::Omni => None,
        }
    }
}

/// Enabled flags of the bound light slots, shared between UI and renderer
#[derive(Debug, Clone, Default)]
pub struct LightSwitches {
    flags: Arc<RwLock<Vec<bool>>>,
}

impl LightSwitches {
    /// Seeds the switches from the declared `enabled` attributes
    pub fn new(initial: Vec<bool>) -> Self {
        Self {
            flags: Arc::new(RwLock::new(initial)),
        }
    }

    /// Number of switchable slots
    pub fn len(&self) -> usize {
        self.flags.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sets one slot; returns false when the slot does not exist
    pub fn set(&self, slot: usize, enabled: bool) -> bool {
        let mut flags = self.flags.write().unwrap_or_else(PoisonError::into_inner);
        match flags.get_mut(slot) {
            Some(flag) => {
                *flag = enabled;
                true
            }
            None => false,
        }
    }

    pub fn toggle(&self, slot: usize) -> Option<bool> {
        let mut flags = self.flags.write().unwrap_or_else(PoisonError::into_inner);
        let flag = flags.get_mut(slot)?;
        *flag = !*flag;
        Some(*flag)
    }

    /// Consistent copy of every flag, taken once per frame
    pub fn snapshot(&self) -> Vec<bool> {
        self.flags.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_detached_from_later_toggles() {
        let switches = LightSwitches::new(vec![true, false]);
        let frame = switches.snapshot();

        assert_eq!(switches.toggle(0), Some(false));
        assert!(switches.set(1, true));

        assert_eq!(frame, vec![true, false]);
        assert_eq!(switches.snapshot(), vec![false, true]);
    }

    #[test]
    fn test_unknown_slot_is_rejected() {
        let switches = LightSwitches::new(vec![true]);
        assert!(!switches.set(3, false));
        assert_eq!(switches.toggle(3), None);
        assert_eq!(switches.len(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let ui_side = LightSwitches::new(vec![true]);
        let render_side = ui_side.clone();
        ui_side.set(0, false);
        assert_eq!(render_side.snapshot(), vec![false]);
    }

    #[test]
    fn test_spot_direction() {
        let spot = Light {
            id: "spot".to_string(),
            enabled: true,
            location: Vector4::new(0.0, 5.0, 0.0, 1.0),
            ambient: [0.0; 4],
            diffuse: [1.0; 4],
            specular: [1.0; 4],
            kind: LightKind::Spot {
                cutoff: 30.0,
                exponent: 1.0,
                target: Point3::new(0.0, 0.0, 0.0),
            },
        };
        assert_eq!(spot.spot_direction(), Some(Vector3::new(0.0, -5.0, 0.0)));
    }
}
