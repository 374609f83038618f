use std::path::Path;

use crate::config::LoaderConfig;
use crate::gfx::{
    camera::ViewCamera,
    lighting::LightSwitches,
    scene::{display_scene, Scene, SceneRenderer},
};
use crate::loader::{self, LoadError, LoadReport};

/// Host-facing scene lifecycle
///
/// Owns the currently published scene and the state the UI may change while
/// frames are drawn: light switches, the material index and the active
/// camera. A reload builds the new scene aside and swaps it in only once it
/// loaded completely.
pub struct SceneApp {
    config: LoaderConfig,
    scene: Option<Scene>,
    loaded_ok: Option<bool>,
    last_error: Option<String>,
    warnings: Vec<String>,
    light_switches: LightSwitches,
    material_index: usize,
    active_view: Option<String>,
    aspect: f32,
}

impl Default for SceneApp {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl SceneApp {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            scene: None,
            loaded_ok: None,
            last_error: None,
            warnings: Vec::new(),
            light_switches: LightSwitches::default(),
            material_index: 0,
            active_view: None,
            aspect: 1.0,
        }
    }

    /// Called once the document text is available
    pub fn on_ready(&mut self, document: &str) -> bool {
        log::info!("XML Loading finished.");
        let result = loader::parse_document(document, &self.config);
        self.publish(result)
    }

    /// Called when the document could not be obtained or parsed
    pub fn on_error(&mut self, message: &str) {
        log::error!("XML Loading Error: {message}");
        self.scene = None;
        self.loaded_ok = Some(false);
        self.last_error = Some(message.to_string());
        self.warnings.clear();
        self.light_switches = LightSwitches::default();
    }

    /// Reads and loads a document from disk
    pub fn load_file(&mut self, path: &Path) -> bool {
        log::info!("Loading scene {}", path.display());
        let result = loader::load_file(path, &self.config);
        self.publish(result)
    }

    fn publish(&mut self, result: Result<LoadReport, LoadError>) -> bool {
        match result {
            Ok(report) => {
                let scene = report.scene;
                self.light_switches = LightSwitches::new(scene.initial_light_flags(self.config.light_slots));
                self.active_view = Some(scene.default_view_id().to_string());
                self.material_index = 0;
                self.warnings = report.warnings;
                self.last_error = None;
                self.scene = Some(scene);
                self.loaded_ok = Some(true);
                true
            }
            Err(err) => {
                self.on_error(&err.to_string());
                false
            }
        }
    }

    /// `None` until a load finished, then whether it succeeded
    pub fn loaded_ok(&self) -> Option<bool> {
        self.loaded_ok
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Handle the UI uses to toggle lights
    pub fn light_switches(&self) -> LightSwitches {
        self.light_switches.clone()
    }

    pub fn material_index(&self) -> usize {
        self.material_index
    }

    /// Advances every component to its next material
    pub fn cycle_materials(&mut self) -> usize {
        self.material_index = self.material_index.wrapping_add(1);
        self.material_index
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Switches the active camera; false when no such view exists
    pub fn select_camera(&mut self, view_id: &str) -> bool {
        let known = self.scene.as_ref().is_some_and(|scene| scene.views.contains(view_id));
        if known {
            self.active_view = Some(view_id.to_string());
        } else {
            log::warn!("Unknown view '{view_id}'");
        }
        known
    }

    pub fn active_camera(&self) -> Option<ViewCamera> {
        let scene = self.scene.as_ref()?;
        scene.camera(self.active_view.as_deref()?, self.aspect)
    }

    /// Pushes the scene-wide settings that do not change between frames
    pub fn init_scene<R: SceneRenderer + ?Sized>(&self, renderer: &mut R) -> bool {
        let Some(scene) = self.scene.as_ref() else {
            return false;
        };
        renderer.set_global_ambient(scene.globals.ambient);
        renderer.set_background(scene.globals.background);
        true
    }

    /// Sets camera and lights, then draws the scene.
    ///
    /// Light switches are read once here; the whole frame uses that copy.
    pub fn render_frame<R: SceneRenderer + ?Sized>(&self, renderer: &mut R) -> bool {
        let Some(scene) = self.scene.as_ref() else {
            return false;
        };

        let switches = self.light_switches.snapshot();
        renderer.load_identity();
        if let Some(camera) = self.active_camera() {
            renderer.set_camera(&camera);
        }
        for (slot, light) in scene.bound_lights(self.config.light_slots) {
            let enabled = switches.get(slot).copied().unwrap_or(light.enabled);
            renderer.set_light(slot, light, enabled);
        }

        display_scene(scene, renderer, self.material_index);
        true
    }

    /// Draws the scene graph alone, for hosts that set camera and lights
    /// themselves
    pub fn display_scene<R: SceneRenderer + ?Sized>(&self, renderer: &mut R) {
        if let Some(scene) = self.scene.as_ref() {
            display_scene(scene, renderer, self.material_index);
        }
    }
}
