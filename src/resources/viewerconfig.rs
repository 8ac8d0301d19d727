//! Viewer configuration resource.
//!
//! Manages viewer settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//!
//! [playback]
//! wait_between_frames = 1.0
//! time_scale = 1.0
//! particles_file = results.txt
//! densities_file = densities_result.txt
//!
//! [particles]
//! scale_factor = 100.0
//! marker_radius = 0.5
//!
//! [densities]
//! regions_per_dim = 10
//! box_width = 100.0
//!
//! [source]
//! resolver = local
//! root = assets
//! cache_dir = cache
//! base_url = http://localhost:8000/assets
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::resources::regiongrid::RegionGrid;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_WAIT_BETWEEN_FRAMES: f32 = 1.0;
const DEFAULT_PARTICLES_FILE: &str = "results.txt";
const DEFAULT_DENSITIES_FILE: &str = "densities_result.txt";
const DEFAULT_SCALE_FACTOR: f32 = 100.0;
const DEFAULT_MARKER_RADIUS: f32 = 0.5;
const DEFAULT_REGIONS_PER_DIM: usize = 10;
/// Largest accepted grid size; 100³ is already a million region markers.
const MAX_REGIONS_PER_DIM: usize = 100;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_BOX_WIDTH: f32 = 100.0;
const DEFAULT_ROOT: &str = "assets";
const DEFAULT_CACHE_DIR: &str = "cache";
const DEFAULT_BASE_URL: &str = "http://localhost:8000/assets";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Which [`ContentResolver`](crate::content::ContentResolver) to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolverKind {
    /// Read files straight from `root`.
    #[default]
    Local,
    /// Serve from `cache_dir`, fetching from `base_url` when missing.
    Fetch,
}

impl ResolverKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Some(ResolverKind::Local),
            "fetch" => Some(ResolverKind::Fetch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolverKind::Local => "local",
            ResolverKind::Fetch => "fetch",
        }
    }
}

/// Viewer configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct ViewerConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Seconds between two data frames.
    pub wait_between_frames: f32,
    /// Playback speed multiplier applied to the world clock.
    pub time_scale: f32,
    /// Logical name of the particle results file.
    pub particles_file: String,
    /// Logical name of the density results file.
    pub densities_file: String,
    /// Divisor applied to particle positions.
    pub scale_factor: f32,
    /// Unscaled particle marker radius; drawn as `marker_radius / scale_factor`.
    pub marker_radius: f32,
    /// Region grid cells per axis.
    pub regions_per_dim: usize,
    /// Edge length of the simulation box.
    pub box_width: f32,
    /// Resolver selection.
    pub resolver: ResolverKind,
    /// Root directory for the local resolver.
    pub root: PathBuf,
    /// Cache directory for the fetch resolver.
    pub cache_dir: PathBuf,
    /// Base URL or bundle directory for the fetch resolver.
    pub base_url: String,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            wait_between_frames: DEFAULT_WAIT_BETWEEN_FRAMES,
            time_scale: DEFAULT_TIME_SCALE,
            particles_file: DEFAULT_PARTICLES_FILE.to_string(),
            densities_file: DEFAULT_DENSITIES_FILE.to_string(),
            scale_factor: DEFAULT_SCALE_FACTOR,
            marker_radius: DEFAULT_MARKER_RADIUS,
            regions_per_dim: DEFAULT_REGIONS_PER_DIM,
            box_width: DEFAULT_BOX_WIDTH,
            resolver: ResolverKind::Local,
            root: PathBuf::from(DEFAULT_ROOT),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            base_url: DEFAULT_BASE_URL.to_string(),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }

        // [playback] section
        if let Some(wait) = config.getfloat("playback", "wait_between_frames").ok().flatten() {
            if wait >= 0.0 {
                self.wait_between_frames = wait as f32;
            } else {
                warn!("Ignoring negative wait_between_frames {}", wait);
            }
        }
        if let Some(speed) = config.getfloat("playback", "time_scale").ok().flatten() {
            if speed > 0.0 {
                self.time_scale = speed as f32;
            } else {
                warn!("Ignoring non-positive time_scale {}", speed);
            }
        }
        if let Some(name) = config.get("playback", "particles_file") {
            self.particles_file = name;
        }
        if let Some(name) = config.get("playback", "densities_file") {
            self.densities_file = name;
        }

        // [particles] section
        if let Some(scale) = config.getfloat("particles", "scale_factor").ok().flatten() {
            if scale != 0.0 {
                self.scale_factor = scale as f32;
            } else {
                warn!("Ignoring zero scale_factor");
            }
        }
        if let Some(radius) = config.getfloat("particles", "marker_radius").ok().flatten() {
            self.marker_radius = radius as f32;
        }

        // [densities] section
        if let Some(n) = config.getuint("densities", "regions_per_dim").ok().flatten() {
            if n == 0 {
                warn!("Ignoring zero regions_per_dim");
            } else if n > MAX_REGIONS_PER_DIM as u64 {
                warn!(
                    "regions_per_dim {} is too large, using {}",
                    n, MAX_REGIONS_PER_DIM
                );
                self.regions_per_dim = MAX_REGIONS_PER_DIM;
            } else {
                self.regions_per_dim = n as usize;
            }
        }
        if let Some(width) = config.getfloat("densities", "box_width").ok().flatten() {
            if width > 0.0 {
                self.box_width = width as f32;
            } else {
                warn!("Ignoring non-positive box_width {}", width);
            }
        }

        // [source] section
        if let Some(kind) = config.get("source", "resolver") {
            match ResolverKind::parse(&kind) {
                Some(kind) => self.resolver = kind,
                None => warn!("Unknown resolver '{}', keeping {}", kind, self.resolver.as_str()),
            }
        }
        if let Some(root) = config.get("source", "root") {
            self.root = PathBuf::from(root);
        }
        if let Some(cache_dir) = config.get("source", "cache_dir") {
            self.cache_dir = PathBuf::from(cache_dir);
        }
        if let Some(base_url) = config.get("source", "base_url") {
            self.base_url = base_url;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, wait={}s, scale={}, grid={}^3 over {}, resolver={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.wait_between_frames,
            self.scale_factor,
            self.regions_per_dim,
            self.box_width,
            self.resolver.as_str()
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [playback] section
        config.set(
            "playback",
            "wait_between_frames",
            Some(self.wait_between_frames.to_string()),
        );
        config.set("playback", "time_scale", Some(self.time_scale.to_string()));
        config.set("playback", "particles_file", Some(self.particles_file.clone()));
        config.set("playback", "densities_file", Some(self.densities_file.clone()));

        // [particles] section
        config.set("particles", "scale_factor", Some(self.scale_factor.to_string()));
        config.set("particles", "marker_radius", Some(self.marker_radius.to_string()));

        // [densities] section
        config.set(
            "densities",
            "regions_per_dim",
            Some(self.regions_per_dim.to_string()),
        );
        config.set("densities", "box_width", Some(self.box_width.to_string()));

        // [source] section
        config.set("source", "resolver", Some(self.resolver.as_str().to_string()));
        config.set("source", "root", Some(self.root.display().to_string()));
        config.set("source", "cache_dir", Some(self.cache_dir.display().to_string()));
        config.set("source", "base_url", Some(self.base_url.clone()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Region grid described by the `[densities]` section.
    pub fn region_grid(&self) -> RegionGrid {
        RegionGrid::new(self.regions_per_dim, self.box_width)
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scene_settings() {
        let config = ViewerConfig::new();
        assert_eq!(config.wait_between_frames, 1.0);
        assert_eq!(config.scale_factor, 100.0);
        assert_eq!(config.regions_per_dim, 10);
        assert_eq!(config.box_width, 100.0);
        assert_eq!(config.particles_file, "results.txt");
        assert_eq!(config.densities_file, "densities_result.txt");
        assert_eq!(config.resolver, ResolverKind::Local);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut config = ViewerConfig::new();
        config
            .load_from_str("[playback]\nwait_between_frames = 0.25\n\n[source]\nresolver = fetch\n")
            .unwrap();
        assert_eq!(config.wait_between_frames, 0.25);
        assert_eq!(config.resolver, ResolverKind::Fetch);
        assert_eq!(config.window_size(), (1280, 720));
        assert_eq!(config.scale_factor, 100.0);
    }

    #[test]
    fn invalid_values_are_ignored() {
        let mut config = ViewerConfig::new();
        config
            .load_from_str(
                "[particles]\nscale_factor = 0\n[densities]\nregions_per_dim = 0\n[source]\nresolver = ftp\n",
            )
            .unwrap();
        assert_eq!(config.scale_factor, 100.0);
        assert_eq!(config.regions_per_dim, 10);
        assert_eq!(config.resolver, ResolverKind::Local);
    }

    #[test]
    fn oversized_grid_is_capped() {
        let mut config = ViewerConfig::new();
        config
            .load_from_str("[densities]\nregions_per_dim = 3000000\n")
            .unwrap();
        assert_eq!(config.regions_per_dim, MAX_REGIONS_PER_DIM);
        assert_eq!(config.region_grid().cell_count(), 1_000_000);
    }

    #[test]
    fn time_scale_is_read_and_validated() {
        let mut config = ViewerConfig::new();
        config.load_from_str("[playback]\ntime_scale = 2.5\n").unwrap();
        assert_eq!(config.time_scale, 2.5);
        config.load_from_str("[playback]\ntime_scale = 0\n").unwrap();
        assert_eq!(config.time_scale, 2.5);
    }

    #[test]
    fn region_grid_follows_densities_section() {
        let mut config = ViewerConfig::new();
        config
            .load_from_str("[densities]\nregions_per_dim = 4\nbox_width = 8\n")
            .unwrap();
        assert_eq!(config.region_grid(), RegionGrid::new(4, 8.0));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = std::env::temp_dir().join(format!("simviewer-config-{}.ini", std::process::id()));
        let mut config = ViewerConfig::with_path(&path);
        config.wait_between_frames = 0.5;
        config.time_scale = 4.0;
        config.resolver = ResolverKind::Fetch;
        config.densities_file = "d.txt".into();
        config.save_to_file().unwrap();

        let mut loaded = ViewerConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.wait_between_frames, 0.5);
        assert_eq!(loaded.time_scale, 4.0);
        assert_eq!(loaded.resolver, ResolverKind::Fetch);
        assert_eq!(loaded.densities_file, "d.txt");

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut config = ViewerConfig::with_path("/definitely/not/here.ini");
        assert!(config.load_from_file().is_err());
    }
}
