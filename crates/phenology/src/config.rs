//! `phenology.yaml`: sweep range, cache location, solver and view settings.
//!
//! Every section is optional. A missing file yields the defaults, which
//! sweep `125..=140` in steps of 1 through `solvedbowrapper` in Octave and
//! cache the result in `arrival_times.json` in the working directory.

use std::path::{Path, PathBuf};

use phenology_core::cache::{CacheFile, DEFAULT_CACHE_FILE};
use phenology_core::solver::{
    CommandSolver, DEFAULT_FUNCTION, DEFAULT_PROGRAM, OctaveSolver, Solver,
};
use phenology_core::{ConfigError, SweepCache, SweepConfig};
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "phenology.yaml";

#[derive(Debug)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(msg) => write!(f, "IO error: {}", msg),
            SettingsError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Which solver backend to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    #[default]
    Octave,
    Command,
}

/// Uses flat optional fields rather than a tagged enum to keep the YAML simple
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub kind: SolverKind,
    /// Executable to run (`octave-cli` for Octave when unset)
    pub program: Option<String>,
    /// Octave wrapper function name
    pub function: Option<String>,
    /// Directory added to the Octave path and used as its working directory
    pub search_path: Option<PathBuf>,
    /// Leading arguments for a command solver; `u_q` is appended last
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            x_range: (130.0, 180.0),
            y_range: (110.0, 180.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sweep: SweepConfig,
    pub cache_path: PathBuf,
    pub solver: SolverSettings,
    pub view: ViewSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sweep: SweepConfig::default(),
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            solver: SolverSettings::default(),
            view: ViewSettings::default(),
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub cache_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> Result<Self, SettingsError> {
        serde_saphyr::from_str(yaml).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, SettingsError> {
        serde_saphyr::to_string(self).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Load settings from `path`, or from `phenology.yaml` if it exists.
    ///
    /// An explicitly named file must exist; the implicit one may not.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !implicit.exists() {
                    tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                implicit
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            SettingsError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let settings = Self::from_yaml(&content)?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(min) = overrides.min {
            self.sweep.min = min;
        }
        if let Some(max) = overrides.max {
            self.sweep.max = max;
        }
        if let Some(step) = overrides.step {
            self.sweep.step = step;
        }
        if let Some(path) = &overrides.cache_path {
            self.cache_path = path.clone();
        }
    }

    /// The configured range, validated
    pub fn sweep_config(&self) -> Result<SweepConfig, ConfigError> {
        self.sweep.validate()?;
        Ok(self.sweep)
    }

    pub fn sweep_cache(&self, force: bool) -> Result<SweepCache, ConfigError> {
        Ok(
            SweepCache::new(self.sweep_config()?, CacheFile::new(&self.cache_path))
                .force_recompute(force),
        )
    }

    pub fn build_solver(&self) -> Box<dyn Solver> {
        let solver = &self.solver;
        match solver.kind {
            SolverKind::Octave => {
                let search_path = solver
                    .search_path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from("."));
                Box::new(
                    OctaveSolver::new(search_path)
                        .program(solver.program.as_deref().unwrap_or(DEFAULT_PROGRAM))
                        .function(solver.function.as_deref().unwrap_or(DEFAULT_FUNCTION)),
                )
            }
            SolverKind::Command => Box::new(CommandSolver::new(
                solver.program.clone().unwrap_or_default(),
                solver.args.clone(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::from_yaml("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.sweep.point_count(), 16);
        assert_eq!(settings.cache_path, PathBuf::from("arrival_times.json"));
        assert_eq!(settings.solver.kind, SolverKind::Octave);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let yaml = r#"
sweep:
  max: 145
solver:
  kind: command
  program: ./fake-solver
  args: ["--json"]
view:
  y_range: [100, 200]
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.sweep.min, 125.0);
        assert_eq!(settings.sweep.max, 145.0);
        assert_eq!(settings.sweep.step, 1.0);
        assert_eq!(settings.solver.kind, SolverKind::Command);
        assert_eq!(settings.solver.program.as_deref(), Some("./fake-solver"));
        assert_eq!(settings.solver.args, vec!["--json".to_string()]);
        assert_eq!(settings.view.x_range, (130.0, 180.0));
        assert_eq!(settings.view.y_range, (100.0, 200.0));
    }

    #[test]
    fn test_overrides_win() {
        let mut settings = Settings::default();
        settings.apply(&Overrides {
            min: Some(126.0),
            step: Some(0.5),
            cache_path: Some(PathBuf::from("other.json")),
            ..Default::default()
        });
        assert_eq!(settings.sweep, SweepConfig::new(126.0, 140.0, 0.5).unwrap());
        assert_eq!(settings.cache_path, PathBuf::from("other.json"));
    }

    #[test]
    fn test_invalid_range_rejected() {
        let mut settings = Settings::default();
        settings.apply(&Overrides {
            max: Some(100.0),
            ..Default::default()
        });
        assert!(matches!(
            settings.sweep_config(),
            Err(ConfigError::InvertedRange { .. })
        ));
        assert!(settings.sweep_cache(false).is_err());
    }

    #[test]
    fn test_unknown_solver_kind_fails() {
        assert!(matches!(
            Settings::from_yaml("solver:\n  kind: matlab\n"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut settings = Settings::default();
        settings.solver.search_path = Some(PathBuf::from("model"));
        let yaml = settings.to_yaml().unwrap();
        assert_eq!(Settings::from_yaml(&yaml).unwrap(), settings);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(matches!(
            Settings::load(Some(&missing)),
            Err(SettingsError::Io(_))
        ));
    }
}
