use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

use crate::coverage::DirectionSpec;
use crate::marking::Sampling;
use crate::task::TaskKind;

/// Built-in defaults for the mowing parameters
pub mod defaults {
    pub const WIDTH: f64 = 2.0;
    pub const HEADLAND_PASSES: usize = 2;
    pub const BOUSTROPHEDON: bool = true;
    pub const FIELD_LENGTH: f64 = 105.0;
    pub const FIELD_WIDTH: f64 = 68.0;
}

/// Sweep direction relative to the longest boundary edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DirectionMode {
    #[default]
    Parallel,
    Perpendicular,
}

/// Pick the sweep direction; an explicit angle wins over a vertex pair,
/// which wins over the longest-edge mode
pub fn resolve_direction(
    mode: DirectionMode,
    angle: Option<f64>,
    vertex_pair: Option<[usize; 2]>,
    diagonal: bool,
) -> DirectionSpec {
    if let Some(angle) = angle {
        return DirectionSpec::ExplicitAngle(angle);
    }
    match (vertex_pair, diagonal) {
        (Some([a, b]), true) => DirectionSpec::Diagonal(a, b),
        (Some([a, b]), false) => DirectionSpec::VertexPair(a, b),
        (None, _) => match mode {
            DirectionMode::Parallel => DirectionSpec::LongestEdgeParallel,
            DirectionMode::Perpendicular => DirectionSpec::LongestEdgePerpendicular,
        },
    }
}

/// Direction settings from one configuration layer (CLI or file)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectionFlags {
    pub mode: Option<DirectionMode>,
    pub angle: Option<f64>,
    pub vertex_pair: Option<[usize; 2]>,
    pub diagonal: bool,
}

impl DirectionFlags {
    pub fn is_set(&self) -> bool {
        self.mode.is_some() || self.angle.is_some() || self.vertex_pair.is_some()
    }

    pub fn resolve(&self) -> DirectionSpec {
        resolve_direction(
            self.mode.unwrap_or_default(),
            self.angle,
            self.vertex_pair,
            self.diagonal,
        )
    }
}

/// The first layer that sets any direction flag decides the direction;
/// flags are never mixed across layers
pub fn layered_direction(layers: &[DirectionFlags]) -> DirectionSpec {
    layers
        .iter()
        .find(|layer| layer.is_set())
        .map(DirectionFlags::resolve)
        .unwrap_or_default()
}

fn default_width() -> f64 {
    defaults::WIDTH
}
fn default_headland_passes() -> usize {
    defaults::HEADLAND_PASSES
}
fn default_boustrophedon() -> bool {
    defaults::BOUSTROPHEDON
}
fn default_field_length() -> f64 {
    defaults::FIELD_LENGTH
}
fn default_field_width() -> f64 {
    defaults::FIELD_WIDTH
}

/// Settings read from `fieldpath.toml`
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    /// Text file with one "lat, lon" pair per line
    #[serde(default)]
    pub coords: Option<PathBuf>,
    #[serde(default)]
    pub task: Option<TaskKind>,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_headland_passes")]
    pub headland_passes: usize,
    #[serde(default)]
    pub direction: Option<DirectionMode>,
    /// Explicit sweep angle in degrees
    #[serde(default)]
    pub angle: Option<f64>,
    /// Sweep along the segment between two boundary vertices
    #[serde(default)]
    pub vertex_pair: Option<[usize; 2]>,
    /// Treat `vertex_pair` as a field diagonal
    #[serde(default)]
    pub diagonal: bool,
    #[serde(default = "default_boustrophedon")]
    pub boustrophedon: bool,
    #[serde(default = "default_field_length")]
    pub field_length: f64,
    #[serde(default = "default_field_width")]
    pub field_width: f64,
    #[serde(default)]
    pub validate_fifa: bool,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub sampling: Option<Sampling>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            coords: None,
            task: None,
            width: default_width(),
            headland_passes: default_headland_passes(),
            direction: None,
            angle: None,
            vertex_pair: None,
            diagonal: false,
            boustrophedon: default_boustrophedon(),
            field_length: default_field_length(),
            field_width: default_field_width(),
            validate_fifa: false,
            output: None,
            verbose: false,
            sampling: None,
        }
    }
}

/// Outcome of searching the config locations
#[derive(Debug, Default)]
pub struct Discovery {
    pub config: Option<FileConfig>,
    pub path: Option<PathBuf>,
    /// Files that exist but failed to parse, with the parse error
    pub skipped: Vec<(PathBuf, String)>,
}

impl FileConfig {
    /// Search the default locations
    pub fn load() -> Discovery {
        Self::load_from(&get_config_paths())
    }

    /// First file in `paths` that parses; malformed files are skipped
    pub fn load_from(paths: &[PathBuf]) -> Discovery {
        let mut discovery = Discovery::default();

        for path in paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        discovery.config = Some(config);
                        discovery.path = Some(path.clone());
                        break;
                    }
                    Err(e) => discovery.skipped.push((path.clone(), e.to_string())),
                }
            }
        }
        discovery
    }

    pub fn direction_flags(&self) -> DirectionFlags {
        DirectionFlags {
            mode: self.direction,
            angle: self.angle,
            vertex_pair: self.vertex_pair,
            diagonal: self.diagonal,
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("fieldpath.toml"));
    paths.push(PathBuf::from(".fieldpath.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("fieldpath").join("config.toml"));
        paths.push(config_dir.join("fieldpath.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".fieldpath.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.width, 2.0);
        assert_eq!(config.headland_passes, 2);
        assert!(config.boustrophedon);
        assert_eq!(config.field_length, 105.0);
        assert!(config.direction.is_none());
        assert!(config.sampling.is_none());
    }

    #[test]
    fn test_full_config() {
        let text = r#"
coords = "field.txt"
task = "pitch-marking"
width = 1.5
headland_passes = 3
angle = 30.0
vertex_pair = [0, 2]
boustrophedon = false
validate_fifa = true

[sampling]
circle_step_deg = 2.5
"#;
        let config: FileConfig = toml::from_str(text).unwrap();
        assert_eq!(config.coords, Some(PathBuf::from("field.txt")));
        assert_eq!(config.task, Some(TaskKind::PitchMarking));
        assert_eq!(config.width, 1.5);
        assert_eq!(config.headland_passes, 3);
        assert_eq!(config.angle, Some(30.0));
        assert_eq!(config.vertex_pair, Some([0, 2]));
        assert!(!config.boustrophedon);
        assert!(config.validate_fifa);

        let sampling = config.sampling.unwrap();
        assert_eq!(sampling.circle_step_deg, 2.5);
        assert_eq!(sampling.corner_arc_step_deg, 2.0);
    }

    #[test]
    fn test_direction_mode() {
        let config: FileConfig = toml::from_str("direction = \"perpendicular\"").unwrap();
        assert_eq!(config.direction, Some(DirectionMode::Perpendicular));
    }

    #[test]
    fn test_resolve_direction_precedence() {
        assert_eq!(
            resolve_direction(DirectionMode::Parallel, Some(12.0), Some([0, 1]), false),
            DirectionSpec::ExplicitAngle(12.0)
        );
        assert_eq!(
            resolve_direction(DirectionMode::Perpendicular, None, Some([0, 2]), true),
            DirectionSpec::Diagonal(0, 2)
        );
        assert_eq!(
            resolve_direction(DirectionMode::Perpendicular, None, Some([1, 3]), false),
            DirectionSpec::VertexPair(1, 3)
        );
        assert_eq!(
            resolve_direction(DirectionMode::Perpendicular, None, None, true),
            DirectionSpec::LongestEdgePerpendicular
        );
        assert_eq!(
            resolve_direction(DirectionMode::default(), None, None, false),
            DirectionSpec::LongestEdgeParallel
        );
    }

    #[test]
    fn test_config_paths() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("fieldpath.toml"));
    }

    #[test]
    fn test_load_from_skips_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("fieldpath.toml");
        let malformed = dir.path().join(".fieldpath.toml");
        let valid = dir.path().join("config.toml");
        let later = dir.path().join("home.toml");
        std::fs::write(&malformed, "width = \"oops").unwrap();
        std::fs::write(&valid, "width = 4.0\nverbose = true\n").unwrap();
        std::fs::write(&later, "width = 9.0\n").unwrap();

        let found = FileConfig::load_from(&[missing, malformed.clone(), valid.clone(), later]);
        let config = found.config.unwrap();
        assert_eq!(config.width, 4.0);
        assert!(config.verbose);
        assert_eq!(found.path, Some(valid));
        assert_eq!(found.skipped.len(), 1);
        assert_eq!(found.skipped[0].0, malformed);
        assert!(!found.skipped[0].1.is_empty());
    }

    #[test]
    fn test_load_from_nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        let malformed = dir.path().join("fieldpath.toml");
        std::fs::write(&malformed, "headland_passes = -1\n").unwrap();

        let found = FileConfig::load_from(&[dir.path().join("absent.toml"), malformed]);
        assert!(found.config.is_none());
        assert!(found.path.is_none());
        assert_eq!(found.skipped.len(), 1);
    }

    #[test]
    fn test_cli_direction_replaces_file_direction() {
        let file: FileConfig = toml::from_str("angle = 30.0\nvertex_pair = [1, 3]\n").unwrap();
        let cli = DirectionFlags {
            vertex_pair: Some([0, 2]),
            ..DirectionFlags::default()
        };
        assert_eq!(
            layered_direction(&[cli, file.direction_flags()]),
            DirectionSpec::VertexPair(0, 2)
        );

        let cli = DirectionFlags {
            mode: Some(DirectionMode::Perpendicular),
            ..DirectionFlags::default()
        };
        assert_eq!(
            layered_direction(&[cli, file.direction_flags()]),
            DirectionSpec::LongestEdgePerpendicular
        );
    }

    #[test]
    fn test_file_direction_used_without_cli_flags() {
        let file: FileConfig = toml::from_str("angle = 30.0\n").unwrap();
        assert_eq!(
            layered_direction(&[DirectionFlags::default(), file.direction_flags()]),
            DirectionSpec::ExplicitAngle(30.0)
        );

        let file: FileConfig = toml::from_str("vertex_pair = [0, 2]\ndiagonal = true\n").unwrap();
        assert_eq!(
            layered_direction(&[DirectionFlags::default(), file.direction_flags()]),
            DirectionSpec::Diagonal(0, 2)
        );

        assert_eq!(
            layered_direction(&[DirectionFlags::default(), FileConfig::default().direction_flags()]),
            DirectionSpec::LongestEdgeParallel
        );
    }
}
