use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use viper_common::GameError;
use viper_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use viper_common::game::{GameSettings, PolygonBoard};
use viper_common::geometry::{Point, Polygon};

const CONFIG_FILE_NAME: &str = "viper_config.yaml";

pub fn default_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: &Path,
) -> ConfigManager<FileContentConfigProvider, ViperConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum BoardConfig {
    Rectangle {
        origin: [f64; 2],
        width: f64,
        height: f64,
    },
    Polygon {
        vertices: Vec<[f64; 2]>,
        #[serde(default)]
        center: Option<[f64; 2]>,
    },
}

impl BoardConfig {
    pub fn build(&self) -> Result<PolygonBoard, GameError> {
        match self {
            BoardConfig::Rectangle {
                origin,
                width,
                height,
            } => PolygonBoard::rectangle(Point::new(origin[0], origin[1]), *width, *height),
            BoardConfig::Polygon { vertices, center } => {
                let polygon =
                    Polygon::new(vertices.iter().map(|[x, y]| Point::new(*x, *y)).collect())?;
                Ok(match center {
                    Some([x, y]) => PolygonBoard::with_center(polygon, Point::new(*x, *y)),
                    None => PolygonBoard::new(polygon),
                })
            }
        }
    }
}

impl Validate for BoardConfig {
    fn validate(&self) -> Result<(), String> {
        self.build().map(|_| ()).map_err(|e| e.to_string())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct ViperConfig {
    pub game: GameSettings,
    pub board: BoardConfig,
}

impl Validate for ViperConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.board.validate()?;
        Ok(())
    }
}

impl Default for ViperConfig {
    fn default() -> Self {
        Self {
            game: GameSettings::default(),
            board: BoardConfig::Rectangle {
                origin: [0.0, 0.0],
                width: 500.0,
                height: 500.0,
            },
        }
    }
}
