use std::{
    fs,
    path::{Path, PathBuf},
};

use log::warn;
use mazecore::{AlgorithmKind, Role};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};

use crate::method::MethodKind;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

/// 8-bit RGB colour, written as `(r, g, b)` in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const GREEN: Color = Color(0, 255, 0);
    pub const RED: Color = Color(255, 0, 0);
    pub const ORANGE: Color = Color(255, 165, 0);

    pub fn to_array(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color(r, g, b)
    }
}

/// Geometry and colours of maze images.
///
/// A `w` x `h` maze is drawn as an image `w * path_width + (w + 1) * wall_width` pixels wide
/// (height likewise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageStyle {
    pub path_width: u32,
    pub wall_width: u32,
    pub wall: Color,
    pub background: Color,
    pub start: Color,
    pub end: Color,
    pub path: Color,
}

impl Default for ImageStyle {
    fn default() -> Self {
        ImageStyle {
            path_width: 3,
            wall_width: 1,
            wall: Color::WHITE,
            background: Color::BLACK,
            start: Color::GREEN,
            end: Color::RED,
            path: Color::ORANGE,
        }
    }
}

impl ImageStyle {
    /// Widest path or wall, in pixels.
    pub const MAX_LINE_WIDTH: u32 = 1024;

    pub fn path_width(mut self, value: u32) -> Self {
        self.path_width = value;
        self
    }

    pub fn wall_width(mut self, value: u32) -> Self {
        self.wall_width = value;
        self
    }

    /// Checks that the style can be drawn and read back: widths within
    /// `1..=MAX_LINE_WIDTH` and distinct colours.
    pub fn validate(&self) -> Result<(), &'static str> {
        let widths = 1..=Self::MAX_LINE_WIDTH;
        if !widths.contains(&self.path_width) || !widths.contains(&self.wall_width) {
            return Err("path and wall width must be between 1 and 1024 pixels");
        }

        let colors = [self.wall, self.background, self.start, self.end, self.path];
        for (i, a) in colors.iter().enumerate() {
            if colors[i + 1..].contains(a) {
                return Err("wall, background, start, end and path colours must all differ");
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load/save settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub image: Option<ImageStyle>,
    #[serde(default)]
    pub default_generator: Option<AlgorithmKind>,
    #[serde(default)]
    pub default_solver: Option<AlgorithmKind>,
    #[serde(default)]
    pub default_method: Option<MethodKind>,
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mazelib")
            .join("settings.ron")
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    /// Reads settings from `path`. A missing file is created with the default settings.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let settings_string = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Self::reset_config(path)?;
                DEFAULT_SETTINGS.to_string()
            }
            Err(err) => return Err(err.into()),
        };

        Self::options()
            .from_str(&settings_string)
            .map_err(|source| SettingsError::Parse {
                path: path.to_owned(),
                source,
            })
    }

    /// Overwrites `path` with the default settings.
    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }

    pub fn set_image_style(mut self, value: ImageStyle) -> Self {
        self.image = Some(value);
        self
    }

    pub fn get_image_style(&self) -> ImageStyle {
        self.image.unwrap_or_default()
    }

    pub fn set_default_generator(mut self, value: AlgorithmKind) -> Self {
        self.default_generator = Some(value);
        self
    }

    pub fn get_default_generator(&self) -> AlgorithmKind {
        match self.default_generator {
            Some(kind) if kind.role() == Role::Generator => kind,
            Some(kind) => {
                warn!("{kind} is not a generator, using {}", AlgorithmKind::Kruskal);
                AlgorithmKind::Kruskal
            }
            None => AlgorithmKind::Kruskal,
        }
    }

    pub fn set_default_solver(mut self, value: AlgorithmKind) -> Self {
        self.default_solver = Some(value);
        self
    }

    pub fn get_default_solver(&self) -> AlgorithmKind {
        const FALLBACK: AlgorithmKind = AlgorithmKind::BreadthFirstSearch;

        match self.default_solver {
            Some(kind) if kind.role() == Role::Solver => kind,
            Some(kind) => {
                warn!("{kind} is not a solver, using {FALLBACK}");
                FALLBACK
            }
            None => FALLBACK,
        }
    }

    pub fn set_default_method(mut self, value: MethodKind) -> Self {
        self.default_method = Some(value);
        self
    }

    pub fn get_default_method(&self) -> MethodKind {
        self.default_method.unwrap_or_default()
    }

    pub fn set_log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }
}
