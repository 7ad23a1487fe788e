mod image;
mod text;

use std::{fmt, fs, path::Path, str::FromStr};

use mazecore::{Maze, MazeError, MazeStatus};
use serde::{Deserialize, Serialize};

use crate::settings::ImageStyle;

pub use self::image::ImageMethod;
pub use text::TextMethod;

#[derive(thiserror::Error, Debug)]
pub enum MethodError {
    #[error("Failed to read/write maze file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse maze text: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to encode/decode maze image: {0}")]
    Image(#[from] ::image::ImageError),
    #[error("Invalid image style: {0}")]
    Style(&'static str),
    #[error("Malformed maze: {0}")]
    Malformed(String),
    #[error(transparent)]
    Maze(#[from] MazeError),
}

/// Converts mazes from and to an external representation.
pub trait Method {
    fn kind(&self) -> MethodKind;

    /// Only generated or solved mazes can be serialized.
    fn serialize(&self, maze: &Maze) -> Result<Vec<u8>, MethodError>;

    fn deserialize(&self, bytes: &[u8]) -> Result<Maze, MethodError>;

    fn save(&self, maze: &Maze, path: &Path) -> Result<(), MethodError> {
        let bytes = self.serialize(maze)?;
        fs::write(path, bytes)?;
        log::info!("saved maze to {}", path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Maze, MethodError> {
        let maze = self.deserialize(&fs::read(path)?)?;
        log::info!("loaded maze from {}", path.display());
        Ok(maze)
    }
}

pub(crate) fn ensure_generated(maze: &Maze) -> Result<(), MethodError> {
    if maze.status() == MazeStatus::Ungenerated {
        return Err(MazeError::NotGenerated.into());
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MethodKind {
    #[default]
    Text,
    Image,
}

impl MethodKind {
    /// `.png` files are images, anything else with an extension is text.
    pub fn from_path(path: &Path) -> Option<MethodKind> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("png") {
            Some(MethodKind::Image)
        } else {
            Some(MethodKind::Text)
        }
    }

    pub fn create(self, style: ImageStyle) -> Box<dyn Method> {
        match self {
            MethodKind::Text => Box::new(TextMethod::new(style)),
            MethodKind::Image => Box::new(ImageMethod::new(style)),
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodKind::Text => write!(f, "text"),
            MethodKind::Image => write!(f, "image"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown method: {0}, expected text or image")]
pub struct UnknownMethod(pub String);

impl FromStr for MethodKind {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "json" => Ok(MethodKind::Text),
            "image" | "img" | "png" => Ok(MethodKind::Image),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use mazecore::{Algorithm, AlgorithmKind};

    use super::*;

    #[test]
    fn kind_from_path() {
        assert_eq!(
            MethodKind::from_path(&PathBuf::from("maze.PNG")),
            Some(MethodKind::Image)
        );
        assert_eq!(
            MethodKind::from_path(&PathBuf::from("out/maze.json")),
            Some(MethodKind::Text)
        );
        assert_eq!(MethodKind::from_path(&PathBuf::from("maze")), None);
    }

    #[test]
    fn kind_from_name() {
        assert_eq!("Image".parse(), Ok(MethodKind::Image));
        assert_eq!("text".parse(), Ok(MethodKind::Text));
        assert!("bmp".parse::<MethodKind>().is_err());
    }

    #[test]
    fn ungenerated_mazes_are_rejected() {
        let maze = Maze::new(3, 3).unwrap();
        for kind in [MethodKind::Text, MethodKind::Image] {
            let method = kind.create(ImageStyle::default());
            assert!(matches!(
                method.serialize(&maze),
                Err(MethodError::Maze(MazeError::NotGenerated))
            ));
        }
    }

    #[test]
    fn save_and_load_through_files() {
        let dir = tempfile::tempdir().unwrap();

        let mut maze = Maze::new(6, 5).unwrap();
        maze.generate(&mut Algorithm::new(AlgorithmKind::Kruskal, Some(3)))
            .unwrap();
        maze.solve(&mut Algorithm::new(AlgorithmKind::Tremaux, None))
            .unwrap();

        for (kind, name) in [(MethodKind::Text, "maze.json"), (MethodKind::Image, "maze.png")] {
            let path = dir.path().join(name);
            let method = kind.create(ImageStyle::default());
            method.save(&maze, &path).unwrap();

            let loaded = method.load(&path).unwrap();
            assert_eq!(loaded.graph(), maze.graph(), "{kind}");
            assert_eq!(loaded.path(), maze.path(), "{kind}");
        }
    }
}
