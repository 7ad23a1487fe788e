use mazecore::{algorithms::UnknownAlgorithm, MazeError};

use crate::{
    method::{MethodError, UnknownMethod},
    settings::SettingsError,
};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Method(#[from] MethodError),
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    UnknownAlgorithm(#[from] UnknownAlgorithm),
    #[error(transparent)]
    UnknownMethod(#[from] UnknownMethod),
    #[error("Failed to set up logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_error<E: std::error::Error + Send + Sync + 'static>() {}

    #[test]
    fn every_source_is_an_error() {
        is_error::<log::SetLoggerError>();
        is_error::<SettingsError>();
        is_error::<MethodError>();
        is_error::<AppError>();
    }

    #[test]
    fn core_errors_keep_their_message() {
        let err = AppError::from(MazeError::NotGenerated);
        assert_eq!(err.to_string(), MazeError::NotGenerated.to_string());
    }
}
