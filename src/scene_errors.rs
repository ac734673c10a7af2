use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV reading error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid scene parameter: {0}")]
    InvalidSceneParameter(String),

    #[error("No position samples found in: {0}")]
    NoPositionData(String),

    #[error("No objects parsed, nothing to do")]
    NoObjectsParsed,
}

impl PartialEq for SceneError {
    fn eq(&self, other: &Self) -> bool {
        use SceneError::*;
        match (self, other) {
            // not comparable: equal when same variant
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (JsonError(_), JsonError(_)) => true,

            (InvalidSceneParameter(a), InvalidSceneParameter(b)) => a == b,
            (NoPositionData(a), NoPositionData(b)) => a == b,

            (NoObjectsParsed, NoObjectsParsed) => true,

            _ => false,
        }
    }
}
