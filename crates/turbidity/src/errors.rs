use miette::Diagnostic;
use thiserror::Error;

pub type Result<T, E = TurbidityError> = std::result::Result<T, E>;

#[derive(Debug, Diagnostic, Error)]
pub enum TurbidityError {
    #[diagnostic(help(
        "turbidity exports need a `turbidity_data` object mapping timestamps to readings, and a numeric \
         `turbidity_dissolved_reference`"
    ))]
    #[error("failed to read the turbidity export")]
    Json(#[from] serde_json::Error),

    #[diagnostic(help("timestamps look like `2024_03_01_09_00_00_000000` (year, month, day, time, then microseconds)"))]
    #[error("failed to parse the turbidity timestamp {timestamp:?}")]
    Timestamp {
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
}
