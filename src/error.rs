use thiserror::Error;

/// Errors from the fallible edges of the crate: loading fonts and writing
/// rendered output. Layout itself never fails; anomalies degrade to an
/// imperfect rendering plus a logged diagnostic.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(transparent)]
    /// An I/O error occurred while writing rendered content
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error("no font registered under index {0}")]
    /// A font id that does not belong to the font book
    UnknownFont(usize),
}
