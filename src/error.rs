// One error type for the whole binary.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),                         // Creating the window failed
    WindowUpdate(String),                       // Pushing the framebuffer failed
    AssetLoad { path: String, reason: String }, // Reading/decoding an image failed
    AssetSize(String),                          // An image decoded to zero pixels
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::AssetLoad { path, reason } => write!(f, "Asset load error ({path}): {reason}"),
            Error::AssetSize(s) => write!(f, "Asset size error: {s}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_asset() {
        let e = Error::AssetLoad { path: "assets/scream.jpg".into(), reason: "not found".into() };
        assert_eq!(e.to_string(), "Asset load error (assets/scream.jpg): not found");
    }
}
