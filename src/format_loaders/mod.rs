pub mod png;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError
    },
    #[error("{path} is {width}x{height}, too large for a surface")]
    TooLarge {
        path: String,
        width: u32,
        height: u32
    }
}
