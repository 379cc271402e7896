//! Error type shared by the buffer adapter, the pipeline and the codec glue.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The layout has fewer than the three color channels the converters need.
    #[error("image has {channels} channel(s), at least 3 are required")]
    TooFewChannels { channels: usize },

    #[error("image size {width}x{height}x{channels} overflows the address space")]
    SizeOverflow {
        width: usize,
        height: usize,
        channels: usize,
    },

    /// A buffer does not match the layout it was paired with.
    #[error("buffer holds {actual} elements, layout requires {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("conversion cancelled")]
    Cancelled,

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} decoded to an empty image", .path.display())]
    EmptyImage { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
