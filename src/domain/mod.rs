mod error;
mod image;
pub mod reference;
pub mod traits;

pub use error::{EngineError, RmiError};
pub use image::{Container, ContainerScope, DEFAULT_TAG, Image};
pub use reference::Reference;
pub use traits::ContainerEngine;
