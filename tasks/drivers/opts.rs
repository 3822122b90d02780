pub use image::*;

mod image;
