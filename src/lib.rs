pub mod image;
pub mod manifest;
pub mod md;
pub mod text;
pub mod toc;
