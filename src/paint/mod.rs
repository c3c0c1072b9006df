//! Picking surfaces for painting: hit queries mapped into texture space

pub mod picker;
pub mod texel;

pub use picker::MeshPicker;
pub use texel::TextureSpace;
