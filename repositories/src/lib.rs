pub mod cloudinary;
pub mod memory;
pub mod mongodb;
