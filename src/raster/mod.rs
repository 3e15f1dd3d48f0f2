pub mod framebuffer;
pub mod line;
pub mod projection;
pub mod triangle;
