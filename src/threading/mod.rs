pub mod pixel_lock;
pub mod pool;
