pub mod extend_rect;
pub mod peek_read;
