pub mod frame;
pub mod mover;
pub mod scanner;

pub use frame::{file_name, Frame};
pub use mover::move_into;
pub use scanner::{is_frame_file, scan_frames, FRAME_EXTENSIONS};
