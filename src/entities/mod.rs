pub mod content;
pub mod review;
