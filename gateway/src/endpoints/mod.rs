pub mod ask;
pub mod extract_text;
pub mod fallback;
pub mod status;
pub mod summarize;
