pub mod conflict_detector;
pub mod schedule_preview;
pub mod schedule_utils;
pub mod title_parser;
