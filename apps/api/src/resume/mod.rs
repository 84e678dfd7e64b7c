// Resume auto-fill: heuristic contact-field extraction over decoded resume text.
// The detectors are pure; document decoding lives in `crate::document`.

pub mod extractor;
pub mod handlers;
pub mod location;
pub mod name;
pub mod patterns;

pub use extractor::{extract_data_from_text, ExtractedData};
