use super::*;

mod errors;
mod paper_to_note;
