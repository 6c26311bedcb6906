pub mod cipher;
pub mod note;
pub mod numeral;
pub mod pitch;
pub mod position;
pub mod preset;
pub mod ratio;
pub mod string_index;
pub mod tuning;
