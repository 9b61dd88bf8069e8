//! Validation modules

pub mod upload;

pub use upload::{
    validate_file_name, validate_folder_color, validate_importance_level, MAX_FILE_NAME_LENGTH,
};
