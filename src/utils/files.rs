use std::path::{Path, PathBuf};

/// Path of the updated database copy, beside the input file.
pub fn updated_database_path(input: &Path, set_code: &str) -> PathBuf {
    sibling(input, &format!("token_file_{}_update.xml", set_code))
}

/// Path of the new-tokens file, beside the input file.
pub fn new_tokens_path(input: &Path, set_code: &str) -> PathBuf {
    sibling(input, &format!("{}_new_tokens.xml", set_code))
}

fn sibling(input: &Path, file_name: &str) -> PathBuf {
    match input.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}
