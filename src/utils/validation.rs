use validator::ValidationError;

/// `validator` counts whitespace as content; form fields here do not.
pub fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub fn is_pdf_file_name(name: &str) -> bool {
    name.trim().to_ascii_lowercase().ends_with(".pdf")
}
