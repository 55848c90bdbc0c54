use crate::error::AppError;

/// Trims and checks a label name, returning the stored form.
pub fn normalize_label_name(name: &str) -> Result<String, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::field("name", "Label name is required"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_names_are_trimmed() {
        assert_eq!(normalize_label_name("  bug ").unwrap(), "bug");
        assert!(normalize_label_name("   ").is_err());
    }
}
