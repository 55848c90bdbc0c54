use crate::error::AppError;

pub fn validate_comment_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::field("content", "Comment content cannot be empty"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_comment_is_rejected() {
        assert!(validate_comment_content("Looks good").is_ok());
        assert!(validate_comment_content("").is_err());
        assert!(validate_comment_content("   \n").is_err());
    }
}
