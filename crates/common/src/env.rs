//! Environment variable helpers

/// Value of `name` if set and not blank.
pub fn var_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_unset_are_none() {
        std::env::set_var("COMMON_ENV_TEST_FORMAT", " json ");
        std::env::set_var("COMMON_ENV_TEST_BLANK", "   ");

        assert_eq!(var_non_empty("COMMON_ENV_TEST_FORMAT").as_deref(), Some("json"));
        assert_eq!(var_non_empty("COMMON_ENV_TEST_BLANK"), None);
        assert_eq!(var_non_empty("COMMON_ENV_TEST_UNSET_XYZ"), None);
    }
}
