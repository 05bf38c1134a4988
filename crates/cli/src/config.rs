//! Shell runtime configuration.
//!
//! Credentials are resolved once at startup and then passed into the shell,
//! so nothing reads process-wide environment variables while the menu loop
//! is running.

/// Credentials guarding the doctor and administrator flows.
///
/// These are shared literal passwords, not real authentication; the
/// defaults match the historical `doctor` / `admin` values.
#[derive(Clone, Debug)]
pub struct ShellConfig {
    pub doctor_password: String,
    pub admin_password: String,
}

impl ShellConfig {
    /// Resolves the configuration from explicit overrides, then the
    /// `CMR_DOCTOR_PASSWORD` / `CMR_ADMIN_PASSWORD` environment variables,
    /// then the defaults.
    pub fn resolve(doctor_password: Option<String>, admin_password: Option<String>) -> Self {
        Self {
            doctor_password: doctor_password
                .or_else(|| std::env::var("CMR_DOCTOR_PASSWORD").ok())
                .unwrap_or_else(|| "doctor".to_string()),
            admin_password: admin_password
                .or_else(|| std::env::var("CMR_ADMIN_PASSWORD").ok())
                .unwrap_or_else(|| "admin".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_overrides_win() {
        let config = ShellConfig::resolve(Some("d".to_string()), Some("a".to_string()));
        assert_eq!(config.doctor_password, "d");
        assert_eq!(config.admin_password, "a");
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        // Relies on the test environment not defining the CMR_* variables.
        let config = ShellConfig::resolve(None, None);
        assert_eq!(config.doctor_password, "doctor");
        assert_eq!(config.admin_password, "admin");
    }
}
