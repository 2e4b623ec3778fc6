use super::ConfigError;

/// Backend resolving `${...}` references found in string values.
pub trait SecretResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> Result<String, ConfigError>;
}

/// Resolves `${VAR}` and `${env:VAR}` from the environment and
/// `${file:/path}` from a file (trimmed), e.g. the SMTP password mounted
/// as a container secret.
pub struct DefaultSecretResolver;

impl SecretResolver for DefaultSecretResolver {
    fn resolve(&self, reference: &str) -> Result<String, ConfigError> {
        let reference = reference.trim();
        if let Some(path) = reference.strip_prefix("file:") {
            let path = path.trim();
            return std::fs::read_to_string(path)
                .map(|s| s.trim().to_string())
                .map_err(|e| ConfigError::Load(format!("Secret file '{path}': {e}")));
        }
        let var = reference.strip_prefix("env:").unwrap_or(reference).trim();
        std::env::var(var).map_err(|_| ConfigError::NotFound(format!("env:{var}")))
    }
}

/// Substitute every `${...}` placeholder in `value`.
pub fn resolve_placeholders(
    value: &str,
    resolver: &dyn SecretResolver,
) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let end = rest[start..]
            .find('}')
            .ok_or_else(|| ConfigError::Load(format!("Unclosed placeholder in: {value}")))?;
        out.push_str(&rest[..start]);
        out.push_str(&resolver.resolve(&rest[start + 2..start + end])?);
        rest = &rest[start + end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_env_reference_inside_text() {
        std::env::set_var("TEST_QUILL_SMTP_HOST", "mail.local");
        let result =
            resolve_placeholders("smtp://${env:TEST_QUILL_SMTP_HOST}:25", &DefaultSecretResolver)
                .unwrap();
        assert_eq!(result, "smtp://mail.local:25");
        std::env::remove_var("TEST_QUILL_SMTP_HOST");
    }

    #[test]
    fn missing_variable_is_not_found() {
        let err = resolve_placeholders("${TEST_QUILL_NOPE}", &DefaultSecretResolver).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn unclosed_placeholder_fails() {
        assert!(resolve_placeholders("${OPEN", &DefaultSecretResolver).is_err());
    }

    #[test]
    fn reads_file_reference_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let secret = dir.path().join("smtp_password");
        std::fs::write(&secret, "hunter2\n").unwrap();

        let reference = format!("${{file:{}}}", secret.display());
        let result = resolve_placeholders(&reference, &DefaultSecretResolver).unwrap();
        assert_eq!(result, "hunter2");
    }
}
