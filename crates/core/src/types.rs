use crate::error::CoreError;

/// Component identifiers are UUIDs generated by the store.
pub type DbId = uuid::Uuid;

/// Parse a client-supplied identifier.
///
/// Anything that is not a UUID in one of its textual forms is rejected with
/// [`CoreError::InvalidIdentifier`] before the store is touched.
pub fn parse_id(raw: &str) -> Result<DbId, CoreError> {
    DbId::parse_str(raw).map_err(|_| CoreError::InvalidIdentifier(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_hyphenated_uuid() {
        let id = parse_id("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn rejects_object_id_shape() {
        assert_matches!(
            parse_id("5f8d0d55b54764421b7156c3"),
            Err(CoreError::InvalidIdentifier(raw)) if raw == "5f8d0d55b54764421b7156c3"
        );
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        assert_matches!(
            parse_id(" 67e55044-10b1-426f-9247-bb680e5fe0c8"),
            Err(CoreError::InvalidIdentifier(_))
        );
        assert_matches!(
            parse_id("67e55044-10b1-426f-9247-bb680e5fe0c8\n"),
            Err(CoreError::InvalidIdentifier(_))
        );
    }

    #[test]
    fn rejects_empty() {
        assert_matches!(parse_id(""), Err(CoreError::InvalidIdentifier(_)));
    }
}
