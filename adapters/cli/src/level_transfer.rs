use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use platformer_core::{LevelFormatError, TileGrid, GRID_COLUMNS, GRID_ROWS};
use thiserror::Error;

/// Identifier prefix emitted before the encoded level payload.
const SHARE_DOMAIN: &str = "level";
const SHARE_VERSION: &str = "v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes a grid into a single-line string suitable for copy and paste.
#[must_use]
pub(crate) fn encode(grid: &TileGrid) -> String {
    let encoded = STANDARD_NO_PAD.encode(grid.encode());
    format!(
        "{SHARE_DOMAIN}{FIELD_DELIMITER}{SHARE_VERSION}{FIELD_DELIMITER}{}x{}{FIELD_DELIMITER}{encoded}",
        grid.columns(),
        grid.rows()
    )
}

/// Decodes a grid from a share string.
pub(crate) fn decode(value: &str) -> Result<TileGrid, LevelTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LevelTransferError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(LevelTransferError::MissingPrefix)?;
    let version = parts.next().ok_or(LevelTransferError::MissingVersion)?;
    let dimensions = parts.next().ok_or(LevelTransferError::MissingDimensions)?;
    let payload = parts.next().ok_or(LevelTransferError::MissingPayload)?;
    if parts.next().is_some() {
        return Err(LevelTransferError::TrailingSegments);
    }

    if domain != SHARE_DOMAIN {
        return Err(LevelTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != SHARE_VERSION {
        return Err(LevelTransferError::UnsupportedVersion(version.to_owned()));
    }
    let (columns, rows) = parse_dimensions(dimensions)?;
    if (columns, rows) != (GRID_COLUMNS, GRID_ROWS) {
        return Err(LevelTransferError::InvalidDimensions(dimensions.to_owned()));
    }

    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(LevelTransferError::InvalidEncoding)?;
    TileGrid::decode(&bytes).map_err(LevelTransferError::InvalidPayload)
}

/// Errors that can occur while decoding level share strings.
#[derive(Debug, Error)]
pub(crate) enum LevelTransferError {
    #[error("share string was empty")]
    EmptyPayload,
    #[error("share string is missing the prefix")]
    MissingPrefix,
    #[error("share string is missing the version")]
    MissingVersion,
    #[error("share string is missing the grid dimensions")]
    MissingDimensions,
    #[error("share string is missing the payload")]
    MissingPayload,
    #[error("share string has segments after the payload")]
    TrailingSegments,
    #[error("share prefix '{0}' is not supported")]
    InvalidPrefix(String),
    #[error("share version '{0}' is not supported")]
    UnsupportedVersion(String),
    #[error("grid dimensions '{0}' are not 20x20")]
    InvalidDimensions(String),
    #[error("could not decode level payload")]
    InvalidEncoding(#[source] base64::DecodeError),
    #[error("could not parse level payload")]
    InvalidPayload(#[source] LevelFormatError),
}

fn parse_dimensions(dimensions: &str) -> Result<(usize, usize), LevelTransferError> {
    let invalid = || LevelTransferError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;
    let columns = columns.trim().parse::<usize>().map_err(|_| invalid())?;
    let rows = rows.trim().parse::<usize>().map_err(|_| invalid())?;
    Ok((columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use platformer_core::{TileCode, TileCoord};

    #[test]
    fn populated_level_survives_transfer() {
        let mut grid = TileGrid::empty();
        assert!(grid.set(TileCoord::new(0, 19), TileCode::Grass));
        assert!(grid.set(TileCoord::new(10, 4), TileCode::Exit));
        assert!(grid.set(TileCoord::new(19, 0), TileCode::PlatformVertical));

        let encoded = encode(&grid);
        assert!(encoded.starts_with("level:v1:20x20:"));
        assert!(!encoded.contains('\n'));
        assert_eq!(decode(&format!("  {encoded}\n")).expect("decodes"), grid);
    }

    #[test]
    fn wrong_header_is_rejected() {
        let encoded = encode(&TileGrid::empty()).replacen("level", "world", 1);
        assert!(matches!(
            decode(&encoded),
            Err(LevelTransferError::InvalidPrefix(prefix)) if prefix == "world"
        ));

        let encoded = encode(&TileGrid::empty()).replacen("v1", "v2", 1);
        assert!(matches!(
            decode(&encoded),
            Err(LevelTransferError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn other_dimensions_are_rejected() {
        let encoded = encode(&TileGrid::empty()).replacen("20x20", "10x20", 1);
        assert!(matches!(
            decode(&encoded),
            Err(LevelTransferError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn truncated_strings_report_missing_segments() {
        assert!(matches!(decode("   "), Err(LevelTransferError::EmptyPayload)));
        assert!(matches!(
            decode("level:v1"),
            Err(LevelTransferError::MissingDimensions)
        ));
        assert!(matches!(
            decode("level:v1:20x20"),
            Err(LevelTransferError::MissingPayload)
        ));
    }

    #[test]
    fn extra_segments_after_payload_are_rejected() {
        let encoded = format!("{}:extra", encode(&TileGrid::empty()));
        assert!(matches!(
            decode(&encoded),
            Err(LevelTransferError::TrailingSegments)
        ));
    }

    #[test]
    fn corrupt_payloads_are_rejected() {
        assert!(matches!(
            decode("level:v1:20x20:!!!"),
            Err(LevelTransferError::InvalidEncoding(_))
        ));
        let payload = STANDARD_NO_PAD.encode(b"[[9]]");
        assert!(matches!(
            decode(&format!("level:v1:20x20:{payload}")),
            Err(LevelTransferError::InvalidPayload(_))
        ));
    }
}
