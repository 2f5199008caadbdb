//! Artist-to-genre link rows

use tuneload_core::{
    BulkRow, DecodeError, FIELD_DELIMITER, Fields, InsertTemplate, Param, ROW_TERMINATOR, Record,
    Shape, ShapeDecoder,
};

pub const ARTIST_GENRE: Shape = Shape {
    name: "artist_genre",
    fields: &["export_date", "genre_id", "artist_id", "is_primary"],
    delimiter: FIELD_DELIMITER,
    terminated_field: Some(3),
    terminator: ROW_TERMINATOR,
    insert: InsertTemplate {
        table: "artists_to_genres",
        columns: &["artist_id", "genre_id", "is_primary", "export_date"],
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistGenreLink {
    pub export_date: i64,
    pub genre_id: i64,
    pub artist_id: i64,
    pub is_primary: bool,
}

impl Record for ArtistGenreLink {
    const SHAPE: &'static Shape = &ARTIST_GENRE;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            export_date: fields.int(0)?,
            genre_id: fields.int(1)?,
            artist_id: fields.int(2)?,
            is_primary: fields.bool(3)?,
        })
    }
}

impl BulkRow for ArtistGenreLink {
    fn bind(&self, params: &mut Vec<Param>) {
        params.push(self.artist_id.into());
        params.push(self.genre_id.into());
        params.push(self.is_primary.into());
        params.push(self.export_date.into());
    }
}

pub type ArtistGenreDecoder = ShapeDecoder<ArtistGenreLink>;

#[cfg(test)]
mod tests {
    use tuneload_core::RecordDecoder;

    use super::*;

    #[test]
    fn decodes_link() {
        let link = ArtistGenreDecoder::new()
            .decode("1000\u{1}21\u{1}500\u{1}1\u{2}")
            .unwrap();
        assert_eq!(
            link,
            ArtistGenreLink {
                export_date: 1000,
                genre_id: 21,
                artist_id: 500,
                is_primary: true,
            }
        );
    }

    #[test]
    fn terminator_stripped_before_bool_parse() {
        let link = ArtistGenreDecoder::new()
            .decode("1000\u{1}21\u{1}500\u{1}false\u{2}")
            .unwrap();
        assert!(!link.is_primary);
    }

    #[test]
    fn missing_terminator_still_decodes() {
        let link = ArtistGenreDecoder::new()
            .decode("1000\u{1}21\u{1}500\u{1}0")
            .unwrap();
        assert!(!link.is_primary);
    }

    #[test]
    fn bad_primary_flag_names_field() {
        let err = ArtistGenreDecoder::new()
            .decode("1000\u{1}21\u{1}500\u{1}maybe\u{2}")
            .unwrap_err();
        assert!(matches!(err, DecodeError::Bool { field: "is_primary", .. }));
    }
}
