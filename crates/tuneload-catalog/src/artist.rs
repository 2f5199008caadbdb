//! Artist export rows: one artist per line, six fields

use tuneload_core::{
    BulkRow, DecodeError, FIELD_DELIMITER, Fields, InsertTemplate, Param, ROW_TERMINATOR, Record,
    Shape, ShapeDecoder,
};

pub const ARTIST: Shape = Shape {
    name: "artist",
    fields: &[
        "export_date",
        "id",
        "name",
        "is_actual_artist",
        "view_url",
        "artist_type_id",
    ],
    delimiter: FIELD_DELIMITER,
    terminated_field: Some(5),
    terminator: ROW_TERMINATOR,
    insert: InsertTemplate {
        table: "artists",
        columns: &[
            "id",
            "name",
            "artist_type_id",
            "is_actual_artist",
            "view_url",
            "export_date",
        ],
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub export_date: i64,
    pub id: i64,
    pub name: String,
    pub is_actual_artist: bool,
    pub view_url: String,
    pub artist_type_id: i64,
}

impl Record for Artist {
    const SHAPE: &'static Shape = &ARTIST;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            export_date: fields.int(0)?,
            id: fields.int(1)?,
            name: fields.text(2).to_string(),
            is_actual_artist: fields.bool(3)?,
            view_url: fields.text(4).to_string(),
            artist_type_id: fields.int(5)?,
        })
    }
}

impl BulkRow for Artist {
    fn bind(&self, params: &mut Vec<Param>) {
        params.push(self.id.into());
        params.push(self.name.as_str().into());
        params.push(self.artist_type_id.into());
        params.push(self.is_actual_artist.into());
        params.push(self.view_url.as_str().into());
        params.push(self.export_date.into());
    }
}

pub type ArtistDecoder = ShapeDecoder<Artist>;
