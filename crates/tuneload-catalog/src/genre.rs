//! Genre export rows; top-level genres have an empty parent

use tuneload_core::{
    BulkRow, DecodeError, FIELD_DELIMITER, Fields, InsertTemplate, Param, ROW_TERMINATOR, Record,
    Shape, ShapeDecoder,
};

pub const GENRE: Shape = Shape {
    name: "genre",
    fields: &["export_date", "id", "parent_id", "name"],
    delimiter: FIELD_DELIMITER,
    terminated_field: Some(3),
    terminator: ROW_TERMINATOR,
    insert: InsertTemplate {
        table: "genres",
        columns: &["id", "parent_id", "name", "export_date"],
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub export_date: i64,
    pub id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
}

impl Record for Genre {
    const SHAPE: &'static Shape = &GENRE;

    fn from_fields(fields: &Fields<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            export_date: fields.int(0)?,
            id: fields.int(1)?,
            parent_id: fields.nullable_int(2)?,
            name: fields.text(3).to_string(),
        })
    }
}

impl BulkRow for Genre {
    fn bind(&self, params: &mut Vec<Param>) {
        params.push(self.id.into());
        params.push(self.parent_id.into());
        params.push(self.name.as_str().into());
        params.push(self.export_date.into());
    }
}

pub type GenreDecoder = ShapeDecoder<Genre>;
