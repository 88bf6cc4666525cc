use std::io;
use std::path::Path;

use csv::{Writer, WriterBuilder};

use crate::error::QuoteError;
use crate::model::{OUTPUT_HEADERS, QuoteRecord};

fn write_records<W: io::Write>(
    writer: &mut Writer<W>,
    records: &[QuoteRecord],
) -> Result<(), QuoteError> {
    writer.write_record(OUTPUT_HEADERS)?;
    for record in records {
        writer.write_record(record.as_row())?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn write_csv(path: &Path, records: &[QuoteRecord]) -> Result<(), QuoteError> {
    let mut writer = WriterBuilder::new().from_path(path)?;
    write_records(&mut writer, records)
}

pub(crate) fn write_csv_to_string(records: &[QuoteRecord]) -> Result<String, QuoteError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::<u8>::new());
    write_records(&mut writer, records)?;

    let bytes = writer
        .into_inner()
        .map_err(|error| QuoteError::Io(error.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|error| QuoteError::Io(io::Error::new(io::ErrorKind::InvalidData, error)))
}
