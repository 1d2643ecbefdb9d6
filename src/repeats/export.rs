use std::borrow::Cow;
use std::io::Write;
use std::sync::Arc;

use arrow_array::{ArrayRef, RecordBatch, StringArray, UInt64Array};
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use parquet::arrow::arrow_writer::ArrowWriter;
use serde::Serialize;

use crate::repeats::data::{Repeat, RepeatRecord, ScanConfig};
use crate::repeats::error::ExportError;

const PARQUET_BATCH_ROWS: usize = 64 * 1024;

/// Destination for detected repeats.
pub trait RepeatSink {
    fn emit(&mut self, record: &RepeatRecord<'_>) -> Result<(), ExportError>;

    /// Flushes buffered output. Called once after the last chromosome.
    fn finish(&mut self) -> Result<(), ExportError> {
        Ok(())
    }
}

impl RepeatSink for Vec<Repeat> {
    fn emit(&mut self, record: &RepeatRecord<'_>) -> Result<(), ExportError> {
        self.push(record.to_repeat());
        Ok(())
    }
}

/// The two comment lines that open tab-separated output.
pub fn write_header<W: Write + ?Sized>(writer: &mut W, config: &ScanConfig) -> std::io::Result<()> {
    writeln!(writer, "#repeat_length: {}", config.repeat_length())?;
    writeln!(writer, "#total_length: {}", config.min_length)
}

/// `<chrom>\t<start>\t<end>\tunit=<unit>`, one line per repeat.
pub struct TsvSink<W: Write> {
    writer: W,
}

impl<W: Write> TsvSink<W> {
    pub fn new(mut writer: W, config: &ScanConfig) -> Result<Self, ExportError> {
        write_header(&mut writer, config)?;
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RepeatSink for TsvSink<W> {
    fn emit(&mut self, record: &RepeatRecord<'_>) -> Result<(), ExportError> {
        write!(
            self.writer,
            "{}\t{}\t{}\tunit=",
            record.chrom, record.start, record.end
        )?;
        self.writer.write_all(record.unit)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct RepeatRow<'a> {
    chrom: &'a str,
    start: usize,
    end: usize,
    length: usize,
    unit: Cow<'a, str>,
}

impl<'a> From<&RepeatRecord<'a>> for RepeatRow<'a> {
    fn from(record: &RepeatRecord<'a>) -> Self {
        Self {
            chrom: record.chrom,
            start: record.start,
            end: record.end,
            length: record.length(),
            unit: record.unit_str(),
        }
    }
}

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    /// Writes the header row immediately so empty results still carry it.
    pub fn new(writer: W) -> Result<Self, ExportError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        writer.write_record(["chrom", "start", "end", "length", "unit"])?;
        Ok(Self { writer })
    }

    pub fn into_inner(self) -> Result<W, ExportError> {
        self.writer
            .into_inner()
            .map_err(|err| ExportError::Io(err.into_error()))
    }
}

impl<W: Write> RepeatSink for CsvSink<W> {
    fn emit(&mut self, record: &RepeatRecord<'_>) -> Result<(), ExportError> {
        self.writer.serialize(RepeatRow::from(record))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        self.writer.flush()?;
        Ok(())
    }
}

pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RepeatSink for JsonLinesSink<W> {
    fn emit(&mut self, record: &RepeatRecord<'_>) -> Result<(), ExportError> {
        serde_json::to_writer(&mut self.writer, &RepeatRow::from(record))?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Default)]
struct ColumnBuffers {
    chroms: Vec<String>,
    starts: Vec<u64>,
    ends: Vec<u64>,
    lengths: Vec<u64>,
    units: Vec<String>,
}

impl ColumnBuffers {
    fn len(&self) -> usize {
        self.starts.len()
    }

    fn push(&mut self, record: &RepeatRecord<'_>) {
        self.chroms.push(record.chrom.to_string());
        self.starts.push(record.start as u64);
        self.ends.push(record.end as u64);
        self.lengths.push(record.length() as u64);
        self.units.push(record.unit_str().into_owned());
    }

    fn take_columns(&mut self) -> Vec<ArrayRef> {
        let ColumnBuffers {
            chroms,
            starts,
            ends,
            lengths,
            units,
        } = std::mem::take(self);
        vec![
            Arc::new(StringArray::from(chroms)),
            Arc::new(UInt64Array::from(starts)),
            Arc::new(UInt64Array::from(ends)),
            Arc::new(UInt64Array::from(lengths)),
            Arc::new(StringArray::from(units)),
        ]
    }
}

/// Columnar export. Rows are buffered and written in record batches.
pub struct ParquetSink<W: Write + Send> {
    writer: Option<ArrowWriter<W>>,
    schema: SchemaRef,
    buffers: ColumnBuffers,
    batch_rows: usize,
}

impl<W: Write + Send> ParquetSink<W> {
    pub fn new(writer: W) -> Result<Self, ExportError> {
        let schema = Self::schema();
        let writer = ArrowWriter::try_new(writer, schema.clone(), None)?;
        Ok(Self {
            writer: Some(writer),
            schema,
            buffers: ColumnBuffers::default(),
            batch_rows: PARQUET_BATCH_ROWS,
        })
    }

    pub fn schema() -> SchemaRef {
        Arc::new(Schema::new(vec![
            Field::new("chrom", DataType::Utf8, false),
            Field::new("start", DataType::UInt64, false),
            Field::new("end", DataType::UInt64, false),
            Field::new("length", DataType::UInt64, false),
            Field::new("unit", DataType::Utf8, false),
        ]))
    }

    fn write_batch(&mut self) -> Result<(), ExportError> {
        if self.buffers.len() == 0 {
            return Ok(());
        }
        let writer = self.writer.as_mut().ok_or(ExportError::Finished)?;
        let batch = RecordBatch::try_new(self.schema.clone(), self.buffers.take_columns())?;
        writer.write(&batch)?;
        Ok(())
    }
}

impl<W: Write + Send> RepeatSink for ParquetSink<W> {
    fn emit(&mut self, record: &RepeatRecord<'_>) -> Result<(), ExportError> {
        if self.writer.is_none() {
            return Err(ExportError::Finished);
        }
        self.buffers.push(record);
        if self.buffers.len() >= self.batch_rows {
            self.write_batch()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ExportError> {
        self.write_batch()?;
        if let Some(writer) = self.writer.take() {
            writer.close()?;
        }
        Ok(())
    }
}
