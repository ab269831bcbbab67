//! Flow codec: flow records ↔ fixed-width numeric vectors
//!
//! A [`FlowCodec`] is fitted once on a training table. It freezes one
//! vocabulary per categorical field and one range per continuous field,
//! and from those derives the [`FieldLayout`] that both the codec and the
//! generator are built against.
//!
//! Encoded order is
//! `one-hot(SrcAddr) ‖ one-hot(DstAddr) ‖ Sport ‖ one-hot(Dport) ‖ one-hot(Proto) ‖ Rate ‖ Load`.

mod layout;
mod scaling;
mod vocabulary;

pub use layout::{FieldLayout, Segment};
pub use scaling::{ScalingStats, SCALE_OFFSET};
pub use vocabulary::CategoryVocabulary;
pub use crate::dataset::{FieldKind, FlowField};

use crate::dataset::{FlowRecord, FlowTable};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use tracing::{debug, warn};

/// Frozen per-field encoding state
#[derive(Debug, Clone, PartialEq)]
enum FieldCodec {
    Categorical(CategoryVocabulary),
    Continuous(ScalingStats),
}

impl FieldCodec {
    fn width(&self) -> usize {
        match self {
            FieldCodec::Categorical(vocab) => vocab.cardinality(),
            FieldCodec::Continuous(_) => 1,
        }
    }
}

/// Fitted codec state
#[derive(Debug, Clone, PartialEq)]
pub struct FlowCodec {
    fields: Vec<FieldCodec>,
    layout: FieldLayout,
}

impl FlowCodec {
    /// Fit vocabularies and scaling ranges from a table
    ///
    /// Fails with a schema error if the table is empty, lacks one of the
    /// seven flow columns, or has a non-numeric continuous cell.
    pub fn fit(table: &FlowTable) -> Result<Self> {
        let records = table.records()?;
        Self::fit_records(&records)
    }

    /// Fit from already-parsed records
    pub fn fit_records(records: &[FlowRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::Schema("cannot fit codec on an empty dataset".into()));
        }

        let mut fields = Vec::with_capacity(FlowField::ALL.len());
        for field in FlowField::ALL {
            let codec = if field.is_categorical() {
                let vocab = CategoryVocabulary::fit(field, records.iter().filter_map(|r| r.label(field)));
                debug!(%field, cardinality = vocab.cardinality(), "fitted vocabulary");
                FieldCodec::Categorical(vocab)
            } else {
                let stats = ScalingStats::fit(field, records.iter().filter_map(|r| r.value(field)))
                    .ok_or_else(|| Error::Schema(format!("no values observed for {field}")))?;
                if !stats.min.is_finite() || !stats.max.is_finite() {
                    return Err(Error::Schema(format!("{field} contains non-finite values")));
                }
                if stats.min == stats.max {
                    warn!(%field, value = stats.min, "continuous column is constant");
                }
                debug!(%field, min = stats.min, max = stats.max, "fitted scaling range");
                FieldCodec::Continuous(stats)
            };
            fields.push(codec);
        }

        let layout = FieldLayout::from_widths(FlowField::ALL.into_iter().zip(fields.iter().map(FieldCodec::width)));
        debug!(width = layout.width(), "codec layout ready");
        Ok(Self { fields, layout })
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Length of every encoded vector
    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn vocabulary(&self, field: FlowField) -> Option<&CategoryVocabulary> {
        match self.field_codec(field) {
            FieldCodec::Categorical(vocab) => Some(vocab),
            FieldCodec::Continuous(_) => None,
        }
    }

    pub fn scaling(&self, field: FlowField) -> Option<&ScalingStats> {
        match self.field_codec(field) {
            FieldCodec::Continuous(stats) => Some(stats),
            FieldCodec::Categorical(_) => None,
        }
    }

    fn field_codec(&self, field: FlowField) -> &FieldCodec {
        // `fields` is built in FlowField::ALL order, which is declaration order
        &self.fields[field as usize]
    }

    /// Encode one record
    pub fn encode(&self, record: &FlowRecord) -> Result<Array1<f64>> {
        let mut out = vec![0.0; self.width()];
        self.encode_into(record, &mut out)?;
        Ok(Array1::from_vec(out))
    }

    fn encode_into(&self, record: &FlowRecord, out: &mut [f64]) -> Result<()> {
        for (segment, codec) in self.layout.segments().iter().zip(&self.fields) {
            let slot = &mut out[segment.range()];
            match codec {
                FieldCodec::Categorical(vocab) => {
                    let label = record.label(segment.field).unwrap_or_default();
                    slot[vocab.index_of(label)?] = 1.0;
                }
                FieldCodec::Continuous(stats) => {
                    slot[0] = stats.scale(record.value(segment.field).unwrap_or_default());
                }
            }
        }
        Ok(())
    }

    /// Encode every row of a table into a `(rows, width)` training matrix
    pub fn encode_table(&self, table: &FlowTable) -> Result<Array2<f32>> {
        let records = table.records()?;
        let mut matrix = Array2::zeros((records.len(), self.width()));
        let mut buffer = vec![0.0f64; self.width()];
        for (record, mut row) in records.iter().zip(matrix.rows_mut()) {
            buffer.fill(0.0);
            self.encode_into(record, &mut buffer)?;
            row.iter_mut().zip(&buffer).for_each(|(dst, &src)| *dst = src as f32);
        }
        Ok(matrix)
    }

    /// Decode one vector back into a record
    ///
    /// Categorical segments take the label at the segment's argmax, with
    /// ties going to the lowest index. Continuous values are unscaled
    /// without clamping.
    pub fn decode(&self, vector: ArrayView1<'_, f64>) -> Result<FlowRecord> {
        if vector.len() != self.width() {
            return Err(Error::CodecMismatch { expected: self.width(), actual: vector.len() });
        }

        let mut record = FlowRecord {
            src_addr: String::new(),
            dst_addr: String::new(),
            sport: 0.0,
            dport: String::new(),
            proto: String::new(),
            rate: 0.0,
            load: 0.0,
        };

        for (segment, codec) in self.layout.segments().iter().zip(&self.fields) {
            let slot = vector.slice(ndarray::s![segment.range()]);
            match codec {
                FieldCodec::Categorical(vocab) => {
                    let label = vocab
                        .label_at(argmax(slot))
                        .ok_or_else(|| Error::Schema(format!("{} vocabulary is empty", segment.field)))?
                        .to_string();
                    match segment.field {
                        FlowField::SrcAddr => record.src_addr = label,
                        FlowField::DstAddr => record.dst_addr = label,
                        FlowField::Dport => record.dport = label,
                        FlowField::Proto => record.proto = label,
                        _ => {}
                    }
                }
                FieldCodec::Continuous(stats) => {
                    let value = stats.unscale(slot[0]);
                    match segment.field {
                        FlowField::Sport => record.sport = value,
                        FlowField::Rate => record.rate = value,
                        FlowField::Load => record.load = value,
                        _ => {}
                    }
                }
            }
        }
        Ok(record)
    }

    /// Decode each row of a generated batch
    pub fn decode_batch(&self, batch: ArrayView2<'_, f32>) -> Result<Vec<FlowRecord>> {
        if batch.ncols() != self.width() {
            return Err(Error::CodecMismatch { expected: self.width(), actual: batch.ncols() });
        }
        batch
            .rows()
            .into_iter()
            .map(|row| self.decode(row.mapv(f64::from).view()))
            .collect()
    }
}

/// Index of the largest element, first one on ties
fn argmax(values: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
