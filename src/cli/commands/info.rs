//! Info command implementation

use serde::Serialize;

use super::load_dataset;
use crate::codec::FlowCodec;
use crate::config::{load_config, InfoArgs, OutputFormat};
use crate::dataset::{FieldKind, FlowField, FlowTable};
use crate::error::{Error, Result};

/// Categorical columns in the order the flow-import schema lists them
pub(crate) const CATEGORICAL_FIRST: [&str; 6] = ["StartTime", "SrcAddr", "DstAddr", "Proto", "Sport", "Dport"];

/// One segment of the encoded layout
#[derive(Debug, Serialize)]
pub struct SegmentReport {
    pub field: FlowField,
    pub kind: FieldKind,
    pub offset: usize,
    pub width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<(f64, f64)>,
}

/// Fitted codec summary printed by `flowgan info`
#[derive(Debug, Serialize)]
pub struct LayoutReport {
    pub rows: usize,
    pub schema: String,
    pub width: usize,
    pub segments: Vec<SegmentReport>,
}

impl LayoutReport {
    pub fn new(table: &FlowTable, codec: &FlowCodec) -> Self {
        let segments = codec
            .layout()
            .segments()
            .iter()
            .map(|s| SegmentReport {
                field: s.field,
                kind: s.field.kind(),
                offset: s.offset,
                width: s.width,
                labels: codec.vocabulary(s.field).map(|v| v.labels().to_vec()),
                range: codec.scaling(s.field).map(|st| (st.min, st.max)),
            })
            .collect();
        Self {
            rows: table.len(),
            schema: table.with_categorical_first(&CATEGORICAL_FIRST).schema_string(),
            width: codec.width(),
            segments,
        }
    }

    fn to_text(&self) -> String {
        let mut lines = vec![
            format!("Rows: {}", self.rows),
            format!("Schema: {}", self.schema),
            format!("Encoded width: {}", self.width),
            String::new(),
            format!("{:<8} {:<12} {:>6} {:>6}", "Field", "Kind", "Offset", "Width"),
        ];
        for s in &self.segments {
            let detail = match (&s.labels, s.range) {
                (Some(labels), _) => format!("{} labels", labels.len()),
                (None, Some((min, max))) => format!("range [{min}, {max}]"),
                (None, None) => String::new(),
            };
            lines.push(format!(
                "{:<8} {:<12} {:>6} {:>6}  {detail}",
                s.field.to_string(),
                format!("{:?}", s.kind),
                s.offset,
                s.width
            ));
        }
        lines.join("\n")
    }
}

pub fn run_info(args: InfoArgs) -> Result<()> {
    let spec = load_config(&args.config)?;
    let (table, codec) = load_dataset(&spec)?;
    let report = LayoutReport::new(&table, &codec);

    match args.format {
        OutputFormat::Text => println!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&report)
                .map_err(|source| Error::Yaml { path: args.config.clone(), source })?;
            println!("{yaml}");
        }
    }
    Ok(())
}
