//! Flow record and its field catalogue

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a field is an unordered label or a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// Unordered label, one-hot encoded
    Categorical,
    /// Scalar, affinely scaled into a sub-unit range
    Continuous,
}

/// The fields of a flow record, in encoded-vector order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FlowField {
    SrcAddr,
    DstAddr,
    Sport,
    Dport,
    Proto,
    Rate,
    Load,
}

impl FlowField {
    /// All fields in the order their segments appear in an encoded vector
    pub const ALL: [FlowField; 7] = [
        FlowField::SrcAddr,
        FlowField::DstAddr,
        FlowField::Sport,
        FlowField::Dport,
        FlowField::Proto,
        FlowField::Rate,
        FlowField::Load,
    ];

    /// Column name in the input table
    pub fn column(self) -> &'static str {
        match self {
            FlowField::SrcAddr => "SrcAddr",
            FlowField::DstAddr => "DstAddr",
            FlowField::Sport => "Sport",
            FlowField::Dport => "Dport",
            FlowField::Proto => "Proto",
            FlowField::Rate => "Rate",
            FlowField::Load => "Load",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FlowField::SrcAddr | FlowField::DstAddr | FlowField::Dport | FlowField::Proto => {
                FieldKind::Categorical
            }
            FlowField::Sport | FlowField::Rate | FlowField::Load => FieldKind::Continuous,
        }
    }

    pub fn is_categorical(self) -> bool {
        self.kind() == FieldKind::Categorical
    }
}

impl fmt::Display for FlowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One observed or synthesized network flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub src_addr: String,
    pub dst_addr: String,
    pub sport: f64,
    pub dport: String,
    pub proto: String,
    pub rate: f64,
    pub load: f64,
}

impl FlowRecord {
    /// Label of a categorical field, `None` for continuous fields
    pub fn label(&self, field: FlowField) -> Option<&str> {
        match field {
            FlowField::SrcAddr => Some(&self.src_addr),
            FlowField::DstAddr => Some(&self.dst_addr),
            FlowField::Dport => Some(&self.dport),
            FlowField::Proto => Some(&self.proto),
            FlowField::Sport | FlowField::Rate | FlowField::Load => None,
        }
    }

    /// Value of a continuous field, `None` for categorical fields
    pub fn value(&self, field: FlowField) -> Option<f64> {
        match field {
            FlowField::Sport => Some(self.sport),
            FlowField::Rate => Some(self.rate),
            FlowField::Load => Some(self.load),
            FlowField::SrcAddr | FlowField::DstAddr | FlowField::Dport | FlowField::Proto => None,
        }
    }
}
