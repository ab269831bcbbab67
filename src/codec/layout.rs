//! Segment layout of an encoded flow vector

use crate::dataset::FlowField;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Position and width of one field inside an encoded vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub field: FlowField,
    pub offset: usize,
    pub width: usize,
}

impl Segment {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.width
    }
}

/// Ordered, gap-free partition of an encoded vector into field segments
///
/// Both the codec and the generator are built from the same layout, so a
/// generator output always splits back into the fields it was built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    segments: Vec<Segment>,
}

impl FieldLayout {
    /// Lay out fields back to back from their widths
    pub fn from_widths<I>(widths: I) -> Self
    where
        I: IntoIterator<Item = (FlowField, usize)>,
    {
        let mut offset = 0;
        let segments = widths
            .into_iter()
            .map(|(field, width)| {
                let segment = Segment { field, offset, width };
                offset += width;
                segment
            })
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total encoded width
    pub fn width(&self) -> usize {
        self.segments.last().map_or(0, |s| s.offset + s.width)
    }

    pub fn segment(&self, field: FlowField) -> Option<&Segment> {
        self.segments.iter().find(|s| s.field == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_accumulate() {
        let layout = FieldLayout::from_widths([
            (FlowField::SrcAddr, 2),
            (FlowField::DstAddr, 3),
            (FlowField::Sport, 1),
        ]);
        assert_eq!(layout.width(), 6);
        assert_eq!(layout.segment(FlowField::DstAddr).map(Segment::range), Some(2..5));
        assert_eq!(layout.segment(FlowField::Sport).map(|s| s.offset), Some(5));
        assert!(layout.segment(FlowField::Load).is_none());
    }

    #[test]
    fn test_empty_layout_has_zero_width() {
        assert_eq!(FieldLayout::from_widths([]).width(), 0);
    }
}
