use crate::tree::{Color, Key, Kind};

use super::{FormatReason, LoadError};

/// Parsed form of one description line: `<index> <key> <left|nil>
/// <right|nil> [red|black]`, the color column only for red-black trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Row {
    /// 1-based source line, carried for error reporting.
    pub line: usize,
    pub index: usize,
    pub key: Key,
    pub children: [Option<usize>; 2],
    pub color: Option<Color>,
}

impl Row {
    pub fn parse(line: usize, text: &str, kind: Kind) -> Result<Self, LoadError> {
        let err = |reason: FormatReason| LoadError::Format { line, reason };
        let fields: Vec<&str> = text.split_whitespace().collect();
        let expected = match kind {
            Kind::RedBlack => 5,
            _ => 4,
        };
        if fields.len() != expected {
            return Err(err(FormatReason::FieldCount { expected, found: fields.len() }));
        }
        let index: usize = fields[0]
            .parse()
            .map_err(|_| err(FormatReason::BadInteger(fields[0].into())))?;
        let key: Key = fields[1]
            .parse()
            .map_err(|_| err(FormatReason::BadInteger(fields[1].into())))?;
        let reference = |field: &str| -> Result<Option<usize>, LoadError> {
            if field == "nil" {
                Ok(None)
            } else {
                field
                    .parse()
                    .map(Some)
                    .map_err(|_| err(FormatReason::BadInteger(field.into())))
            }
        };
        let left = reference(fields[2])?;
        let right = reference(fields[3])?;
        let color = match kind {
            Kind::RedBlack => Some(match fields[4] {
                "red" => Color::Red,
                "black" => Color::Black,
                other => return Err(err(FormatReason::BadColor(other.into()))),
            }),
            _ => None,
        };
        Ok(Self { line, index, key, children: [left, right], color })
    }
}
