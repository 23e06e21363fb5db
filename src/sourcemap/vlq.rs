//! VLQ (Variable-Length Quantity) decoder for source map mappings.
//!
//! Source maps store generated/original positions as Base64 VLQ deltas.
//! Lines are separated by `;`, segments within a line by `,`, and each
//! segment holds 1, 4 or 5 values.

use crate::utils::error::SourceMapError;

/// Base64 character set used in VLQ encoding
const BASE64_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const VLQ_CONTINUATION_BIT: i64 = 0b10_0000;
const VLQ_VALUE_MASK: i64 = 0b01_1111;
// Values are 32-bit signed, so a value spans at most 7 digits
const VLQ_MAX_SHIFT: u32 = 30;

fn decode_char(ch: u8) -> Result<i64, SourceMapError> {
    BASE64_CHARS
        .iter()
        .position(|&c| c == ch)
        .map(|pos| pos as i64)
        .ok_or(SourceMapError::InvalidVlqChar(ch as char))
}

/// Decode one VLQ segment into its signed values.
///
/// Each value must fit a 32-bit signed integer.
pub fn decode_vlq_segment(segment: &str) -> Result<Vec<i64>, SourceMapError> {
    let mut values = Vec::with_capacity(5);
    let mut value = 0i64;
    let mut shift = 0u32;

    for ch in segment.bytes() {
        let digit = decode_char(ch)?;

        if shift > VLQ_MAX_SHIFT {
            return Err(SourceMapError::VlqOverflow(segment.to_string()));
        }
        value += (digit & VLQ_VALUE_MASK) << shift;
        shift += 5;

        if digit & VLQ_CONTINUATION_BIT == 0 {
            // Lowest bit carries the sign
            let negative = value & 1 != 0;
            value >>= 1;
            let signed = if negative { -value } else { value };
            if i32::try_from(signed).is_err() {
                return Err(SourceMapError::VlqOverflow(segment.to_string()));
            }
            values.push(signed);
            value = 0;
            shift = 0;
        }
    }

    if shift != 0 {
        // Trailing continuation digit with nothing after it
        return Err(SourceMapError::VlqOverflow(segment.to_string()));
    }

    Ok(values)
}

/// Original-side half of a mapping segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalRef {
    pub source_index: i64,
    /// 0-based
    pub line: i64,
    /// 0-based
    pub column: i64,
    pub name_index: Option<i64>,
}

/// A single decoded mapping segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    /// 0-based line in the generated file
    pub generated_line: u32,
    /// 0-based column in the generated file
    pub generated_column: i64,
    /// None for 1-value segments that map to no source
    pub original: Option<OriginalRef>,
}

/// Decoded mappings, sorted by generated line then column
#[derive(Debug, Clone, Default)]
pub struct DecodedMappings {
    mappings: Vec<Mapping>,
}

impl DecodedMappings {
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.iter()
    }

    /// Greatest-lower-bound lookup on a single generated line.
    ///
    /// Returns the mapping with the largest generated column not past
    /// `column`; when several share that column the first one wins.
    pub fn find(&self, line: u32, column: i64) -> Option<&Mapping> {
        let line_start = self.mappings.partition_point(|m| m.generated_line < line);
        let line_end = self.mappings.partition_point(|m| m.generated_line <= line);
        let on_line = &self.mappings[line_start..line_end];

        let upper = on_line.partition_point(|m| m.generated_column <= column);
        let best_column = on_line.get(upper.checked_sub(1)?)?.generated_column;
        let first = on_line.partition_point(|m| m.generated_column < best_column);

        on_line.get(first)
    }
}

/// Add a delta to a running position, keeping it within 32 bits
fn accumulate(total: &mut i64, delta: i64) -> Result<i64, SourceMapError> {
    let sum = total
        .checked_add(delta)
        .filter(|sum| i32::try_from(*sum).is_ok())
        .ok_or(SourceMapError::PositionOverflow {
            position: *total,
            delta,
        })?;
    *total = sum;
    Ok(sum)
}

/// Decode a `mappings` string into structured, sorted form
pub fn decode_vlq_mappings(mappings: &str) -> Result<DecodedMappings, SourceMapError> {
    let mut decoded = Vec::new();

    // Everything except the generated column is delta-encoded across lines
    let mut source_index = 0i64;
    let mut original_line = 0i64;
    let mut original_column = 0i64;
    let mut name_index = 0i64;

    for (generated_line, line) in mappings.split(';').enumerate() {
        let mut generated_column = 0i64;

        for segment in line.split(',').filter(|s| !s.is_empty()) {
            let values = decode_vlq_segment(segment)?;
            let Some(&column_delta) = values.first() else {
                continue;
            };
            accumulate(&mut generated_column, column_delta)?;

            let original = if values.len() >= 4 {
                let name = match values.get(4) {
                    Some(&delta) => Some(accumulate(&mut name_index, delta)?),
                    None => None,
                };
                Some(OriginalRef {
                    source_index: accumulate(&mut source_index, values[1])?,
                    line: accumulate(&mut original_line, values[2])?,
                    column: accumulate(&mut original_column, values[3])?,
                    name_index: name,
                })
            } else {
                None
            };

            decoded.push(Mapping {
                generated_line: generated_line as u32,
                generated_column,
                original,
            });
        }
    }

    // Stable, so equal positions keep their order of appearance
    decoded.sort_by_key(|m| (m.generated_line, m.generated_column));

    Ok(DecodedMappings { mappings: decoded })
}
