//! Boundary types for the remote dimension-suggestion service.
//!
//! The service itself is called by the application; this module only builds
//! the request payload and turns the free-form reply into validated,
//! strongly typed suggestions. A reply that cannot be read is an error,
//! never a silently defaulted value.

use orthodraft_dimension::{Dimension, DimensionPosition, DimensionTolerance, DimensionType, Segment2D, Unit};
use orthodraft_drafting::{FeatureSummary, Point2D, ViewDirection};
use orthodraft_mesh::BoundingBox3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::Drawing;

/// Prefix of ids given to dimensions that came from suggestions.
pub const SUGGESTION_ID_PREFIX: &str = "ai-";

const SYSTEM_PROMPT: &str = "You are a mechanical drafting assistant. Given a part's bounding box and \
the dimensions already on its orthographic drawing, suggest missing dimensions. Reply with one JSON \
object: {\"dimensions\": [{\"dimension_type\": \"linear|diameter|radius|angular|ordinate|arc_length\", \
\"value\": number, \"tolerance_plus\": number|null, \"tolerance_minus\": number|null, \
\"view\": \"front|back|top|bottom|right|left\", \"position\": {\"start_x\": number, \"start_y\": number, \
\"end_x\": number, \"end_y\": number}, \"label\": string, \"is_critical\": boolean}], \
\"notes\": [string], \"title_block\": {\"part_name\": string, \"part_number\": string, \"material\": string, \
\"scale\": string, \"drawn_by\": string, \"date\": string} | null}";

/// Errors from reading a suggestion reply.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SuggestionError {
    /// No JSON object could be extracted or deserialized.
    #[error("unparseable suggestion response: {0}")]
    Unparseable(String),
    /// A suggestion carried a value outside its domain.
    #[error("suggestion {index}: invalid {field}: {reason}")]
    InvalidField {
        /// Position of the suggestion in the reply.
        index: usize,
        /// Offending field.
        field: &'static str,
        /// What was wrong.
        reason: String,
    },
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `user` or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Request payload for the suggestion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Model identifier understood by the service.
    pub model: String,
    /// Reply length limit.
    pub max_tokens: u32,
    /// Conversation so far.
    pub messages: Vec<ChatMessage>,
    /// Instructions preceding the conversation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// Compact description of an existing dimension for the request.
#[derive(Serialize)]
struct ExistingDimension<'a> {
    id: &'a str,
    dimension_type: &'static str,
    value: f64,
    view: &'static str,
}

#[derive(Serialize)]
struct DrawingSummary<'a> {
    unit: &'static str,
    width: f64,
    height: f64,
    depth: f64,
    views: Vec<&'static str>,
    features: &'a FeatureSummary,
    dimensions: Vec<ExistingDimension<'a>>,
}

impl SuggestionRequest {
    /// Default reply length limit.
    pub const DEFAULT_MAX_TOKENS: u32 = 4096;

    /// Build a request describing `drawing` and the part's bounding box.
    pub fn for_drawing(model: impl Into<String>, bbox: &BoundingBox3, drawing: &Drawing) -> serde_json::Result<Self> {
        let summary = DrawingSummary {
            unit: drawing.unit.symbol(),
            width: bbox.width(),
            height: bbox.height(),
            depth: bbox.depth(),
            views: drawing.views.iter().map(|v| v.projection.view.name()).collect(),
            features: &drawing.features,
            dimensions: drawing
                .dimensions
                .iter()
                .map(|d| ExistingDimension {
                    id: &d.id,
                    dimension_type: d.dim_type.name(),
                    value: d.value,
                    view: d.view.name(),
                })
                .collect(),
        };
        let content = format!(
            "Part summary:\n{}\n\nSuggest the dimensions this drawing is missing.",
            serde_json::to_string_pretty(&summary)?
        );
        Ok(Self {
            model: model.into(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            messages: vec![ChatMessage::user(content)],
            system: Some(SYSTEM_PROMPT.to_string()),
        })
    }
}

/// Drawing title block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleBlock {
    /// Part name.
    pub part_name: String,
    /// Part number.
    pub part_number: String,
    /// Material callout.
    pub material: String,
    /// Drawing scale, e.g. `1:2`.
    pub scale: String,
    /// Author.
    pub drawn_by: String,
    /// Drawing date.
    pub date: String,
}

#[derive(Debug, Deserialize)]
struct RawPosition {
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
}

#[derive(Debug, Deserialize)]
struct RawSuggestion {
    dimension_type: String,
    value: f64,
    #[serde(default)]
    tolerance_plus: Option<f64>,
    #[serde(default)]
    tolerance_minus: Option<f64>,
    view: String,
    position: RawPosition,
    #[serde(default)]
    label: String,
    #[serde(default)]
    is_critical: bool,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    dimensions: Vec<RawSuggestion>,
    #[serde(default)]
    notes: Vec<String>,
    #[serde(default)]
    title_block: Option<TitleBlock>,
}

/// A validated dimension suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSuggestion {
    /// Semantic type.
    pub dim_type: DimensionType,
    /// Value in model units.
    pub value: f64,
    /// Tolerance band, when either side was given.
    pub tolerance: Option<DimensionTolerance>,
    /// Target view.
    pub view: ViewDirection,
    /// Dimension line in drawing units.
    pub line: Segment2D,
    /// Display label; empty means format from the value.
    pub label: String,
    /// Criticality flag.
    pub critical: bool,
}

impl DimensionSuggestion {
    /// Convert into a drawing dimension with id `ai-<n>`.
    pub fn into_dimension(self, n: usize, unit: Unit) -> Dimension {
        let label = if self.label.trim().is_empty() {
            Dimension::format_label(self.dim_type, self.value, unit)
        } else {
            self.label
        };
        Dimension {
            id: format!("{}{}", SUGGESTION_ID_PREFIX, n),
            dim_type: self.dim_type,
            value: self.value,
            tolerance: self.tolerance,
            unit,
            view: self.view,
            position: DimensionPosition {
                anchor: self.line,
                line: self.line,
                text: Some(self.line.midpoint()),
            },
            label,
            critical: self.critical,
        }
    }
}

/// Validated reply from the suggestion service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    /// Suggested dimensions.
    pub dimensions: Vec<DimensionSuggestion>,
    /// Drawing notes.
    pub notes: Vec<String>,
    /// Suggested title block.
    pub title_block: Option<TitleBlock>,
}

/// Pull the JSON object out of a reply that may wrap it in prose or a code fence.
fn extract_json(text: &str) -> Option<&str> {
    if let Some(open) = text.find("```") {
        let body = &text[open + 3..];
        // Skip a language tag such as ```json
        let body = match body.find('\n') {
            Some(nl) if !body[..nl].trim_start().starts_with('{') => &body[nl + 1..],
            _ => body,
        };
        if let Some(close) = body.find("```") {
            return Some(body[..close].trim());
        }
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn check_non_negative(index: usize, field: &'static str, value: f64) -> Result<f64, SuggestionError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SuggestionError::InvalidField {
            index,
            field,
            reason: format!("expected a finite non-negative number, got {}", value),
        })
    }
}

fn validate(index: usize, raw: RawSuggestion) -> Result<DimensionSuggestion, SuggestionError> {
    let dim_type = DimensionType::from_name(&raw.dimension_type).ok_or_else(|| SuggestionError::InvalidField {
        index,
        field: "dimension_type",
        reason: format!("unknown type {:?}", raw.dimension_type),
    })?;
    let view = ViewDirection::from_name(&raw.view).ok_or_else(|| SuggestionError::InvalidField {
        index,
        field: "view",
        reason: format!("unknown view {:?}", raw.view),
    })?;
    let value = check_non_negative(index, "value", raw.value)?;

    let tolerance = match (raw.tolerance_plus, raw.tolerance_minus) {
        (None, None) => None,
        (plus, minus) => Some(DimensionTolerance {
            plus: check_non_negative(index, "tolerance_plus", plus.unwrap_or(0.0))?,
            minus: check_non_negative(index, "tolerance_minus", minus.unwrap_or(0.0))?,
        }),
    };

    let p = &raw.position;
    if ![p.start_x, p.start_y, p.end_x, p.end_y].iter().all(|c| c.is_finite()) {
        return Err(SuggestionError::InvalidField {
            index,
            field: "position",
            reason: "coordinates must be finite".into(),
        });
    }

    Ok(DimensionSuggestion {
        dim_type,
        value,
        tolerance,
        view,
        line: Segment2D::new(Point2D::new(p.start_x, p.start_y), Point2D::new(p.end_x, p.end_y)),
        label: raw.label,
        critical: raw.is_critical,
    })
}

/// Parse and validate a suggestion reply.
///
/// Accepts a bare JSON object, one embedded in prose, or one inside a
/// fenced code block. The first invalid suggestion fails the whole reply.
pub fn parse_suggestions(text: &str) -> Result<SuggestionResponse, SuggestionError> {
    let json = extract_json(text).ok_or_else(|| SuggestionError::Unparseable("no JSON object found".into()))?;
    let raw: RawResponse = serde_json::from_str(json).map_err(|e| SuggestionError::Unparseable(e.to_string()))?;

    let dimensions = raw
        .dimensions
        .into_iter()
        .enumerate()
        .map(|(i, s)| validate(i, s))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        dimensions = dimensions.len(),
        notes = raw.notes.len(),
        title_block = raw.title_block.is_some(),
        "parsed suggestion reply"
    );

    Ok(SuggestionResponse {
        dimensions,
        notes: raw.notes,
        title_block: raw.title_block,
    })
}

impl Drawing {
    /// Merge a validated reply into the drawing.
    ///
    /// Suggested dimensions get `ai-<n>` ids numbered after any already
    /// present. Notes are appended; a supplied title block replaces the
    /// current one. Returns the number of dimensions added.
    pub fn apply_suggestions(&mut self, response: SuggestionResponse) -> usize {
        let existing = self
            .dimensions
            .iter()
            .filter(|d| d.id.starts_with(SUGGESTION_ID_PREFIX))
            .count();
        let added = response.dimensions.len();
        for (i, suggestion) in response.dimensions.into_iter().enumerate() {
            self.dimensions.push(suggestion.into_dimension(existing + i + 1, self.unit));
        }
        self.notes.extend(response.notes);
        if response.title_block.is_some() {
            self.title_block = response.title_block;
        }
        added
    }
}
