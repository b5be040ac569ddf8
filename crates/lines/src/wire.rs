//! JSON boundary for actions dispatched by the order form.
//!
//! The form sends flux-style actions (`{"type": "setLineProperty", "payload": {..}}`)
//! whose property edits are loosely typed. They are turned into [`LineAction`]
//! here, once, so the reducer only ever sees typed edits.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use draftorder_core::{DomainError, DomainResult, LineId};

use crate::action::{LineAction, LineEdit, ResolvedProduct};
use crate::line::{LineType, ProductRef};
use crate::pricing::FieldInput;

/// Action as it arrives from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum WireAction {
    AddLine,
    DeleteLine(LineId),
    UpdateLineFromProduct(ProductResolution),
    SetLineProperty(PropertyChange),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResolution {
    pub id: LineId,
    pub product: ResolvedProduct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyChange {
    pub id: LineId,
    pub property: String,
    #[serde(default)]
    pub value: JsonValue,
}

impl TryFrom<WireAction> for LineAction {
    type Error = DomainError;

    fn try_from(action: WireAction) -> DomainResult<Self> {
        Ok(match action {
            WireAction::AddLine => LineAction::AddLine,
            WireAction::DeleteLine(id) => LineAction::DeleteLine(id),
            WireAction::UpdateLineFromProduct(ProductResolution { id, product }) => {
                LineAction::UpdateLineFromProduct { id, product }
            }
            WireAction::SetLineProperty(PropertyChange { id, property, value }) => {
                let edit = parse_edit(&property, value)?;
                LineAction::SetLineProperty { id, edit }
            }
        })
    }
}

fn parse_edit(property: &str, value: JsonValue) -> DomainResult<LineEdit> {
    let edit = match property {
        "product" => LineEdit::Product(match value {
            JsonValue::Null => None,
            selected => Some(ProductRef(selected)),
        }),
        "text" => LineEdit::Text(match value {
            JsonValue::Null => None,
            JsonValue::String(text) => Some(text),
            other => Some(other.to_string()),
        }),
        "type" => {
            let name = value
                .as_str()
                .ok_or_else(|| DomainError::validation(format!("type must be a string, got {value}")))?;
            LineEdit::Type(name.parse::<LineType>()?)
        }
        "quantity" => LineEdit::Quantity(field_input(value)),
        "unitPrice" => LineEdit::UnitPrice(field_input(value)),
        "discountPercent" => LineEdit::DiscountPercent(field_input(value)),
        "discountAmount" => LineEdit::DiscountAmount(field_input(value)),
        "total" => LineEdit::Total(field_input(value)),
        other => {
            return Err(DomainError::validation(format!("unknown line property: {other}")));
        }
    };
    Ok(edit)
}

// Anything that is neither a number nor a string coerces like unparseable text.
fn field_input(value: JsonValue) -> FieldInput {
    serde_json::from_value(value).unwrap_or(FieldInput::Empty)
}

/// Parse a single wire action.
pub fn parse_action(json: &str) -> DomainResult<LineAction> {
    let wire: WireAction = serde_json::from_str(json)
        .map_err(|e| DomainError::validation(format!("malformed action: {e}")))?;
    LineAction::try_from(wire)
}

/// Parse a JSON array of wire actions, in order.
pub fn parse_actions(json: &str) -> DomainResult<Vec<LineAction>> {
    let wire: Vec<WireAction> = serde_json::from_str(json)
        .map_err(|e| DomainError::validation(format!("malformed action list: {e}")))?;
    wire.into_iter().map(LineAction::try_from).collect()
}
