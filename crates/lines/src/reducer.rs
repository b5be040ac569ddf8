//! State-transition dispatcher for the draft-order line collection.
//!
//! `LinesReducer` maps each [`LineAction`] onto a new [`Lines`] value. The
//! input collection is never modified; actions naming an unknown line leave
//! the collection as it was.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use draftorder_core::{LineId, LineIdSource, Transition, UuidLineIds};

use crate::action::{LineAction, LineEdit, ResolvedProduct};
use crate::line::{LineItem, LineType, Lines};
use crate::pricing::{PricingBasis, PricingUpdate, ensure_numeric, recalculate, round2};

/// Draws an id source gets before `addLine` gives up on finding an unused id.
const MAX_ID_DRAWS: usize = 16;

/// Pure transition function over [`Lines`].
#[derive(Clone)]
pub struct LinesReducer {
    ids: Arc<dyn LineIdSource>,
}

impl LinesReducer {
    pub fn new(ids: Arc<dyn LineIdSource>) -> Self {
        Self { ids }
    }

    /// A default product line with a freshly issued id.
    pub fn create_default_line(&self) -> LineItem {
        LineItem::new_default(self.ids.next_id())
    }

    /// Append a default line. An id source that keeps returning ids already in
    /// the collection leaves it unchanged after [`MAX_ID_DRAWS`] attempts.
    fn add_line(&self, state: &Lines) -> Lines {
        let fresh = core::iter::repeat_with(|| self.ids.next_id())
            .take(MAX_ID_DRAWS)
            .find(|id| !state.contains(id));

        match fresh {
            Some(id) => {
                debug!(line_id = %id, "line added");
                state.appended(LineItem::new_default(id))
            }
            None => {
                warn!(draws = MAX_ID_DRAWS, "id source issued no unused id; line not added");
                state.clone()
            }
        }
    }

    fn delete_line(&self, state: &Lines, id: &LineId) -> Lines {
        if !state.contains(id) {
            debug!(line_id = %id, "delete for unknown line ignored");
            return state.clone();
        }
        state.without(id)
    }

    fn update_line_from_product(
        &self,
        state: &Lines,
        id: &LineId,
        product: &ResolvedProduct,
    ) -> Lines {
        if !state.contains(id) {
            debug!(line_id = %id, "product lookup result for unknown line ignored");
            return state.clone();
        }

        if product.sku().is_none() {
            warn!(line_id = %id, errors = ?product.errors, "product lookup failed");
            return state.replaced(id, |line| LineItem {
                errors: product.errors.clone(),
                ..line.clone()
            });
        }

        state.replaced(id, |line| merge_product(line, product))
    }

    fn set_line_property(&self, state: &Lines, id: &LineId, edit: &LineEdit) -> Lines {
        if !state.contains(id) {
            debug!(line_id = %id, property = edit.property(), "edit for unknown line ignored");
            return state.clone();
        }
        state.replaced(id, |line| edit_line(line, edit))
    }
}

impl Default for LinesReducer {
    fn default() -> Self {
        Self::new(Arc::new(UuidLineIds))
    }
}

impl core::fmt::Debug for LinesReducer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinesReducer").finish_non_exhaustive()
    }
}

impl Transition for LinesReducer {
    type State = Lines;
    type Action = LineAction;

    fn initial_state(&self) -> Lines {
        Lines::new()
    }

    fn apply(&self, state: &Lines, action: &LineAction) -> Lines {
        debug!(action = action.tag(), line_id = ?action.line_id(), "applying line action");
        match action {
            LineAction::AddLine => self.add_line(state),
            LineAction::DeleteLine(id) => self.delete_line(state, id),
            LineAction::UpdateLineFromProduct { id, product } => {
                self.update_line_from_product(state, id, product)
            }
            LineAction::SetLineProperty { id, edit } => self.set_line_property(state, id, edit),
        }
    }
}

/// Apply one field edit to a line, recomputing whatever pricing depends on it.
pub fn edit_line(line: &LineItem, edit: &LineEdit) -> LineItem {
    match edit {
        LineEdit::Product(product) => LineItem {
            product: product.clone(),
            line_type: LineType::Product,
            ..line.clone()
        },
        LineEdit::Text(text) => LineItem {
            text: text.clone(),
            ..line.clone()
        },
        LineEdit::Type(line_type) => change_type(line, *line_type),
        LineEdit::Quantity(input) => {
            let quantity = ensure_numeric(input, 1.0).max(0.0);
            let update = reprice(quantity, line.base_unit_price, line.unit_price, false);
            LineItem {
                quantity,
                ..line.clone()
            }
            .with_pricing(&update)
        }
        LineEdit::UnitPrice(input) => {
            let unit_price = ensure_numeric(input, line.base_unit_price);
            line.clone()
                .with_pricing(&reprice(line.quantity, line.base_unit_price, unit_price, true))
        }
        LineEdit::DiscountPercent(input) => {
            let percent = ensure_numeric(input, 0.0).clamp(0.0, 100.0);
            let unit_price = line.base_unit_price * (1.0 - percent / 100.0);
            line.clone()
                .with_pricing(&reprice(line.quantity, line.base_unit_price, unit_price, true))
        }
        LineEdit::DiscountAmount(input) => {
            let amount = ensure_numeric(input, 0.0).max(0.0);
            let unit_price = per_unit(line, amount)
                .map(|discount| line.base_unit_price - discount)
                .unwrap_or(line.unit_price);
            line.clone()
                .with_pricing(&reprice(line.quantity, line.base_unit_price, unit_price, true))
        }
        LineEdit::Total(input) => {
            let fallback = line.quantity * line.base_unit_price;
            let total = round2(ensure_numeric(input, fallback));
            let unit_price = per_unit(line, total).unwrap_or(line.unit_price);
            line.clone()
                .with_pricing(&reprice(line.quantity, line.base_unit_price, unit_price, true))
        }
    }
}

// Quantity 0 leaves no per-unit basis to spread an amount over.
fn per_unit(line: &LineItem, amount: f64) -> Option<f64> {
    (line.quantity > 0.0).then(|| amount / line.quantity)
}

fn reprice(
    quantity: f64,
    base_unit_price: f64,
    candidate_unit_price: f64,
    set_unit_price: bool,
) -> PricingUpdate {
    let update = recalculate(
        PricingBasis {
            quantity,
            base_unit_price,
            candidate_unit_price,
        },
        set_unit_price,
    );
    trace!(?update, "line repriced");
    update
}

fn change_type(line: &LineItem, line_type: LineType) -> LineItem {
    let mut next = LineItem {
        line_type,
        errors: None,
        ..line.clone()
    };

    if matches!(line_type, LineType::Other | LineType::Text) {
        next.product = None;
        next.sku = None;
    }

    if line_type == LineType::Text {
        next.quantity = 0.0;
        next = next.with_pricing(&reprice(0.0, line.base_unit_price, 0.0, true));
    }

    next
}

/// Adopt catalog data for a line whose lookup reached the catalog.
///
/// Catalog pricing is only taken over while the line still has no unit price.
/// A user-entered price is kept and repriced at the looked-up quantity.
fn merge_product(line: &LineItem, product: &ResolvedProduct) -> LineItem {
    let mut next = LineItem {
        sku: product.sku.clone(),
        text: product.name.clone(),
        quantity: product.quantity,
        step: product.purchase_multiple,
        errors: product.errors.clone(),
        ..line.clone()
    };

    if line.unit_price == 0.0 {
        next.base_unit_price = product.base_unit_price.value;
        next.unit_price_includes_tax = product.unit_price.includes_tax;
        let update = reprice(next.quantity, next.base_unit_price, product.unit_price.value, true);
        next.with_pricing(&update)
    } else {
        let update = reprice(next.quantity, next.base_unit_price, next.unit_price, false);
        next.with_pricing(&update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{CatalogPrice, TaxedPrice};
    use crate::line::ProductRef;
    use crate::pricing::{DiscountPercent, FieldInput};
    use draftorder_core::SequentialLineIds;
    use proptest::prelude::*;

    fn reducer() -> LinesReducer {
        LinesReducer::new(Arc::new(SequentialLineIds::new("t")))
    }

    fn id(s: &str) -> LineId {
        s.parse().unwrap()
    }

    fn priced_line(line_id: &str, quantity: f64, base: f64, unit: f64) -> LineItem {
        LineItem {
            quantity,
            base_unit_price: base,
            ..LineItem::new_default(id(line_id))
        }
        .with_pricing(&reprice(quantity, base, unit, true))
    }

    fn state_of(lines: Vec<LineItem>) -> Lines {
        Lines::try_from(lines).unwrap()
    }

    fn set(state: &Lines, line_id: &str, edit: LineEdit) -> LineItem {
        let next = reducer().apply(state, &LineAction::set(id(line_id), edit));
        next.get(&id(line_id)).cloned().unwrap()
    }

    fn catalog_product() -> ResolvedProduct {
        ResolvedProduct {
            sku: Some("SKU-1".to_string()),
            errors: None,
            quantity: 3.0,
            base_unit_price: CatalogPrice { value: 10.0 },
            unit_price: TaxedPrice {
                value: 9.0,
                includes_tax: true,
            },
            name: Some("Widget".to_string()),
            purchase_multiple: Some(3.0),
        }
    }

    #[test]
    fn add_line_appends_default_line() {
        let reducer = reducer();
        let state = reducer.apply(&reducer.initial_state(), &LineAction::AddLine);
        let state = reducer.apply(&state, &LineAction::AddLine);

        assert_eq!(state.len(), 2);
        let ids: Vec<&str> = state.ids().map(LineId::as_str).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
        assert_eq!(state.as_slice()[1].quantity, 1.0);
    }

    #[test]
    fn add_line_skips_ids_already_present() {
        let state = state_of(vec![LineItem::new_default(id("t1"))]);
        let next = reducer().apply(&state, &LineAction::AddLine);
        let ids: Vec<&str> = next.ids().map(LineId::as_str).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
    }

    #[test]
    fn default_lines_draw_ids_from_the_source() {
        let reducer = reducer();
        let first = reducer.create_default_line();
        let second = reducer.create_default_line();

        assert_eq!(first.id.as_str(), "t1");
        assert_eq!(second.id.as_str(), "t2");
        assert_eq!(first.line_type, LineType::Product);
        assert_eq!(first.quantity, 1.0);
    }

    struct StuckIds;

    impl LineIdSource for StuckIds {
        fn next_id(&self) -> LineId {
            id("t1")
        }
    }

    #[test]
    fn add_line_gives_up_on_a_source_that_only_repeats_ids() {
        let reducer = LinesReducer::new(Arc::new(StuckIds));
        let state = reducer.apply(&reducer.initial_state(), &LineAction::AddLine);
        assert_eq!(state.len(), 1);

        let next = reducer.apply(&state, &LineAction::AddLine);
        assert_eq!(next, state);
    }

    #[test]
    fn delete_line_removes_only_the_match() {
        let state = state_of(vec![
            priced_line("a", 1.0, 5.0, 5.0),
            priced_line("b", 2.0, 5.0, 5.0),
            priced_line("c", 3.0, 5.0, 5.0),
        ]);
        let next = reducer().apply(&state, &LineAction::DeleteLine(id("b")));

        assert_eq!(next.as_slice(), &[state.as_slice()[0].clone(), state.as_slice()[2].clone()]);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn unknown_line_id_is_a_no_op() {
        let state = state_of(vec![priced_line("a", 1.0, 5.0, 5.0)]);
        let reducer = reducer();

        let actions = [
            LineAction::DeleteLine(id("zz")),
            LineAction::set(id("zz"), LineEdit::Quantity(FieldInput::Number(4.0))),
            LineAction::UpdateLineFromProduct {
                id: id("zz"),
                product: catalog_product(),
            },
        ];
        for action in &actions {
            assert_eq!(reducer.apply(&state, action), state);
        }
    }

    #[test]
    fn discount_percent_edit_reprices_line() {
        let state = state_of(vec![priced_line("a", 2.0, 10.0, 10.0)]);
        let line = set(&state, "a", LineEdit::DiscountPercent(FieldInput::Number(20.0)));

        assert_eq!(line.unit_price, 8.0);
        assert_eq!(line.total, 16.0);
        assert_eq!(line.discount_amount, 4.0);
        assert_eq!(line.discount_percent.to_string(), "20.00");
    }

    #[test]
    fn discount_percent_is_clamped_to_range() {
        let state = state_of(vec![priced_line("a", 2.0, 10.0, 10.0)]);

        let line = set(&state, "a", LineEdit::DiscountPercent(FieldInput::Number(150.0)));
        assert_eq!(line.unit_price, 0.0);
        assert_eq!(line.discount_percent.to_string(), "100.00");

        let line = set(&state, "a", LineEdit::DiscountPercent(FieldInput::from("-3")));
        assert_eq!(line.unit_price, 10.0);
        assert_eq!(line.discount_percent, DiscountPercent::ZERO);
    }

    #[test]
    fn negative_quantity_is_clamped_to_zero() {
        let state = state_of(vec![priced_line("a", 2.0, 10.0, 10.0)]);
        let line = set(&state, "a", LineEdit::Quantity(FieldInput::Number(-5.0)));

        assert_eq!(line.quantity, 0.0);
        assert_eq!(line.total, 0.0);
        assert_eq!(line.discount_amount, 0.0);
        assert_eq!(line.discount_percent, DiscountPercent::ZERO);
    }

    #[test]
    fn unparseable_quantity_defaults_to_one() {
        let state = state_of(vec![priced_line("a", 4.0, 10.0, 7.5)]);
        let line = set(&state, "a", LineEdit::Quantity(FieldInput::from("lots")));

        assert_eq!(line.quantity, 1.0);
        assert_eq!(line.unit_price, 7.5);
        assert_eq!(line.total, 7.5);
        assert_eq!(line.discount_amount, 2.5);
        assert_eq!(line.discount_percent.to_string(), "25.00");
    }

    #[test]
    fn unit_price_edit_falls_back_to_base_price() {
        let state = state_of(vec![priced_line("a", 3.0, 10.0, 6.0)]);

        let line = set(&state, "a", LineEdit::UnitPrice(FieldInput::from("n/a")));
        assert_eq!(line.unit_price, 10.0);
        assert_eq!(line.total, 30.0);
        assert_eq!(line.discount_amount, 0.0);

        let line = set(&state, "a", LineEdit::UnitPrice(FieldInput::from("12")));
        assert_eq!(line.unit_price, 12.0);
        assert_eq!(line.total, 36.0);
        assert_eq!(line.discount_amount, 0.0);
        assert_eq!(line.discount_percent, DiscountPercent::ZERO);
    }

    #[test]
    fn discount_amount_edit_spreads_over_quantity() {
        let state = state_of(vec![priced_line("a", 4.0, 10.0, 10.0)]);
        let line = set(&state, "a", LineEdit::DiscountAmount(FieldInput::Number(6.0)));

        assert_eq!(line.unit_price, 8.5);
        assert_eq!(line.total, 34.0);
        assert_eq!(line.discount_amount, 6.0);
        assert_eq!(line.discount_percent.to_string(), "15.00");

        let line = set(&state, "a", LineEdit::DiscountAmount(FieldInput::Number(-6.0)));
        assert_eq!(line.unit_price, 10.0);
        assert_eq!(line.discount_amount, 0.0);
    }

    #[test]
    fn amount_edits_on_zero_quantity_keep_unit_price() {
        let state = state_of(vec![priced_line("a", 0.0, 10.0, 8.0)]);

        let line = set(&state, "a", LineEdit::DiscountAmount(FieldInput::Number(5.0)));
        assert_eq!(line.unit_price, 8.0);
        assert_eq!(line.total, 0.0);
        assert!(line.discount_amount.is_finite());

        let line = set(&state, "a", LineEdit::Total(FieldInput::Number(50.0)));
        assert_eq!(line.unit_price, 8.0);
        assert_eq!(line.total, 0.0);
        assert_eq!(line.discount_percent, DiscountPercent::ZERO);
    }

    #[test]
    fn total_edit_derives_unit_price() {
        let state = state_of(vec![priced_line("a", 4.0, 10.0, 10.0)]);

        let line = set(&state, "a", LineEdit::Total(FieldInput::from("30.004")));
        assert_eq!(line.unit_price, 7.5);
        assert_eq!(line.total, 30.0);
        assert_eq!(line.discount_amount, 10.0);
        assert_eq!(line.discount_percent.to_string(), "25.00");

        let line = set(&state, "a", LineEdit::Total(FieldInput::Empty));
        assert_eq!(line.unit_price, 10.0);
        assert_eq!(line.total, 40.0);
        assert_eq!(line.discount_amount, 0.0);
    }

    #[test]
    fn switching_to_text_clears_pricing_and_product() {
        let line = LineItem {
            product: Some(ProductRef(serde_json::json!({"id": 7}))),
            sku: Some("SKU-7".to_string()),
            errors: Some(vec!["stale".to_string()]),
            ..priced_line("a", 2.0, 10.0, 9.0)
        };
        let state = state_of(vec![line]);
        let line = set(&state, "a", LineEdit::Type(LineType::Text));

        assert_eq!(line.line_type, LineType::Text);
        assert_eq!(line.quantity, 0.0);
        assert_eq!(line.unit_price, 0.0);
        assert_eq!(line.base_unit_price, 10.0);
        assert_eq!(line.total, 0.0);
        assert_eq!(line.discount_amount, 0.0);
        assert_eq!(line.discount_percent, DiscountPercent::ZERO);
        assert!(line.product.is_none());
        assert!(line.sku.is_none());
        assert!(line.errors.is_none());
    }

    #[test]
    fn switching_to_other_keeps_pricing() {
        let line = LineItem {
            product: Some(ProductRef(serde_json::json!({"id": 7}))),
            sku: Some("SKU-7".to_string()),
            ..priced_line("a", 2.0, 10.0, 9.0)
        };
        let before = line.clone();
        let state = state_of(vec![line]);
        let line = set(&state, "a", LineEdit::Type(LineType::Other));

        assert_eq!(line.line_type, LineType::Other);
        assert!(line.product.is_none());
        assert!(line.sku.is_none());
        assert_eq!(line.quantity, before.quantity);
        assert_eq!(line.unit_price, before.unit_price);
        assert_eq!(line.total, before.total);
    }

    #[test]
    fn product_edit_forces_product_type() {
        let line = LineItem {
            line_type: LineType::Other,
            ..priced_line("a", 1.0, 4.0, 4.0)
        };
        let state = state_of(vec![line]);
        let product = ProductRef(serde_json::json!({"id": 42, "text": "Widget"}));
        let line = set(&state, "a", LineEdit::Product(Some(product.clone())));

        assert_eq!(line.line_type, LineType::Product);
        assert_eq!(line.product, Some(product));
        assert_eq!(line.total, 4.0);
    }

    #[test]
    fn clearing_the_product_keeps_a_product_line() {
        let line = LineItem {
            line_type: LineType::Other,
            product: Some(ProductRef(serde_json::json!({"id": 42}))),
            ..priced_line("a", 2.0, 4.0, 3.0)
        };
        let before = line.clone();
        let state = state_of(vec![line]);
        let line = set(&state, "a", LineEdit::Product(None));

        assert!(line.product.is_none());
        assert_eq!(line.line_type, LineType::Product);
        assert_eq!(line.total, before.total);
        assert_eq!(line.unit_price, before.unit_price);
    }

    #[test]
    fn text_edit_sets_text_only() {
        let state = state_of(vec![priced_line("a", 1.0, 4.0, 4.0)]);
        let line = set(&state, "a", LineEdit::Text(Some("Gift wrap".to_string())));
        assert_eq!(line.text.as_deref(), Some("Gift wrap"));
        assert_eq!(line.total, 4.0);
    }

    #[test]
    fn product_lookup_prices_an_unpriced_line() {
        let state = state_of(vec![LineItem::new_default(id("a"))]);
        let next = reducer().apply(
            &state,
            &LineAction::UpdateLineFromProduct {
                id: id("a"),
                product: catalog_product(),
            },
        );
        let line = next.get(&id("a")).unwrap();

        assert_eq!(line.sku.as_deref(), Some("SKU-1"));
        assert_eq!(line.text.as_deref(), Some("Widget"));
        assert_eq!(line.quantity, 3.0);
        assert_eq!(line.step, Some(3.0));
        assert_eq!(line.base_unit_price, 10.0);
        assert_eq!(line.unit_price, 9.0);
        assert!(line.unit_price_includes_tax);
        assert_eq!(line.total, 27.0);
        assert_eq!(line.discount_amount, 3.0);
        assert_eq!(line.discount_percent.to_string(), "10.00");
    }

    #[test]
    fn product_lookup_keeps_a_customised_price() {
        let state = state_of(vec![priced_line("a", 1.0, 20.0, 15.0)]);
        let next = reducer().apply(
            &state,
            &LineAction::UpdateLineFromProduct {
                id: id("a"),
                product: catalog_product(),
            },
        );
        let line = next.get(&id("a")).unwrap();

        assert_eq!(line.unit_price, 15.0);
        assert_eq!(line.base_unit_price, 20.0);
        assert!(!line.unit_price_includes_tax);
        assert_eq!(line.sku.as_deref(), Some("SKU-1"));
        assert_eq!(line.quantity, 3.0);
        assert_eq!(line.total, 45.0);
        assert_eq!(line.discount_amount, 15.0);
        assert_eq!(line.discount_percent.to_string(), "25.00");
    }

    #[test]
    fn product_lookup_reprices_a_hand_priced_line_at_the_new_quantity() {
        let reducer = reducer();
        let state = reducer.apply(&reducer.initial_state(), &LineAction::AddLine);
        let state = reducer.apply(
            &state,
            &LineAction::set(id("t1"), LineEdit::UnitPrice(FieldInput::Number(5.0))),
        );
        let product = ResolvedProduct {
            quantity: 4.0,
            base_unit_price: CatalogPrice { value: 10.0 },
            unit_price: TaxedPrice {
                value: 10.0,
                includes_tax: false,
            },
            ..catalog_product()
        };
        let next = reducer.apply(&state, &LineAction::UpdateLineFromProduct { id: id("t1"), product });
        let line = next.get(&id("t1")).unwrap();

        assert_eq!(line.quantity, 4.0);
        assert_eq!(line.unit_price, 5.0);
        assert_eq!(line.base_unit_price, 0.0);
        assert_eq!(line.total, 20.0);
        assert_eq!(line.discount_amount, 0.0);
        assert_eq!(line.discount_percent, DiscountPercent::ZERO);
    }

    #[test]
    fn failed_product_lookup_only_records_errors() {
        let before = priced_line("a", 2.0, 10.0, 9.0);
        let state = state_of(vec![before.clone()]);
        let next = reducer().apply(
            &state,
            &LineAction::UpdateLineFromProduct {
                id: id("a"),
                product: ResolvedProduct::failed(vec!["not found".to_string()]),
            },
        );
        let line = next.get(&id("a")).unwrap();

        assert_eq!(line.errors, Some(vec!["not found".to_string()]));
        assert_eq!(
            LineItem {
                errors: None,
                ..line.clone()
            },
            before
        );
    }

    #[test]
    fn empty_sku_counts_as_failed_lookup() {
        let state = state_of(vec![LineItem::new_default(id("a"))]);
        let product = ResolvedProduct {
            sku: Some(String::new()),
            ..catalog_product()
        };
        let next = reducer().apply(&state, &LineAction::UpdateLineFromProduct { id: id("a"), product });
        let line = next.get(&id("a")).unwrap();
        assert_eq!(line.quantity, 1.0);
        assert!(line.sku.is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: deleting a line keeps every other line, in order and unchanged.
        #[test]
        fn delete_preserves_order_of_remaining_lines(
            count in 1usize..12,
            victim_seed in any::<usize>(),
        ) {
            let reducer = reducer();
            let mut state = reducer.initial_state();
            for _ in 0..count {
                state = reducer.apply(&state, &LineAction::AddLine);
            }
            let victim = state.as_slice()[victim_seed % count].id.clone();

            let next = reducer.apply(&state, &LineAction::DeleteLine(victim.clone()));

            let expected: Vec<LineItem> = state
                .iter()
                .filter(|line| line.id != victim)
                .cloned()
                .collect();
            prop_assert_eq!(next.len(), count - 1);
            prop_assert_eq!(next.as_slice(), expected.as_slice());
        }

        /// Property: a quantity edit never stores a negative quantity and keeps
        /// the total consistent with the unit price.
        #[test]
        fn quantity_edits_keep_total_consistent(
            quantity in -1_000i32..1_000,
            base_cents in 0u32..100_000,
        ) {
            let base = base_cents as f64 / 100.0;
            let state = state_of(vec![priced_line("a", 1.0, base, base)]);
            let line = set(&state, "a", LineEdit::Quantity(FieldInput::Number(quantity as f64)));

            prop_assert!(line.quantity >= 0.0);
            prop_assert_eq!(line.total, round2(line.quantity * line.unit_price));
            prop_assert_eq!(line.discount_amount, 0.0);
        }
    }
}
