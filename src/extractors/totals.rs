// src/extractors/totals.rs
//! Price lookup for the total-value category.

use roxmltree::{Document, Node};

use super::normalize::{format_brl, join_values, parse_decimal};
use super::values::{GROUPING_TAG, MARKER_ATTR};
use crate::models::{CategoryRecord, TotalValueSpec};
use crate::utils::error::ExtractError;

pub const TOTALS_TAG: &str = "TOTALPRICES";
pub const AMBIENT_TAG: &str = "AMBIENT";

/// Price attributes of a `TOTALPRICES` element. The export calls the
/// factory cost the price "table" and the sale value the "budget".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    FactoryCost,
    SaleValue,
}

impl PriceField {
    pub fn attribute(&self) -> &'static str {
        match self {
            PriceField::FactoryCost => "TABLE",
            PriceField::SaleValue => "BUDGET",
        }
    }
}

type ResolveFn = fn(&Document, PriceField) -> Result<Option<f64>, ExtractError>;

/// One place in the document a price can be read from.
pub struct PriceResolver {
    pub name: &'static str,
    pub resolve: ResolveFn,
}

/// Lookup order: the first resolver yielding a number wins.
pub static PRICE_RESOLVERS: [PriceResolver; 3] = [
    PriceResolver { name: "root_total", resolve: root_total },
    PriceResolver { name: "environment_total", resolve: environment_total },
    PriceResolver { name: "category_sum", resolve: category_sum },
];

/// Resolves one price field through `resolvers`, returning the amount and
/// the name of the resolver that produced it.
pub fn resolve_price(
    document: &Document,
    field: PriceField,
    resolvers: &[PriceResolver],
) -> Result<Option<(f64, &'static str)>, ExtractError> {
    for resolver in resolvers {
        if let Some(amount) = (resolver.resolve)(document, field)? {
            tracing::debug!("{:?} resolved by {}: {}", field, resolver.name, amount);
            return Ok(Some((amount, resolver.name)));
        }
        tracing::trace!("{:?} not found at {}", field, resolver.name);
    }
    Ok(None)
}

pub fn extract_total_value(document: &Document) -> Result<Option<TotalValueSpec>, ExtractError> {
    let factory = resolve_price(document, PriceField::FactoryCost, &PRICE_RESOLVERS)?;
    let sale = resolve_price(document, PriceField::SaleValue, &PRICE_RESOLVERS)?;

    let source = join_values(
        [factory, sale]
            .iter()
            .flatten()
            .map(|(_, name)| name.to_string()),
    );

    let factory_cost = factory.map(|(amount, _)| formatted(amount, PriceField::FactoryCost)).transpose()?;
    let sale_value = sale.map(|(amount, _)| formatted(amount, PriceField::SaleValue)).transpose()?;

    Ok(TotalValueSpec::build(|field| match field {
        "factory_cost" => factory_cost.clone(),
        "sale_value" => sale_value.clone(),
        "source" => source.clone(),
        _ => None,
    }))
}

fn formatted(amount: f64, field: PriceField) -> Result<String, ExtractError> {
    format_brl(amount).ok_or_else(|| ExtractError::InvalidNumber {
        location: format!("{} {}", TOTALS_TAG, field.attribute()),
        value: amount.to_string(),
    })
}

/// First parseable amount among `TOTALPRICES` children of `parent`.
/// Unparseable values fall through to the next location.
fn first_total(parent: Node, field: PriceField) -> Option<f64> {
    parent
        .children()
        .filter(|node| node.has_tag_name(TOTALS_TAG))
        .filter_map(|node| node.attribute(field.attribute()))
        .find_map(|raw| {
            let parsed = parse_decimal(raw);
            if parsed.is_none() {
                tracing::debug!("Ignoring unparseable {} '{}'", field.attribute(), raw);
            }
            parsed
        })
}

fn root_total(document: &Document, field: PriceField) -> Result<Option<f64>, ExtractError> {
    Ok(first_total(document.root_element(), field))
}

fn environment_total(document: &Document, field: PriceField) -> Result<Option<f64>, ExtractError> {
    Ok(document
        .descendants()
        .find(|node| node.has_tag_name(AMBIENT_TAG))
        .and_then(|ambient| first_total(ambient, field)))
}

/// Sum of the subtotals of outermost category groupings. A subtotal that is
/// present but not a number fails the whole lookup.
fn category_sum(document: &Document, field: PriceField) -> Result<Option<f64>, ExtractError> {
    let mut total = None;

    let outermost = document.descendants().filter(|node| {
        node.has_tag_name(GROUPING_TAG)
            && !node.ancestors().skip(1).any(|a| a.has_tag_name(GROUPING_TAG))
    });

    for grouping in outermost {
        let subtotals = grouping
            .children()
            .filter(|node| node.has_tag_name(TOTALS_TAG))
            .filter_map(|node| node.attribute(field.attribute()));

        for raw in subtotals {
            let amount = parse_decimal(raw).ok_or_else(|| ExtractError::InvalidNumber {
                location: format!(
                    "{} {} of '{}'",
                    TOTALS_TAG,
                    field.attribute(),
                    grouping.attribute(MARKER_ATTR).unwrap_or("?")
                ),
                value: raw.to_string(),
            })?;
            *total.get_or_insert(0.0) += amount;
        }
    }

    match total {
        Some(sum) if !sum.is_finite() => Err(ExtractError::InvalidNumber {
            location: format!("sum of {} {} subtotals", TOTALS_TAG, field.attribute()),
            value: sum.to_string(),
        }),
        _ => Ok(total),
    }
}
