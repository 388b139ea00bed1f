//! Facet scope policy.
//!
//! Brand/size/condition facets can be computed either over in-stock
//! products only (the default -- filter dropdowns should offer what can
//! actually be bought) or over everything. The policy is a deployment
//! choice, set once via configuration.

use std::str::FromStr;

/// Which products brand/size/condition facets are computed over.
///
/// The `statuses` facet is always computed over all products regardless of
/// this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacetScope {
    /// Facets reflect products with the in-stock status only.
    #[default]
    InStockOnly,
    /// Facets reflect every product.
    AllProducts,
}

impl FromStr for FacetScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_stock" => Ok(FacetScope::InStockOnly),
            "all" => Ok(FacetScope::AllProducts),
            other => Err(format!(
                "Invalid facet scope '{other}'. Expected 'in_stock' or 'all'"
            )),
        }
    }
}
