//! The fixed set of categorical facets a dataset can be narrowed by.

use serde::{Deserialize, Serialize};

use crate::search_result::ResultRow;


/// One of the seven facet dimensions. Serializes as the singular wire key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Manufacturer,
    ProductDivision,
    SalesStatus,
    ProductManager,
    SubItem,
    MaterialGroup,
    MaterialGroupDesc,
}

impl Facet {
    /// Display order of the facet panels.
    pub const ALL: [Facet; 7] = [
        Facet::Manufacturer,
        Facet::ProductDivision,
        Facet::SalesStatus,
        Facet::ProductManager,
        Facet::SubItem,
        Facet::MaterialGroup,
        Facet::MaterialGroupDesc,
    ];

    /// Key used in `/search` and `/export` request bodies.
    pub fn wire_key(self) -> &'static str {
        match self {
            Facet::Manufacturer => "manufacturer",
            Facet::ProductDivision => "product_division",
            Facet::SalesStatus => "sales_status",
            Facet::ProductManager => "product_manager",
            Facet::SubItem => "sub_item",
            Facet::MaterialGroup => "material_group",
            Facet::MaterialGroupDesc => "material_group_desc",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Facet::Manufacturer => "Manufacturer",
            Facet::ProductDivision => "Product Division",
            Facet::SalesStatus => "Sales Status",
            Facet::ProductManager => "Product Manager",
            Facet::SubItem => "Sub Item",
            Facet::MaterialGroup => "Material Group",
            Facet::MaterialGroupDesc => "Material Group Desc",
        }
    }

    /// The row field this facet is derived from.
    pub fn row_value(self, row: &ResultRow) -> Option<&str> {
        let value = match self {
            Facet::Manufacturer => &row.manufacturer_name,
            Facet::ProductDivision => &row.product_division,
            Facet::SalesStatus => &row.sales_status,
            Facet::ProductManager => &row.product_manager,
            Facet::SubItem => &row.sub_item,
            Facet::MaterialGroup => &row.material_group,
            Facet::MaterialGroupDesc => &row.material_group_desc,
        };
        value.as_deref()
    }
}
