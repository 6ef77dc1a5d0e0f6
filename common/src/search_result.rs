//! Response models for the dataset service endpoints.

use serde::{Deserialize, Deserializer, Serialize, de::{self, Visitor}};

use crate::facet::Facet;


/// One matched record. The service emits spreadsheet cells as-is, so any
/// field may arrive as a number or bool; those are kept in their text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResultRow {
    #[serde(default, deserialize_with = "lenient_string")]
    pub item_no: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_division: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub material_group: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub material_group_desc: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub manufacturer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub manufacturer_item_no: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sales_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_manager: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sub_item: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a string, number, bool or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, deserializer: D2) -> Result<Self::Value, D2::Error> {
            deserializer.deserialize_any(LenientVisitor)
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<ResultRow>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub no_match: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SearchResponse {
    pub fn is_no_match(&self) -> bool {
        self.no_match || self.results.is_empty()
    }
}


/// Full option universes as computed by the service over the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FacetLists {
    pub manufacturers: Vec<String>,
    pub product_divisions: Vec<String>,
    pub sales_statuses: Vec<String>,
    pub product_managers: Vec<String>,
    pub sub_items: Vec<String>,
    pub material_groups: Vec<String>,
    pub material_group_descs: Vec<String>,
}

impl FacetLists {
    pub fn get(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Manufacturer => &self.manufacturers,
            Facet::ProductDivision => &self.product_divisions,
            Facet::SalesStatus => &self.sales_statuses,
            Facet::ProductManager => &self.product_managers,
            Facet::SubItem => &self.sub_items,
            Facet::MaterialGroup => &self.material_groups,
            Facet::MaterialGroupDesc => &self.material_group_descs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FiltersResponse {
    #[serde(default)]
    pub filters: FacetLists,
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub row_count: Option<u64>,
}

/// Shape of error bodies and of the `/clear` reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ServerMessage {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}
