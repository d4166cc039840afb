//! Typed views of known CompTox response shapes.
//!
//! # Design
//! Resource methods return the service's JSON unmodified. These records are
//! an opt-in layer on top: decode a `Value` with [`decode`] when you want
//! typed fields. Every field is optional because the service leaves many of
//! them null, and unknown fields are ignored so new server fields don't break
//! decoding.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// Decode a response document into a typed record (or `Vec` of records).
pub fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, ApiError> {
    T::deserialize(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// One hit from the start-with / equal / contain searches.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalSearchHit {
    pub casrn: Option<String>,
    pub dtxsid: Option<String>,
    pub dtxcid: Option<String>,
    pub preferred_name: Option<String>,
    pub has_structure_image: Option<i64>,
    pub smiles: Option<String>,
    pub is_markush: Option<bool>,
    pub search_name: Option<String>,
    pub search_value: Option<String>,
    pub rank: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalUseProbability {
    pub harmonized_functional_use: Option<String>,
    pub probability: Option<f64>,
}

/// A reported functional use from a source document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionalUseRecord {
    pub id: Option<i64>,
    pub dtxsid: Option<String>,
    pub datatype: Option<String>,
    pub docid: Option<i64>,
    pub doctitle: Option<String>,
    pub docdate: Option<String>,
    pub reportedfunction: Option<String>,
    pub functioncategory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductUseCategory {
    pub id: Option<i64>,
    #[serde(rename = "kindName")]
    pub kind_name: Option<String>,
    #[serde(rename = "genCat")]
    pub gen_cat: Option<String>,
    pub prodfam: Option<String>,
    pub prodtype: Option<String>,
    pub definition: Option<String>,
}

/// One product composition record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductDataRecord {
    pub id: Option<i64>,
    pub dtxsid: Option<String>,
    pub docid: Option<i64>,
    pub doctitle: Option<String>,
    pub docdate: Option<String>,
    pub productname: Option<String>,
    pub gencat: Option<String>,
    pub prodfam: Option<String>,
    pub prodtype: Option<String>,
    pub classificationmethod: Option<String>,
    pub rawmincomp: Option<String>,
    pub rawmaxcomp: Option<String>,
    pub rawcentralcomp: Option<String>,
    pub unittype: Option<String>,
    pub lowerweightfraction: Option<f64>,
    pub upperweightfraction: Option<f64>,
    pub centralweightfraction: Option<f64>,
    pub weightfractiontype: Option<String>,
    pub component: Option<String>,
}

/// A high-throughput toxicokinetics parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttkRecord {
    pub id: Option<i64>,
    pub dtxsid: Option<String>,
    pub parameter: Option<String>,
    pub measured_text: Option<String>,
    pub measured: Option<f64>,
    pub predicted_text: Option<String>,
    pub predicted: Option<f64>,
    pub units: Option<String>,
    pub model: Option<String>,
    pub reference: Option<String>,
    pub percentile: Option<String>,
    pub species: Option<String>,
    pub data_source_species: Option<String>,
    pub data_version: Option<String>,
    pub import_date: Option<String>,
}

/// A ToxValDB hazard value. Only the commonly used columns are mapped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardRecord {
    pub id: Option<i64>,
    pub dtxsid: Option<String>,
    pub source: Option<String>,
    pub subsource: Option<String>,
    pub year: Option<String>,
    pub toxval_type: Option<String>,
    pub toxval_subtype: Option<String>,
    pub toxval_numeric: Option<f64>,
    pub toxval_numeric_qualifier: Option<String>,
    pub toxval_units: Option<String>,
    pub study_type: Option<String>,
    pub study_duration_value: Option<f64>,
    pub study_duration_class: Option<String>,
    pub study_duration_units: Option<String>,
    pub risk_assessment_class: Option<String>,
    pub exposure_route: Option<String>,
    pub critical_effect: Option<String>,
    pub species_common: Option<String>,
    pub supercategory: Option<String>,
    pub human_eco_nt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FateRecord {
    pub id: Option<i64>,
    pub dtxsid: Option<String>,
    pub value_type: Option<String>,
    pub endpoint_name: Option<String>,
    pub result_value: Option<f64>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub unit: Option<String>,
    pub model_source: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_search_hits() {
        let value = json!([{
            "casrn": "80-05-7",
            "dtxsid": "DTXSID7020182",
            "preferredName": "Bisphenol A",
            "isMarkush": false,
            "rank": 1,
            "unknownField": "ignored"
        }]);
        let hits: Vec<ChemicalSearchHit> = decode(&value).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].preferred_name.as_deref(), Some("Bisphenol A"));
        assert_eq!(hits[0].is_markush, Some(false));
        assert_eq!(hits[0].smiles, None);
    }

    #[test]
    fn decodes_single_record() {
        let value = json!({"harmonizedFunctionalUse": "plasticizer", "probability": 0.75});
        let record: FunctionalUseProbability = decode(&value).unwrap();
        assert_eq!(record.harmonized_functional_use.as_deref(), Some("plasticizer"));
        assert_eq!(record.probability, Some(0.75));
    }

    #[test]
    fn shape_mismatch_is_decode_error() {
        let err = decode::<Vec<HazardRecord>>(&json!({"dtxsid": "X"})).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn product_category_uses_service_names() {
        let value = json!({"id": 3, "kindName": "Formulation", "genCat": "Home", "definition": null});
        let puc: ProductUseCategory = decode(&value).unwrap();
        assert_eq!(puc.kind_name.as_deref(), Some("Formulation"));
        assert_eq!(puc.gen_cat.as_deref(), Some("Home"));
        assert_eq!(puc.definition, None);
    }
}
