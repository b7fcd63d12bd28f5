//! Portal export records

use base64::Engine;
use serde::{Deserialize, Serialize};
use sumsub_core::{AddressData, ApplicantData, ApplicantInfo};

/// Prefix of every embedded image
pub const IMAGE_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// One user in portal format.
///
/// Top-level keys are always present in the JSON output, `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalUserData {
    pub user_xid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub individual: Option<PortalIndividualData>,
    #[serde(default)]
    pub address: Option<PortalAddressData>,
    #[serde(default)]
    pub document: Option<PortalDocumentData>,
}

impl PortalUserData {
    /// Project an applicant. The document is filled in separately.
    pub fn from_applicant(applicant: &ApplicantData) -> Self {
        let info = applicant.info.as_ref();

        Self {
            user_xid: applicant.external_user_id.clone(),
            email: info.and_then(|i| i.email.clone()),
            user_name: info.and_then(user_name),
            individual: info.map(PortalIndividualData::from),
            address: info.and_then(ApplicantInfo::address).map(PortalAddressData::from),
            document: None,
        }
    }

    pub fn with_document(mut self, document: PortalDocumentData) -> Self {
        self.document = Some(document);
        self
    }
}

impl From<&ApplicantData> for PortalUserData {
    fn from(applicant: &ApplicantData) -> Self {
        Self::from_applicant(applicant)
    }
}

/// Lowercased first name followed by lowercased last name
fn user_name(info: &ApplicantInfo) -> Option<String> {
    let first = info.first_name.as_deref().filter(|s| !s.is_empty())?;
    let last = info.last_name.as_deref().unwrap_or_default();
    Some(format!("{}{}", first.to_lowercase(), last.to_lowercase()))
}

/// Personal details
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalIndividualData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Not collected by Sumsub; always absent in projections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    /// Not collected by Sumsub; always absent in projections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<String>,
}

impl From<&ApplicantInfo> for PortalIndividualData {
    fn from(info: &ApplicantInfo) -> Self {
        Self {
            first_name: info.first_name.clone(),
            last_name: info.last_name.clone(),
            date_of_birth: info.dob.clone(),
            occupation: None,
            annual_income: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalAddressData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_code: Option<String>,
    /// Street, building and flat on one line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AddressData> for PortalAddressData {
    fn from(address: &AddressData) -> Self {
        let parts: Vec<String> = [
            address.street.clone(),
            address
                .building_number
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|b| format!("Building {}", b)),
            address
                .flat_number
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(|f| format!("Apt {}", f)),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();

        let details = parts.join(", ").trim().to_string();

        Self {
            country: address.country.clone(),
            city: address.town.clone(),
            post_code: address.post_code.clone(),
            details: (!details.is_empty()).then_some(details),
        }
    }
}

/// Identity document with embedded images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalDocumentData {
    /// Portal type code, see [`PortalDocumentData::type_code`]
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face: Option<String>,
}

impl PortalDocumentData {
    /// Create a document record with no images
    pub fn new(sumsub_type: &str, country: Option<String>) -> Self {
        Self {
            doc_type: Self::type_code(sumsub_type).to_string(),
            number: None,
            country,
            expiry_date: None,
            front: None,
            back: None,
            face: None,
        }
    }

    /// Map a Sumsub document type to the portal's numeric code.
    ///
    /// Matching ignores case; anything unrecognized is `"0"`.
    pub fn type_code(sumsub_type: &str) -> &'static str {
        match sumsub_type.to_uppercase().as_str() {
            "PASSPORT" => "1",
            "ID_CARD" | "IDENTITY" => "2",
            "DRIVERS" | "DRIVERS_LICENSE" => "3",
            _ => "0",
        }
    }

    /// Encode raw image bytes as a JPEG data URI. Empty input gives `None`.
    pub fn image_data_uri(bytes: &[u8]) -> Option<String> {
        if bytes.is_empty() {
            return None;
        }
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Some(format!("{}{}", IMAGE_DATA_URI_PREFIX, encoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn applicant(info: serde_json::Value) -> ApplicantData {
        serde_json::from_value(json!({
            "id": "app-1",
            "externalUserId": "ref-001",
            "createdAt": "2024-01-01 00:00:00",
            "info": info
        }))
        .unwrap()
    }

    #[test]
    fn test_project_applicant() {
        let data = PortalUserData::from_applicant(&applicant(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "dob": "1990-05-01",
            "email": "jane@example.com",
            "addresses": [{
                "country": "DEU",
                "town": "Berlin",
                "postCode": "10115",
                "street": "Invalidenstr.",
                "buildingNumber": "117",
                "flatNumber": 4
            }]
        })));

        assert_eq!(data.user_xid, "ref-001");
        assert_eq!(data.email.as_deref(), Some("jane@example.com"));
        assert_eq!(data.user_name.as_deref(), Some("janedoe"));

        let individual = data.individual.unwrap();
        assert_eq!(individual.first_name.as_deref(), Some("Jane"));
        assert_eq!(individual.date_of_birth.as_deref(), Some("1990-05-01"));
        assert!(individual.occupation.is_none());

        let address = data.address.unwrap();
        assert_eq!(address.city.as_deref(), Some("Berlin"));
        assert_eq!(
            address.details.as_deref(),
            Some("Invalidenstr., Building 117, Apt 4")
        );
        assert!(data.document.is_none());
    }

    #[test]
    fn test_user_name_requires_first_name() {
        let data = PortalUserData::from_applicant(&applicant(json!({ "lastName": "Doe" })));
        assert!(data.user_name.is_none());

        let data = PortalUserData::from_applicant(&applicant(json!({ "firstName": "ANNA" })));
        assert_eq!(data.user_name.as_deref(), Some("anna"));
    }

    #[test]
    fn test_applicant_without_info() {
        let data = PortalUserData::from_applicant(&applicant(json!({})));
        assert!(data.individual.is_none());
        assert!(data.address.is_none());

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            json!({
                "user_xid": "ref-001",
                "email": null,
                "user_name": null,
                "individual": null,
                "address": null,
                "document": null
            })
        );
    }

    #[test]
    fn test_nested_nulls_are_dropped() {
        let individual = PortalIndividualData {
            first_name: Some("Jane".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&individual).unwrap(),
            json!({ "first_name": "Jane" })
        );

        let doc = PortalDocumentData::new("PASSPORT", None);
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({ "type": "1" }));
    }

    #[test]
    fn test_empty_address_details() {
        let address: AddressData = serde_json::from_value(json!({ "country": "FRA" })).unwrap();
        let portal = PortalAddressData::from(&address);
        assert_eq!(portal.country.as_deref(), Some("FRA"));
        assert!(portal.details.is_none());
    }

    #[test]
    fn test_type_codes() {
        assert_eq!(PortalDocumentData::type_code("PASSPORT"), "1");
        assert_eq!(PortalDocumentData::type_code("id_card"), "2");
        assert_eq!(PortalDocumentData::type_code("IDENTITY"), "2");
        assert_eq!(PortalDocumentData::type_code("DRIVERS"), "3");
        assert_eq!(PortalDocumentData::type_code("DRIVERS_LICENSE"), "3");
        assert_eq!(PortalDocumentData::type_code("RESIDENCE_PERMIT"), "0");
        assert_eq!(PortalDocumentData::type_code(""), "0");
    }

    #[test]
    fn test_image_data_uri() {
        assert_eq!(
            PortalDocumentData::image_data_uri(b"abc").as_deref(),
            Some("data:image/jpeg;base64,YWJj")
        );
        assert!(PortalDocumentData::image_data_uri(b"").is_none());
    }
}
