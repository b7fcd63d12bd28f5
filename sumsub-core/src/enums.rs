//! Closed wire enumerations
//!
//! Every enum converts to and from its exact wire string. Parsing is strict:
//! an unrecognized string is an error, never a default variant.

use crate::ParseEnumError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$( $name::$variant, )+];

            /// Wire representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    _ => Err(ParseEnumError::new(stringify!($name), s)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Webhook notification kinds
    pub enum WebhookType {
        ApplicantCreated => "applicantCreated",
        ApplicantPending => "applicantPending",
        ApplicantReviewed => "applicantReviewed",
        ApplicantOnHold => "applicantOnHold",
        ApplicantPersonalInfoChanged => "applicantPersonalInfoChanged",
        ApplicantReset => "applicantReset",
        ApplicantActionPending => "applicantActionPending",
        ApplicantActionReviewed => "applicantActionReviewed",
        ApplicantActionOnHold => "applicantActionOnHold",
        ApplicantWorkflowCompleted => "applicantWorkflowCompleted",
        VideoIdentStatusChanged => "videoIdentStatusChanged",
    }
}

impl WebhookType {
    /// A review finished (applicant or action level)
    pub fn is_review(&self) -> bool {
        matches!(self, Self::ApplicantReviewed | Self::ApplicantActionReviewed)
    }

    /// Something was submitted and awaits review
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::ApplicantPending | Self::ApplicantActionPending)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::ApplicantWorkflowCompleted)
    }
}

wire_enum! {
    /// Outcome of a review
    pub enum ReviewAnswer {
        /// Approved
        Green => "GREEN",
        /// Rejected
        Red => "RED",
        /// Needs a manual look
        Yellow => "YELLOW",
    }
}

impl ReviewAnswer {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Green)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Red)
    }

    pub fn requires_review(&self) -> bool {
        matches!(self, Self::Yellow)
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Green => "Approved",
            Self::Red => "Rejected",
            Self::Yellow => "Requires Review",
        }
    }
}

wire_enum! {
    /// Review lifecycle status
    pub enum ReviewStatus {
        Init => "init",
        Pending => "pending",
        Prechecked => "prechecked",
        Queued => "queued",
        Completed => "completed",
        OnHold => "onHold",
    }
}

impl ReviewStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Not yet reviewed. `OnHold` is neither pending nor completed.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::Init | Self::Pending | Self::Prechecked | Self::Queued
        )
    }
}

wire_enum! {
    /// Document set and identity document types
    pub enum DocumentType {
        Identity => "IDENTITY",
        Selfie => "SELFIE",
        VideoSelfie => "VIDEO_SELFIE",
        ProofOfResidence => "PROOF_OF_RESIDENCE",
        PaymentMethod => "PAYMENT_METHOD",
        CompanyDoc => "COMPANY_DOC",
        AdditionalDocument => "ADDITIONAL_DOCUMENT",
        IdCard => "ID_CARD",
        Passport => "PASSPORT",
        Drivers => "DRIVERS",
        ResidencePermit => "RESIDENCE_PERMIT",
        Visa => "VISA",
        HealthId => "HEALTH_ID",
    }
}

impl DocumentType {
    /// Concrete identity document subtype (as opposed to a document set)
    pub fn is_identity_document(&self) -> bool {
        matches!(
            self,
            Self::IdCard
                | Self::Passport
                | Self::Drivers
                | Self::ResidencePermit
                | Self::Visa
                | Self::HealthId
        )
    }

    /// Front and back images are expected
    pub fn requires_multiple_sides(&self) -> bool {
        matches!(self, Self::IdCard | Self::Drivers | Self::ResidencePermit)
    }
}

wire_enum! {
    /// Applicant kind
    pub enum ApplicantType {
        Individual => "individual",
        Company => "company",
    }
}

impl ApplicantType {
    pub fn is_individual(&self) -> bool {
        matches!(self, Self::Individual)
    }

    pub fn is_company(&self) -> bool {
        matches!(self, Self::Company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_type_round_trip() {
        assert_eq!(WebhookType::ALL.len(), 11);
        for kind in WebhookType::ALL {
            assert_eq!(kind.as_str().parse::<WebhookType>(), Ok(*kind));
        }
    }

    #[test]
    fn test_webhook_type_is_strict() {
        let err = "applicantDeleted".parse::<WebhookType>().unwrap_err();
        assert_eq!(err.kind, "WebhookType");
        assert_eq!(err.value, "applicantDeleted");
        assert!("ApplicantCreated".parse::<WebhookType>().is_err());
        assert!("".parse::<WebhookType>().is_err());
    }

    #[test]
    fn test_webhook_type_helpers() {
        assert!(WebhookType::ApplicantReviewed.is_review());
        assert!(WebhookType::ApplicantActionReviewed.is_review());
        assert!(!WebhookType::ApplicantPending.is_review());
        assert!(WebhookType::ApplicantActionPending.is_pending());
        assert!(WebhookType::ApplicantWorkflowCompleted.is_completed());
        assert!(!WebhookType::ApplicantReviewed.is_completed());
    }

    #[test]
    fn test_review_answer() {
        assert!(ReviewAnswer::Green.is_approved());
        assert!(ReviewAnswer::Red.is_rejected());
        assert!(ReviewAnswer::Yellow.requires_review());
        assert_eq!(ReviewAnswer::Green.label(), "Approved");
        assert_eq!(ReviewAnswer::Red.label(), "Rejected");
        assert_eq!(ReviewAnswer::Yellow.label(), "Requires Review");
        assert!("green".parse::<ReviewAnswer>().is_err());
    }

    #[test]
    fn test_review_status() {
        assert!(ReviewStatus::Completed.is_completed());
        for status in [
            ReviewStatus::Init,
            ReviewStatus::Pending,
            ReviewStatus::Prechecked,
            ReviewStatus::Queued,
        ] {
            assert!(status.is_pending());
        }
        assert!(!ReviewStatus::OnHold.is_pending());
        assert!(!ReviewStatus::OnHold.is_completed());
        assert_eq!("onHold".parse::<ReviewStatus>(), Ok(ReviewStatus::OnHold));
    }

    #[test]
    fn test_document_type() {
        assert!(DocumentType::Passport.is_identity_document());
        assert!(!DocumentType::Identity.is_identity_document());
        assert!(!DocumentType::Selfie.is_identity_document());
        assert!(DocumentType::IdCard.requires_multiple_sides());
        assert!(!DocumentType::Passport.requires_multiple_sides());
        assert_eq!(DocumentType::ALL.len(), 13);
    }

    #[test]
    fn test_applicant_type() {
        assert!(ApplicantType::Individual.is_individual());
        assert!(ApplicantType::Company.is_company());
        assert_eq!(ApplicantType::Company.to_string(), "company");
    }

    #[test]
    fn test_serde_uses_wire_strings() {
        let json = serde_json::to_string(&WebhookType::VideoIdentStatusChanged).unwrap();
        assert_eq!(json, "\"videoIdentStatusChanged\"");

        let answer: ReviewAnswer = serde_json::from_str("\"YELLOW\"").unwrap();
        assert_eq!(answer, ReviewAnswer::Yellow);

        assert!(serde_json::from_str::<ReviewAnswer>("\"BLUE\"").is_err());
    }
}
