use crate::models::validation::{check_keys, email_field, enum_field};
use crate::utils::error::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Lifecycle of a donation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Pending,
    Inprogress,
    Done,
    Canceled,
}

impl DonationStatus {
    pub const ALL: [&'static str; 4] = ["pending", "inprogress", "done", "canceled"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(DonationStatus::Pending),
            "inprogress" => Some(DonationStatus::Inprogress),
            "done" => Some(DonationStatus::Done),
            "canceled" => Some(DonationStatus::Canceled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "pending",
            DonationStatus::Inprogress => "inprogress",
            DonationStatus::Done => "done",
            DonationStatus::Canceled => "canceled",
        }
    }
}

/// Body of `POST /request`, stored as sent once validated.
#[derive(Debug, Clone)]
pub struct NewDonationRequest {
    pub requester_email: String,
    pub fields: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for NewDonationRequest {
    type Error = ValidationError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        check_keys(&fields)?;

        let requester = match fields.get("requester") {
            Some(Value::Object(requester)) => requester,
            Some(_) => return Err(ValidationError::new("requester", "must be an object")),
            None => return Err(ValidationError::new("requester.email", "is required")),
        };
        let requester_email = email_field(requester, "email", "requester.email", true)?
            .ok_or_else(|| ValidationError::new("requester.email", "is required"))?;

        enum_field(&fields, "status", DonationStatus::parse, &DonationStatus::ALL)?;

        match fields.get("userInfo") {
            Some(Value::Object(user_info)) => check_donor(user_info)?,
            Some(_) => return Err(ValidationError::new("userInfo", "must be an object")),
            None => {}
        }

        Ok(Self {
            requester_email,
            fields,
        })
    }
}

/// Body of `PATCH /donation/update/{id}`: exactly the two mutable fields.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct DonationUpdate {
    pub status: DonationStatus,
    #[serde(rename = "userInfo")]
    #[schema(value_type = Object)]
    pub user_info: Map<String, Value>,
}

impl DonationUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_keys(&self.user_info).map_err(|err| ValidationError::new(format!("userInfo.{}", err.field), err.message))?;
        check_donor(&self.user_info)
    }
}

fn check_donor(user_info: &Map<String, Value>) -> Result<(), ValidationError> {
    email_field(user_info, "donorEmail", "userInfo.donorEmail", false)?;
    Ok(())
}
