use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use validator::Validate;
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// A stored employee document. `image` holds the photo as base64 text.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: String,
    pub gender: String,
    pub courses: Vec<String>,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl Employee {
    pub fn image_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.image)
    }
}

/// Input for a new employee. Every field must be present and non-empty.
#[derive(Debug, Validate)]
pub struct NewEmployee {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub mobile: String,
    #[validate(length(min = 1))]
    pub designation: String,
    #[validate(length(min = 1))]
    pub gender: String,
    #[validate(length(min = 1))]
    pub courses: Vec<String>,
    #[validate(length(min = 1))]
    pub image: Vec<u8>,
}

/// What the store needs to insert a document; the store assigns `id`.
#[derive(Debug, Clone)]
pub struct EmployeeRecord {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub designation: String,
    pub gender: String,
    pub courses: Vec<String>,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl NewEmployee {
    pub fn into_record(self, created_at: DateTime<Utc>) -> EmployeeRecord {
        EmployeeRecord {
            name: self.name,
            email: self.email,
            mobile: self.mobile,
            designation: self.designation,
            gender: self.gender,
            courses: self.courses,
            image: STANDARD.encode(&self.image),
            created_at,
        }
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub designation: Option<String>,
    pub gender: Option<String>,
    pub courses: Option<Vec<String>>,
    pub image: Option<Vec<u8>>,
}

impl EmployeeUpdate {
    /// Returns the new email when it differs from the stored one.
    pub fn changed_email<'a>(&'a self, current: &Employee) -> Option<&'a str> {
        self.email.as_deref().filter(|email| *email != current.email)
    }

    /// Overwrites the supplied fields. `id` and `created_at` are never touched;
    /// `courses` is replaced wholesale.
    pub fn apply_to(self, employee: &mut Employee) {
        if let Some(name) = self.name {
            employee.name = name;
        }
        if let Some(email) = self.email {
            employee.email = email;
        }
        if let Some(mobile) = self.mobile {
            employee.mobile = mobile;
        }
        if let Some(designation) = self.designation {
            employee.designation = designation;
        }
        if let Some(gender) = self.gender {
            employee.gender = gender;
        }
        if let Some(courses) = self.courses {
            employee.courses = courses;
        }
        if let Some(image) = self.image {
            employee.image = STANDARD.encode(image);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Employee {
        Employee {
            id: Uuid::new_v4(),
            name: "Asha".into(),
            email: "asha@x.com".into(),
            mobile: "9000000000".into(),
            designation: "HR".into(),
            gender: "F".into(),
            courses: vec!["MCA".into(), "MBA".into()],
            image: STANDARD.encode([1u8, 2, 3]),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_new_employee_fails_validation() {
        let input = NewEmployee {
            name: "Asha".into(),
            email: "asha@x.com".into(),
            mobile: "9000000000".into(),
            designation: "HR".into(),
            gender: "F".into(),
            courses: vec![],
            image: vec![],
        };
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("courses"));
        assert!(fields.contains_key("image"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn record_stores_image_as_base64() {
        let input = NewEmployee {
            name: "Asha".into(),
            email: "asha@x.com".into(),
            mobile: "9000000000".into(),
            designation: "HR".into(),
            gender: "F".into(),
            courses: vec!["MCA".into()],
            image: vec![0xff, 0xd8, 0xff],
        };
        let record = input.into_record(Utc::now());
        assert_eq!(record.image, "/9j/");
    }

    #[test]
    fn update_touches_only_supplied_fields() {
        let before = stored();
        let mut after = before.clone();
        EmployeeUpdate {
            mobile: Some("9111111111".into()),
            ..Default::default()
        }
        .apply_to(&mut after);

        assert_eq!(after.mobile, "9111111111");
        assert_eq!(Employee { mobile: before.mobile.clone(), ..after }, before);
    }

    #[test]
    fn courses_are_replaced_not_merged() {
        let mut employee = stored();
        EmployeeUpdate {
            courses: Some(vec!["BCA".into()]),
            ..Default::default()
        }
        .apply_to(&mut employee);
        assert_eq!(employee.courses, vec!["BCA".to_string()]);
    }

    #[test]
    fn same_email_is_not_a_change() {
        let employee = stored();
        let update = EmployeeUpdate {
            email: Some("asha@x.com".into()),
            ..Default::default()
        };
        assert_eq!(update.changed_email(&employee), None);

        let update = EmployeeUpdate {
            email: Some("new@x.com".into()),
            ..Default::default()
        };
        assert_eq!(update.changed_email(&employee), Some("new@x.com"));
    }

    #[test]
    fn image_round_trips_through_base64() {
        let mut employee = stored();
        EmployeeUpdate {
            image: Some(vec![9, 8, 7, 6]),
            ..Default::default()
        }
        .apply_to(&mut employee);
        assert_eq!(employee.image_bytes().unwrap(), vec![9, 8, 7, 6]);
    }
}
