use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::web::{self, Bytes, BytesMut};
use actix_web::HttpRequest;
use futures_util::{Stream, TryStreamExt};
use serde::Deserialize;
use std::pin::pin;
use crate::errors::AppError;
use crate::models::employee::{EmployeeUpdate, NewEmployee};

/// Largest accepted form part or JSON body.
pub const MAX_PART_BYTES: usize = 5 * 1024 * 1024;

/// Raw employee form as sent by the client. Empty values are kept as `None`.
#[derive(Debug, Default)]
pub struct EmployeeForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub designation: Option<String>,
    pub gender: Option<String>,
    course: Vec<String>,
    pub image: Option<Vec<u8>>,
}

/// JSON variant of the form. Carries no image.
#[derive(Debug, Default, Deserialize)]
struct JsonEmployeeForm {
    name: Option<String>,
    email: Option<String>,
    mobile: Option<String>,
    designation: Option<String>,
    gender: Option<String>,
    course: Option<CourseValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CourseValue {
    List(Vec<String>),
    Joined(String),
}

impl EmployeeForm {
    /// Decodes a multipart or JSON body. Any other body, or none at all, is an empty form.
    pub async fn from_request(req: &HttpRequest, payload: web::Payload) -> Result<Self, AppError> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            Self::read_multipart(Multipart::new(req.headers(), payload)).await
        } else if content_type.starts_with("application/json") {
            let body = collect_capped(payload, MAX_PART_BYTES, "request body").await?;
            if body.is_empty() {
                return Ok(EmployeeForm::default());
            }
            let json: JsonEmployeeForm = serde_json::from_slice(&body)
                .map_err(|err| AppError::BadRequest(format!("Invalid JSON body: {}", err)))?;
            Ok(json.into())
        } else {
            Ok(EmployeeForm::default())
        }
    }

    async fn read_multipart(mut payload: Multipart) -> Result<Self, AppError> {
        let mut form = EmployeeForm::default();

        while let Some(field) = payload.try_next().await? {
            let name = field
                .content_disposition()
                .get_name()
                .unwrap_or_default()
                .to_owned();

            let data = collect_capped(field, MAX_PART_BYTES, &name).await?;

            if name == "img" {
                if !data.is_empty() {
                    form.image = Some(data.to_vec());
                }
                continue;
            }

            let value = String::from_utf8(data.to_vec())
                .map_err(|_| AppError::BadRequest(format!("Field '{}' is not valid text", name)))?;
            form.set_text(&name, value);
        }

        Ok(form)
    }

    fn set_text(&mut self, field: &str, value: String) {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "mobile" => &mut self.mobile,
            "designation" => &mut self.designation,
            "gender" => &mut self.gender,
            "course" | "course[]" => {
                self.course.push(value);
                return;
            }
            other => {
                log::debug!("ignoring unknown form field '{}'", other);
                return;
            }
        };
        *slot = non_empty(value);
    }

    /// Courses from every `course` part. A single part may carry a comma-joined list.
    pub fn courses(&self) -> Option<Vec<String>> {
        let courses: Vec<String> = self
            .course
            .iter()
            .flat_map(|value| value.split(','))
            .map(str::trim)
            .filter(|course| !course.is_empty())
            .map(str::to_owned)
            .collect();

        if courses.is_empty() {
            None
        } else {
            Some(courses)
        }
    }

    pub fn into_new_employee(self) -> NewEmployee {
        let courses = self.courses().unwrap_or_default();
        NewEmployee {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            mobile: self.mobile.unwrap_or_default(),
            designation: self.designation.unwrap_or_default(),
            gender: self.gender.unwrap_or_default(),
            courses,
            image: self.image.unwrap_or_default(),
        }
    }

    pub fn into_update(self) -> EmployeeUpdate {
        let courses = self.courses();
        EmployeeUpdate {
            name: self.name,
            email: self.email,
            mobile: self.mobile,
            designation: self.designation,
            gender: self.gender,
            courses,
            image: self.image,
        }
    }
}

impl From<JsonEmployeeForm> for EmployeeForm {
    fn from(json: JsonEmployeeForm) -> Self {
        let mut form = EmployeeForm::default();
        let fields = [
            ("name", json.name),
            ("email", json.email),
            ("mobile", json.mobile),
            ("designation", json.designation),
            ("gender", json.gender),
        ];
        for (field, value) in fields {
            if let Some(value) = value {
                form.set_text(field, value);
            }
        }
        match json.course {
            Some(CourseValue::List(courses)) => form.course = courses,
            Some(CourseValue::Joined(course)) => form.course.push(course),
            None => {}
        }
        form
    }
}

/// Buffers a body stream, failing once it grows past `limit` bytes.
async fn collect_capped<S, E>(stream: S, limit: usize, what: &str) -> Result<BytesMut, AppError>
where
    S: Stream<Item = Result<Bytes, E>>,
    AppError: From<E>,
{
    let mut stream = pin!(stream);
    let mut data = BytesMut::new();
    while let Some(chunk) = stream.try_next().await? {
        if data.len() + chunk.len() > limit {
            return Err(AppError::BadRequest(format!(
                "'{}' exceeds the {} byte limit",
                what, limit
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::error::PayloadError;
    use futures_util::stream;

    fn form_with_courses(values: &[&str]) -> EmployeeForm {
        let mut form = EmployeeForm::default();
        for value in values {
            form.set_text("course", value.to_string());
        }
        form
    }

    #[test]
    fn comma_joined_course_is_split() {
        let form = form_with_courses(&["MCA, MBA"]);
        assert_eq!(form.courses(), Some(vec!["MCA".to_string(), "MBA".to_string()]));
    }

    #[test]
    fn repeated_course_fields_form_a_list() {
        let form = form_with_courses(&["MCA", "BSC"]);
        assert_eq!(form.courses(), Some(vec!["MCA".to_string(), "BSC".to_string()]));
    }

    #[test]
    fn blank_course_counts_as_absent() {
        assert_eq!(form_with_courses(&[" , "]).courses(), None);
        assert_eq!(form_with_courses(&[]).courses(), None);
    }

    #[test]
    fn empty_text_is_absent() {
        let mut form = EmployeeForm::default();
        form.set_text("name", String::new());
        form.set_text("mobile", "9000000000".to_string());
        let update = form.into_update();
        assert!(update.name.is_none());
        assert_eq!(update.mobile.as_deref(), Some("9000000000"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let mut form = EmployeeForm::default();
        form.set_text("salary", "1".to_string());
        assert!(form.into_update().name.is_none());
    }

    #[actix_web::test]
    async fn oversized_part_is_rejected() {
        let chunks = stream::iter(vec![
            Ok::<_, PayloadError>(Bytes::from_static(b"abcd")),
            Ok(Bytes::from_static(b"efgh")),
        ]);
        let err = collect_capped(chunks, 6, "img").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("6 byte limit")));
    }

    #[actix_web::test]
    async fn part_at_the_limit_is_kept() {
        let chunks = stream::iter(vec![Ok::<_, PayloadError>(Bytes::from_static(b"abcdef"))]);
        let data = collect_capped(chunks, 6, "img").await.unwrap();
        assert_eq!(&data[..], b"abcdef");
    }

    #[test]
    fn json_course_accepts_list_or_joined_text() {
        let json: JsonEmployeeForm = serde_json::from_str(r#"{"course": ["MCA", "BCA"]}"#).unwrap();
        let form = EmployeeForm::from(json);
        assert_eq!(form.courses(), Some(vec!["MCA".to_string(), "BCA".to_string()]));

        let json: JsonEmployeeForm =
            serde_json::from_str(r#"{"course": "MBA,BSC", "name": ""}"#).unwrap();
        let form = EmployeeForm::from(json);
        assert_eq!(form.courses(), Some(vec!["MBA".to_string(), "BSC".to_string()]));
        assert!(form.name.is_none());
    }
}
