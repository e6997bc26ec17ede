use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use log::{error, info};
use crate::db::EmployeeStore;
use crate::errors::AppError;
use crate::models::employee::Employee;
use crate::utils::multipart::EmployeeForm;
use crate::utils::validation::validate_payload;

const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

fn store_failure(message: &'static str) -> impl Fn(AppError) -> AppError {
    move |err| {
        error!("{}: {}", message, err);
        AppError::InternalServerError(message.to_string())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Employee not found".to_string())
}

/// Ids that are not UUIDs are rejected by the store's id format, a server-side failure.
fn parse_id(raw: &str, failure: &'static str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|err| {
        error!("{}: malformed id {:?}: {}", failure, raw, err);
        AppError::InternalServerError(failure.to_string())
    })
}

async fn load_employee(
    store: &dyn EmployeeStore,
    raw_id: &str,
    failure: &'static str,
) -> Result<Employee, AppError> {
    let id = parse_id(raw_id, failure)?;
    store
        .find_by_id(id)
        .await
        .map_err(store_failure(failure))?
        .ok_or_else(not_found)
}

pub async fn create_employee(
    store: web::Data<dyn EmployeeStore>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse, AppError> {
    let new_employee = EmployeeForm::from_request(&req, payload)
        .await?
        .into_new_employee();
    validate_payload(&new_employee, "All fields are required, including an image")?;

    const FAILURE: &str = "Error saving employee data";

    if store
        .find_by_email(&new_employee.email)
        .await
        .map_err(store_failure(FAILURE))?
        .is_some()
    {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let employee = store
        .insert(new_employee.into_record(Utc::now()))
        .await
        .map_err(store_failure(FAILURE))?;
    info!("Created employee {}", employee.id);

    Ok(HttpResponse::Created().json(json!({
        "message": "Employee added successfully",
        "employee": employee,
    })))
}

pub async fn get_employees(
    store: web::Data<dyn EmployeeStore>,
) -> Result<HttpResponse, AppError> {
    let employees = store
        .find_all()
        .await
        .map_err(store_failure("Error retrieving employees"))?;

    Ok(HttpResponse::Ok().json(employees))
}

pub async fn get_employee(
    store: web::Data<dyn EmployeeStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = load_employee(store.get_ref(), &id, "Server error").await?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn get_employee_image(
    store: web::Data<dyn EmployeeStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    const FAILURE: &str = "Error retrieving image";

    let employee = load_employee(store.get_ref(), &id, FAILURE).await?;
    let image = employee.image_bytes().map_err(|err| {
        error!("{} for employee {}: {}", FAILURE, employee.id, err);
        AppError::InternalServerError(FAILURE.to_string())
    })?;

    Ok(HttpResponse::Ok().content_type(IMAGE_CONTENT_TYPE).body(image))
}

pub async fn update_employee(
    store: web::Data<dyn EmployeeStore>,
    id: web::Path<String>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse, AppError> {
    const FAILURE: &str = "Error updating employee data";

    let mut employee = load_employee(store.get_ref(), &id, FAILURE).await?;
    let update = EmployeeForm::from_request(&req, payload).await?.into_update();

    if let Some(email) = update.changed_email(&employee) {
        let existing = store
            .find_by_email(email)
            .await
            .map_err(store_failure(FAILURE))?;
        if existing.is_some_and(|other| other.id != employee.id) {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
    }

    update.apply_to(&mut employee);

    let employee = store
        .save(&employee)
        .await
        .map_err(store_failure(FAILURE))?
        .ok_or_else(not_found)?;
    info!("Updated employee {}", employee.id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee updated successfully",
        "employee": employee,
    })))
}

pub async fn delete_employee(
    store: web::Data<dyn EmployeeStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    const FAILURE: &str = "Error deleting employee";

    let id = parse_id(&id, FAILURE)?;

    let deleted = store
        .delete_by_id(id)
        .await
        .map_err(store_failure(FAILURE))?;
    if !deleted {
        return Err(not_found());
    }
    info!("Deleted employee {}", id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully",
    })))
}
