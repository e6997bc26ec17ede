use async_trait::async_trait;
use std::sync::Mutex;
use uuid::Uuid;
use super::EmployeeStore;
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeRecord};

/// In-memory store for handler tests. Keeps insertion order.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    employees: Mutex<Vec<Employee>>,
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn find_all(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.employees.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        let employees = self.employees.lock().unwrap();
        Ok(employees.iter().find(|e| e.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError> {
        let employees = self.employees.lock().unwrap();
        Ok(employees.iter().find(|e| e.email == email).cloned())
    }

    async fn insert(&self, record: EmployeeRecord) -> Result<Employee, AppError> {
        let employee = Employee {
            id: Uuid::new_v4(),
            name: record.name,
            email: record.email,
            mobile: record.mobile,
            designation: record.designation,
            gender: record.gender,
            courses: record.courses,
            image: record.image,
            created_at: record.created_at,
        };
        self.employees.lock().unwrap().push(employee.clone());
        Ok(employee)
    }

    async fn save(&self, employee: &Employee) -> Result<Option<Employee>, AppError> {
        let mut employees = self.employees.lock().unwrap();
        Ok(employees.iter_mut().find(|e| e.id == employee.id).map(|stored| {
            let created_at = stored.created_at;
            *stored = Employee { created_at, ..employee.clone() };
            stored.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let mut employees = self.employees.lock().unwrap();
        let before = employees.len();
        employees.retain(|e| e.id != id);
        Ok(employees.len() < before)
    }
}
