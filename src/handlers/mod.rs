use actix_web::web;

pub mod employee;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/employee")
            .route(web::post().to(employee::create_employee)),
    )
    .service(
        web::resource("/api/employees")
            .route(web::get().to(employee::get_employees)),
    )
    .service(
        web::resource("/api/employees/{id}")
            .route(web::get().to(employee::get_employee))
            .route(web::put().to(employee::update_employee))
            .route(web::delete().to(employee::delete_employee)),
    )
    .service(
        web::resource("/api/employee/image/{id}")
            .route(web::get().to(employee::get_employee_image)),
    );
}
