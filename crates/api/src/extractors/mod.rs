pub mod employee_body;

pub use employee_body::EmployeeBody;
