// Employee endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{EmployeeRecord, OrderRecord};

pub const EMPLOYEES: &str = "api/Empleado";

impl ApiClient {
    /// Orders currently assigned to an employee.
    ///
    /// `GET api/Empleado/{id}/assignments`
    pub async fn employee_assignments(&self, id: i64) -> Result<Vec<OrderRecord>, Error> {
        debug!(id, "fetching employee assignments");
        self.get(&format!("{EMPLOYEES}/{id}/assignments")).await
    }

    /// Employees with no open assignment.
    ///
    /// `GET api/Empleado/available`
    pub async fn available_employees(&self) -> Result<Vec<EmployeeRecord>, Error> {
        self.get(&format!("{EMPLOYEES}/available")).await
    }
}
